//! The form orchestrator.
//!
//! A [`Form`] owns its fields in registration order and drives one request
//! through them:
//!
//! 1. Fields are attached with [`Form::add_field`], which derives ids,
//!    resolves defaults and validators, and rejects duplicate names.
//! 2. [`Form::submit`] runs the anti-forgery and body checks, submits every
//!    field, decides the [`FormResult`] and persists values and errors into
//!    the form's session namespace.
//! 3. After the redirect, [`Form::pre_dispatch`] loads the session record
//!    back into the fields so they render with the submitted values and
//!    their error messages.
//!
//! Invalid input never produces an `Err`. Errors are returned only for
//! configuration mistakes and session store failures.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use formwork_forms::prelude::*;
//! use formwork_session::InMemorySessionStore;
//!
//! let store = Arc::new(InMemorySessionStore::new());
//! let mut form = Form::new("contact", store)
//!     .with_success_url("/thanks")
//!     .with_error_url("/contact");
//! form.add_field(Text::new("name").label("Name")).unwrap();
//! form.add_field(SubmitButton::new("send")).unwrap();
//!
//! let params = RequestParams::from_pairs(vec![("name", "Ann"), ("send", "Submit")]);
//! assert_eq!(form.submit(&params).unwrap(), FormResult::Success);
//! assert_eq!(form.redirect_url(), Some("/thanks"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use formwork_core::logging::form_span;
use formwork_core::settings::{ERROR_CSRF, ERROR_EMPTY_CONTENT, ERROR_MAX_POST_SIZE, ERROR_REQUIRED};
use formwork_core::{FormworkError, FormworkResult, Settings, Translator};
use formwork_session::{
    resolve_expiration, Authentication, CsrfToken, SessionNamespace, SessionStore,
};
use tracing::{debug, warn};

use crate::csrf;
use crate::error::{config_error, FormError};
use crate::field::{attach, submit as submit_field, AttachContext, Field, SubmitContext, TabIndex};
use crate::params::RequestParams;
use crate::rendering::{self, dashed, RenderContext};
use crate::validators::ValidatorRegistry;
use crate::value::Value;
use crate::view::{escape_html, format_positional, DefaultView, View};

const ERRORS_TEMPLATE: &str = r#"<div class="errors">{errors}</div>"#;
const ERROR_TEMPLATE: &str = r#"<div class="{class}">{message}</div>"#;
const CSRF_TEMPLATE: &str = r#"<input type="hidden" name="{name}" value="{value}" />"#;

/// Shared pointer to a translator.
pub type SharedTranslator = Arc<dyn Translator>;

/// Units used when reporting byte sizes to users.
const FILE_SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// The outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormResult {
    /// Not submitted yet.
    #[default]
    Unset,
    /// At least one error was registered.
    Error,
    /// Submitted without errors.
    Success,
    /// Submitted without errors by a "previous step" button.
    SuccessPrevStep,
    /// Submitted without errors by a "next step" button.
    SuccessNextStep,
}

impl FormResult {
    /// Returns `true` for any of the success variants.
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            Self::Success | Self::SuccessPrevStep | Self::SuccessNextStep
        )
    }
}

/// How far a form has progressed through the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DispatchState {
    /// Constructed, no fields yet.
    #[default]
    Created,
    /// At least one field attached.
    Initialized,
    /// Session record loaded into the fields for rendering.
    PreDispatched,
    /// Request parameters submitted.
    Submitted,
}

/// Formats a byte count with one decimal and a binary unit, e.g. `1.5 KB`.
///
/// # Examples
///
/// ```
/// use formwork_forms::form::format_bytes;
///
/// assert_eq!(format_bytes(512), "512.0 B");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(8 * 1024 * 1024), "8.0 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut level = 0;
    while size >= 1024.0 && level < FILE_SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        level += 1;
    }
    format!("{size:.1} {}", FILE_SIZE_UNITS[level])
}

/// A server-side HTML form.
pub struct Form {
    id: String,
    fields: Vec<Box<dyn Field>>,
    values: HashMap<String, Value>,
    errors: Vec<FormError>,
    result: FormResult,
    state: DispatchState,
    success_url: Option<String>,
    error_url: Option<String>,
    next_step_url: Option<String>,
    prev_step_url: Option<String>,
    settings: Settings,
    translator: Option<SharedTranslator>,
    view: Arc<dyn View>,
    session_store: Arc<dyn SessionStore>,
    auth: Option<Arc<dyn Authentication>>,
    validators: Arc<ValidatorRegistry>,
    max_post_size: Option<u64>,
    session_loaded: bool,
    pre_dispatched: bool,
    csrf_failed: bool,
    auto_tab_index: i32,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("result", &self.result)
            .field("fields", &self.fields)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Creates a form with default settings, persisting into `store`.
    pub fn new(id: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            values: HashMap::new(),
            errors: Vec::new(),
            result: FormResult::Unset,
            state: DispatchState::Created,
            success_url: None,
            error_url: None,
            next_step_url: None,
            prev_step_url: None,
            settings: Settings::default(),
            translator: None,
            view: Arc::new(DefaultView),
            session_store: store,
            auth: None,
            validators: Arc::new(ValidatorRegistry::builtin()),
            max_post_size: None,
            session_loaded: false,
            pre_dispatched: false,
            csrf_failed: false,
            auto_tab_index: 0,
        }
    }

    // ── Builders ─────────────────────────────────────────────────────

    /// Replaces the settings. Call before adding fields.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Enables translation of labels, option texts and messages.
    #[must_use]
    pub fn with_translator(mut self, translator: SharedTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Replaces the template formatter.
    #[must_use]
    pub fn with_view(mut self, view: Arc<dyn View>) -> Self {
        self.view = view;
        self
    }

    /// Attaches the authentication collaborator used for session expiration.
    #[must_use]
    pub fn with_authentication(mut self, auth: Arc<dyn Authentication>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Replaces the validator registry used to resolve named validators.
    #[must_use]
    pub fn with_validator_registry(mut self, validators: Arc<ValidatorRegistry>) -> Self {
        self.validators = validators;
        self
    }

    /// Sets the session record lifetime in seconds.
    #[must_use]
    pub const fn with_session_expiration(mut self, seconds: u64) -> Self {
        self.settings.session_expiration = Some(seconds);
        self
    }

    /// Sets whether visible fields without an explicit flag are required.
    #[must_use]
    pub const fn with_default_required(mut self, required: bool) -> Self {
        self.settings.default_required = required;
        self
    }

    /// Enables or disables the anti-forgery token check.
    #[must_use]
    pub const fn with_csrf(mut self, enabled: bool) -> Self {
        self.settings.csrf_enabled = enabled;
        self
    }

    /// Sets the offset added to every fixed tab index.
    #[must_use]
    pub const fn with_base_tab_index(mut self, base: u32) -> Self {
        self.settings.base_tab_index = base;
        self
    }

    /// Sets the largest accepted request body in bytes.
    #[must_use]
    pub const fn with_max_post_size(mut self, bytes: u64) -> Self {
        self.max_post_size = Some(bytes);
        self
    }

    /// Sets the redirect target after a successful submission.
    #[must_use]
    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    /// Sets the redirect target after a failed submission.
    #[must_use]
    pub fn with_error_url(mut self, url: impl Into<String>) -> Self {
        self.error_url = Some(url.into());
        self
    }

    /// Sets the redirect target for [`FormResult::SuccessNextStep`].
    #[must_use]
    pub fn with_next_step_url(mut self, url: impl Into<String>) -> Self {
        self.next_step_url = Some(url.into());
        self
    }

    /// Sets the redirect target for [`FormResult::SuccessPrevStep`].
    #[must_use]
    pub fn with_prev_step_url(mut self, url: impl Into<String>) -> Self {
        self.prev_step_url = Some(url.into());
        self
    }

    /// Attaches a field and returns the form, for chained construction.
    pub fn with_field(mut self, field: impl Field + 'static) -> FormworkResult<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Returns the form id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the result of the last submission.
    pub const fn result(&self) -> FormResult {
        self.result
    }

    /// Returns the dispatch state.
    pub const fn state(&self) -> DispatchState {
        self.state
    }

    /// Returns the settings the form was built with.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns `true` if the last submission failed the anti-forgery check.
    pub const fn csrf_failed(&self) -> bool {
        self.csrf_failed
    }

    /// Iterates over the fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &dyn Field> {
        self.fields.iter().map(|field| field.as_ref() as &dyn Field)
    }

    /// Returns the field named `name`.
    pub fn field(&self, name: &str) -> Option<&dyn Field> {
        self.fields
            .iter()
            .find(|field| field.core().name == name)
            .map(|field| &**field)
    }

    /// Returns the field named `name` mutably.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field> {
        for field in &mut self.fields {
            if field.core().name == name {
                let field: &mut dyn Field = field.as_mut();
                return Some(field);
            }
        }
        None
    }

    /// Returns the session namespace key, `<prefix>.<form id>`.
    pub fn namespace_name(&self) -> FormworkResult<String> {
        self.require_id()?;
        Ok(format!(
            "{}.{}",
            self.settings.session_namespace_prefix, self.id
        ))
    }

    /// Returns the redirect target matching the submission result.
    pub fn redirect_url(&self) -> Option<&str> {
        match self.result {
            FormResult::Unset => None,
            FormResult::Error => self.error_url.as_deref(),
            FormResult::Success => self.success_url.as_deref(),
            FormResult::SuccessPrevStep => self.prev_step_url.as_deref(),
            FormResult::SuccessNextStep => self.next_step_url.as_deref(),
        }
    }

    // ── Fields ───────────────────────────────────────────────────────

    /// Attaches a field to the form.
    ///
    /// Fails when the form has no id, when a field with the same name is
    /// already attached, or when the field itself is misconfigured.
    pub fn add_field(&mut self, field: impl Field + 'static) -> FormworkResult<()> {
        self.add_boxed_field(Box::new(field))
    }

    /// Attaches an already boxed field.
    pub fn add_boxed_field(&mut self, mut field: Box<dyn Field>) -> FormworkResult<()> {
        self.require_id()?;
        let name = field.core().name.clone();
        if !name.is_empty() && self.field(&name).is_some() {
            return Err(config_error(
                "Form",
                "Field with the same name already exists.",
                &self.id,
                &name,
                field.field_type(),
            ));
        }
        let ctx = AttachContext {
            form_id: &self.id,
            delimiter: &self.settings.html_ids_delimiter,
            default_required: self.settings.default_required,
            translate: self.translator.is_some(),
            validators: &self.validators,
        };
        attach(field.as_mut(), &ctx)?;
        self.fields.push(field);
        if self.state == DispatchState::Created {
            self.state = DispatchState::Initialized;
        }
        Ok(())
    }

    // ── Values and errors ────────────────────────────────────────────

    /// Returns the form values, loading them from the session on first
    /// access before pre-dispatch.
    pub fn values(&mut self) -> FormworkResult<&HashMap<String, Value>> {
        self.ensure_session_loaded()?;
        Ok(&self.values)
    }

    /// Returns the form errors, loading them from the session on first
    /// access before pre-dispatch.
    pub fn errors(&mut self) -> FormworkResult<&[FormError]> {
        self.ensure_session_loaded()?;
        Ok(&self.errors)
    }

    /// Merges `values` into the form values and the matching fields.
    pub fn set_values(&mut self, values: HashMap<String, Value>) {
        for (name, value) in values {
            if let Some(field) = self.field_mut(&name) {
                field.core_mut().value = value.clone();
            }
            self.values.insert(name, value);
        }
    }

    /// Appends a form error and attaches its message to the named fields.
    pub fn add_error(&mut self, error: FormError) {
        for name in &error.fields {
            if let Some(field) = self.field_mut(name) {
                field.core_mut().errors.push(error.message.clone());
            }
        }
        self.errors.push(error);
        if self.state == DispatchState::Submitted {
            self.result = FormResult::Error;
        }
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Submits request parameters.
    pub fn submit(&mut self, params: &RequestParams) -> FormworkResult<FormResult> {
        self.submit_sized(params, None)
    }

    /// Submits request parameters, checking the body length against the
    /// configured maximum post size first.
    pub fn submit_with_content_length(
        &mut self,
        params: &RequestParams,
        content_length: u64,
    ) -> FormworkResult<FormResult> {
        self.submit_sized(params, Some(content_length))
    }

    fn submit_sized(
        &mut self,
        params: &RequestParams,
        content_length: Option<u64>,
    ) -> FormworkResult<FormResult> {
        let span = form_span(&self.id);
        let _enter = span.enter();
        let namespace = self.namespace_name()?;

        self.values.clear();
        self.errors.clear();
        self.result = FormResult::Unset;
        self.csrf_failed = false;
        self.session_loaded = true;
        for field in &mut self.fields {
            field.core_mut().errors.clear();
        }

        if self.settings.csrf_enabled {
            let stored = self.session_store.load(&namespace)?;
            if !csrf::matches_posted(&stored, params) {
                warn!(form = %self.id, "anti-forgery token check failed");
                self.csrf_failed = true;
                let message = self.form_message(ERROR_CSRF, &[]);
                self.errors.push(FormError::form_wide(message));
            }
        }
        if params.is_empty() {
            let message = self.form_message(ERROR_EMPTY_CONTENT, &[]);
            self.errors.push(FormError::form_wide(message));
        }
        if let (Some(limit), Some(length)) = (self.max_post_size, content_length) {
            if length > limit {
                warn!(form = %self.id, length, limit, "request body too large");
                let message = self.form_message(ERROR_MAX_POST_SIZE, &[format_bytes(limit)]);
                self.errors.push(FormError::form_wide(message));
            }
        }

        let required_message = self.settings.error_message(ERROR_REQUIRED);
        let mut ctx = SubmitContext {
            translator: self.translator.as_deref(),
            view: &*self.view,
            form_errors: &mut self.errors,
            required_message: &required_message,
        };
        for field in &mut self.fields {
            let value = submit_field(field.as_mut(), params, &mut ctx);
            if field.is_action() {
                continue;
            }
            field.core_mut().value = value.clone();
            let stored = if value.is_null() {
                Value::String(String::new())
            } else {
                value
            };
            self.values.insert(field.core().name.clone(), stored);
        }

        self.result = if self.errors.is_empty() {
            self.fields
                .iter()
                .find(|field| field.is_action() && params.contains(&field.core().name))
                .and_then(|field| field.result_state())
                .unwrap_or(FormResult::Success)
        } else {
            FormResult::Error
        };
        self.state = DispatchState::Submitted;

        self.save_session()?;
        debug!(
            form = %self.id,
            result = ?self.result,
            values = self.values.len(),
            errors = self.errors.len(),
            "form submitted"
        );
        Ok(self.result)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Persists the current values and errors into the session namespace.
    pub fn save_session(&mut self) -> FormworkResult<()> {
        let namespace = self.namespace_name()?;
        let expiration = resolve_expiration(self.settings.session_expiration, self.auth.as_deref());
        let mut values = serde_json::Map::new();
        for (name, value) in &self.values {
            values.insert(name.clone(), serde_json::to_value(value)?);
        }
        let errors = self
            .errors
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.session_store.update(&namespace, &mut |record: &mut SessionNamespace| {
            record.set_values(values.clone());
            record.set_errors(errors.clone());
            record.set_expiration_seconds(expiration);
        })?;
        debug!(form = %self.id, namespace = %namespace, expiration, "session saved");
        Ok(())
    }

    /// Empties the values, errors and anti-forgery tokens, both in the form
    /// and in the session namespace.
    pub fn clear_session(&mut self) -> FormworkResult<()> {
        let namespace = self.namespace_name()?;
        self.values.clear();
        self.errors.clear();
        self.session_loaded = true;
        self.session_store
            .update(&namespace, &mut |record: &mut SessionNamespace| record.clear())?;
        debug!(form = %self.id, namespace = %namespace, "session cleared");
        Ok(())
    }

    fn ensure_session_loaded(&mut self) -> FormworkResult<()> {
        if self.session_loaded || self.state >= DispatchState::PreDispatched {
            return Ok(());
        }
        let namespace = self.namespace_name()?;
        let record = self.session_store.load(&namespace)?;
        for (name, stored) in record.values {
            let value: Value = serde_json::from_value(stored)?;
            self.values.insert(name, value);
        }
        for stored in record.errors {
            self.errors.push(serde_json::from_value(stored)?);
        }
        self.session_loaded = true;
        debug!(
            form = %self.id,
            values = self.values.len(),
            errors = self.errors.len(),
            "session loaded"
        );
        Ok(())
    }

    // ── Pre-dispatch ─────────────────────────────────────────────────

    /// Prepares the form for rendering.
    ///
    /// Loads the session record, pushes stored values into the fields,
    /// attaches stored error messages to their fields, translates labels and
    /// kind-specific texts, and assigns automatic tab indexes in
    /// registration order starting from `1`. Runs once per form.
    pub fn pre_dispatch(&mut self) -> FormworkResult<()> {
        if self.pre_dispatched {
            return Ok(());
        }
        self.ensure_session_loaded()?;

        for field in &mut self.fields {
            let core = field.core_mut();
            if let Some(value) = self.values.get(&core.name) {
                core.value = value.clone();
            }
            for error in &self.errors {
                if error.concerns(&core.name) && !core.errors.contains(&error.message) {
                    core.errors.push(error.message.clone());
                }
            }

            let translator = self
                .translator
                .as_deref()
                .filter(|_| field.core().is_translated());
            if let Some(translator) = translator {
                let core = field.core_mut();
                for text in [&mut core.label, &mut core.title].into_iter().flatten() {
                    if !text.is_empty() {
                        *text = translator.translate(text.as_str());
                    }
                }
            }
            field.on_pre_dispatch(translator);

            let core = field.core_mut();
            if core.tab_index == Some(TabIndex::Auto) {
                self.auto_tab_index += 1;
                core.tab_index = Some(TabIndex::Fixed(self.auto_tab_index));
            }
        }

        self.pre_dispatched = true;
        if self.state < DispatchState::PreDispatched {
            self.state = DispatchState::PreDispatched;
        }
        debug!(form = %self.id, "form pre-dispatched");
        Ok(())
    }

    // ── Anti-forgery ─────────────────────────────────────────────────

    /// Issues a new anti-forgery token and stores it in the session.
    pub fn csrf_token(&mut self) -> FormworkResult<CsrfToken> {
        let namespace = self.namespace_name()?;
        let token = csrf::generate_token();
        self.session_store
            .update(&namespace, &mut |record: &mut SessionNamespace| {
                record.push_csrf(token.clone());
            })?;
        Ok(token)
    }

    /// Returns the message registered when the anti-forgery check fails.
    pub fn csrf_error_message(&self) -> String {
        self.form_message(ERROR_CSRF, &[])
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Renders the label, control and errors of the field named `name`.
    pub fn render_field(&self, name: &str) -> FormworkResult<String> {
        let field = self.field(name).ok_or_else(|| {
            FormworkError::NotFound(format!(
                "No field `{name}` exists in form `{}`.",
                self.id
            ))
        })?;
        Ok(rendering::render_field(field, &self.render_context()))
    }

    /// Renders the hidden input carrying a freshly issued anti-forgery token.
    pub fn render_csrf(&mut self) -> FormworkResult<String> {
        let token = self.csrf_token()?;
        let name = escape_html(&token.name);
        let value = escape_html(&token.value);
        Ok(self.view.format(
            CSRF_TEMPLATE,
            &[("name", name.as_str()), ("value", value.as_str())],
        ))
    }

    /// Renders every form error, or nothing when there are none.
    pub fn render_errors(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        let items: String = self
            .errors
            .iter()
            .map(|error| {
                let mut classes = vec!["error".to_string()];
                classes.extend(error.fields.iter().map(|name| dashed(name)));
                let class = escape_html(&classes.join(" "));
                let message = escape_html(&error.message);
                self.view.format(
                    ERROR_TEMPLATE,
                    &[("class", class.as_str()), ("message", message.as_str())],
                )
            })
            .collect();
        self.view
            .format(ERRORS_TEMPLATE, &[("errors", items.as_str())])
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            form_id: &self.id,
            delimiter: &self.settings.html_ids_delimiter,
            base_tab_index: i32::try_from(self.settings.base_tab_index).unwrap_or(i32::MAX),
            view: &*self.view,
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn require_id(&self) -> FormworkResult<()> {
        if self.id.is_empty() {
            return Err(FormworkError::ImproperlyConfigured(
                "No form `id` defined.".into(),
            ));
        }
        Ok(())
    }

    fn form_message(&self, code: &str, args: &[String]) -> String {
        let template = self.settings.error_message(code);
        let template = match &self.translator {
            Some(translator) => translator.translate(&template),
            None => template,
        };
        if args.is_empty() {
            template
        } else {
            format_positional(&*self.view, &template, args)
        }
    }
}
