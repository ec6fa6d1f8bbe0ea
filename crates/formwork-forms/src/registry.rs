//! Request-scoped registry of forms.
//!
//! A [`FormRegistry`] is created per request and owns every form taking part
//! in it. It tracks which single field receives autofocus across all forms
//! and calls the registered handlers when a submission fails the
//! anti-forgery check.

use std::collections::HashMap;
use std::fmt;

use formwork_core::{FormworkError, FormworkResult};
use tracing::debug;

use crate::form::{Form, FormResult};
use crate::params::RequestParams;

/// Callback invoked with the form and the error message when a submission
/// fails the anti-forgery check.
pub type CsrfErrorHandler = Box<dyn Fn(&Form, &str) + Send + Sync>;

/// Forms of one request, keyed by id.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use formwork_forms::prelude::*;
/// use formwork_session::InMemorySessionStore;
///
/// let store = Arc::new(InMemorySessionStore::new());
/// let mut registry = FormRegistry::new();
/// registry.insert(Form::new("login", store)).unwrap();
/// assert!(registry.get("login").is_ok());
/// assert!(registry.get("signup").is_err());
/// ```
#[derive(Default)]
pub struct FormRegistry {
    forms: HashMap<String, Form>,
    auto_focus: Option<(String, String)>,
    csrf_error_handlers: Vec<CsrfErrorHandler>,
}

impl fmt::Debug for FormRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRegistry")
            .field("forms", &self.forms.keys().collect::<Vec<_>>())
            .field("auto_focus", &self.auto_focus)
            .field("csrf_error_handlers", &self.csrf_error_handlers.len())
            .finish()
    }
}

impl FormRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a form under its id.
    pub fn insert(&mut self, form: Form) -> FormworkResult<()> {
        let id = form.id().to_string();
        if id.is_empty() {
            return Err(FormworkError::ImproperlyConfigured(
                "No form `id` defined.".into(),
            ));
        }
        if self.forms.contains_key(&id) {
            return Err(FormworkError::ImproperlyConfigured(format!(
                "Another form instance already exists under form id `{id}`."
            )));
        }
        debug!(form = %id, "form registered");
        self.forms.insert(id, form);
        Ok(())
    }

    /// Returns the form registered under `id`.
    pub fn get(&self, id: &str) -> FormworkResult<&Form> {
        self.forms.get(id).ok_or_else(|| not_found(id))
    }

    /// Returns the form registered under `id` mutably.
    pub fn get_mut(&mut self, id: &str) -> FormworkResult<&mut Form> {
        self.forms.get_mut(id).ok_or_else(|| not_found(id))
    }

    /// Removes and returns the form registered under `id`.
    pub fn remove(&mut self, id: &str) -> Option<Form> {
        if self
            .auto_focus
            .as_ref()
            .is_some_and(|(form_id, _)| form_id == id)
        {
            self.auto_focus = None;
        }
        self.forms.remove(id)
    }

    /// Returns `true` if a form is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.forms.contains_key(id)
    }

    /// Returns the number of registered forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns `true` if no form is registered.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    // ── Autofocus ────────────────────────────────────────────────────

    /// Gives autofocus to one field, taking it away from the field that
    /// held it before.
    pub fn set_auto_focus(&mut self, form_id: &str, field_name: &str) -> FormworkResult<()> {
        let form = self.forms.get_mut(form_id).ok_or_else(|| not_found(form_id))?;
        let field = form.field_mut(field_name).ok_or_else(|| {
            FormworkError::NotFound(format!(
                "No field `{field_name}` exists in form `{form_id}`."
            ))
        })?;
        field.core_mut().auto_focus = true;

        if let Some((old_form, old_field)) = self.auto_focus.take() {
            if old_form != form_id || old_field != field_name {
                if let Some(field) = self
                    .forms
                    .get_mut(&old_form)
                    .and_then(|form| form.field_mut(&old_field))
                {
                    field.core_mut().auto_focus = false;
                }
            }
        }
        self.auto_focus = Some((form_id.to_string(), field_name.to_string()));
        Ok(())
    }

    /// Returns the `(form id, field name)` holding autofocus.
    pub fn auto_focused(&self) -> Option<(&str, &str)> {
        self.auto_focus
            .as_ref()
            .map(|(form, field)| (form.as_str(), field.as_str()))
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Registers a handler called when a submission fails the anti-forgery
    /// check.
    pub fn add_csrf_error_handler<F>(&mut self, handler: F)
    where
        F: Fn(&Form, &str) + Send + Sync + 'static,
    {
        self.csrf_error_handlers.push(Box::new(handler));
    }

    /// Submits `params` to the form registered under `form_id`, calling the
    /// anti-forgery error handlers when the check fails.
    pub fn submit(&mut self, form_id: &str, params: &RequestParams) -> FormworkResult<FormResult> {
        let form = self.forms.get_mut(form_id).ok_or_else(|| not_found(form_id))?;
        let result = form.submit(params)?;
        if form.csrf_failed() {
            let form = &*form;
            let message = form.csrf_error_message();
            for handler in &self.csrf_error_handlers {
                handler(form, &message);
            }
        }
        Ok(result)
    }
}

fn not_found(id: &str) -> FormworkError {
    FormworkError::NotFound(format!(
        "No form instance exists under form id `{id}`. Check if searched form instance has \
         been already initialized or if form id has been already set."
    ))
}
