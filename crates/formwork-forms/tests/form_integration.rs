//! Integration tests for the submit -> session -> pre-dispatch cycle.
//!
//! These tests drive complete forms through the public API, covering:
//! 1. Field submission rules seen through a form
//! 2. Date and number validation inside a form
//! 3. Post-redirect-get with the in-memory and file session stores
//! 4. Multi-step results, option groups and custom validators

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use formwork_core::{CatalogTranslator, Settings};
use formwork_forms::prelude::*;
use formwork_forms::validators::date::{DATE_INVALID, DATE_TOO_LOW};
use formwork_session::{FileSessionStore, InMemorySessionStore, SessionStore};

// ============================================================================
// Shared helpers
// ============================================================================

fn memory_store() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}

fn day(year: i32, month: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// A registration form with text, email, date, number, group and buttons.
fn make_signup_form(store: Arc<dyn SessionStore>) -> Form {
    Form::new("signup", store)
        .with_success_url("/welcome")
        .with_error_url("/signup")
        .with_field(Text::new("name").label("Name"))
        .unwrap()
        .with_field(Text::email("email").label("E-mail"))
        .unwrap()
        .with_field(
            Date::date("born")
                .label("Born")
                .required(false)
                .with_min(day(1900, 1, 1)),
        )
        .unwrap()
        .with_field(Number::new("age").label("Age").required(false).with_min(18.0))
        .unwrap()
        .with_field(
            FieldsGroup::radio("plan")
                .label("Plan")
                .option("free", "Free")
                .option("pro", "Pro"),
        )
        .unwrap()
        .with_field(Hidden::new("ref").value("home"))
        .unwrap()
        .with_field(SubmitButton::new("send"))
        .unwrap()
        .with_field(ResetInput::new("clear"))
        .unwrap()
}

fn valid_params() -> RequestParams {
    RequestParams::from_pairs(vec![
        ("name", "Ann"),
        ("email", "ann@example.com"),
        ("born", "1990-05-01"),
        ("age", "34"),
        ("plan", "pro"),
        ("ref", "newsletter"),
        ("send", "Submit"),
    ])
}

fn messages(errors: &[FormError]) -> Vec<String> {
    errors.iter().map(|e| e.message.clone()).collect()
}

// ============================================================================
// Category 1: Field submission rules
// ============================================================================

#[test]
fn test_values_have_one_entry_per_non_action_field() {
    let mut form = make_signup_form(memory_store());
    assert_eq!(form.submit(&valid_params()).unwrap(), FormResult::Success);
    let values = form.values().unwrap();
    // 8 fields minus the submit and reset buttons
    assert_eq!(values.len(), 6);
    assert!(!values.contains_key("send"));
    assert!(!values.contains_key("clear"));
    assert_eq!(values["plan"], Value::from("pro"));
    assert_eq!(values["ref"], Value::from("newsletter"));
}

#[test]
fn test_missing_optional_field_is_stored_as_empty_string() {
    let mut form = make_signup_form(memory_store());
    let params = RequestParams::from_pairs(vec![
        ("name", "Ann"),
        ("email", "ann@example.com"),
        ("plan", "free"),
    ]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Success);
    let values = form.values().unwrap();
    assert_eq!(values["born"], Value::from(""));
    assert_eq!(values["age"], Value::from(""));
    assert!(form.field("born").unwrap().core().errors.is_empty());
}

#[test]
fn test_required_empty_gives_exactly_one_error() {
    let mut form = make_signup_form(memory_store());
    let params = RequestParams::from_pairs(vec![
        ("name", "   "),
        ("email", "ann@example.com"),
        ("plan", "free"),
    ]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(
        messages(form.errors().unwrap()),
        vec!["Field `Name` is required.".to_string()]
    );
}

#[test]
fn test_failed_validator_suppresses_required_error() {
    let mut form = make_signup_form(memory_store());
    let params = RequestParams::from_pairs(vec![
        ("name", "Ann"),
        ("email", "not an email"),
        ("plan", "free"),
    ]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    let errors = form.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].fields, vec!["email".to_string()]);
    assert!(!errors[0].message.contains("is required"));
}

#[test]
fn test_read_only_and_disabled_keep_their_values() {
    let mut form = Form::new("profile", memory_store())
        .with_field(Text::new("login").read_only(true).value("ann"))
        .unwrap()
        .with_field(Text::new("plan").disabled(true).value("pro"))
        .unwrap()
        .with_field(Text::new("bio").required(false))
        .unwrap();
    let params = RequestParams::from_pairs(vec![
        ("login", "mallory"),
        ("plan", "enterprise"),
        ("bio", "hi"),
    ]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Success);
    let values = form.values().unwrap();
    assert_eq!(values["login"], Value::from("ann"));
    assert_eq!(values["plan"], Value::from("pro"));
    assert_eq!(values["bio"], Value::from("hi"));
}

#[test]
fn test_required_checkbox_left_unchecked() {
    let mut form = Form::new("terms", memory_store())
        .with_field(Text::new("name").label("Name"))
        .unwrap()
        .with_field(Checkbox::new("agree").label("Agree").required(true))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("name", "x")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(
        messages(form.errors().unwrap()),
        vec!["Field `Agree` is required.".to_string()]
    );
    assert_eq!(form.values().unwrap()["agree"], Value::Bool(false));
}

#[test]
fn test_optional_checkbox_left_unchecked() {
    let mut form = Form::new("terms", memory_store())
        .with_field(Checkbox::new("news").label("News").required(false))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("other", "x")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Success);
    assert_eq!(form.values().unwrap()["news"], Value::Bool(false));
}

// ============================================================================
// Category 2: Date and number validation
// ============================================================================

#[test]
fn test_date_parses_to_midnight() {
    let mut form = make_signup_form(memory_store());
    let mut params = valid_params();
    params.insert("born", "2024-03-15");
    form.submit(&params).unwrap();
    assert!(form.errors().unwrap().is_empty());
    assert_eq!(
        form.values().unwrap()["born"],
        Value::DateTime(day(2024, 3, 15))
    );
}

#[test]
fn test_date_below_minimum_keeps_parsed_value() {
    let mut form = Form::new("event", memory_store())
        .with_field(Date::date("on").label("On").with_min(day(2024, 1, 1)))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("on", "2023-12-31")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(
        form.values().unwrap()["on"],
        Value::DateTime(day(2023, 12, 31))
    );
    let expected = DATE_TOO_LOW.replace("{0}", "On").replace("{1}", "2024-01-01");
    assert_eq!(messages(form.errors().unwrap()), vec![expected]);
}

#[test]
fn test_date_in_wrong_format() {
    let mut form = Form::new("event", memory_store())
        .with_field(Date::date("on").label("On"))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("on", "15/03/2024")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(form.values().unwrap()["on"], Value::from(""));
    let expected = DATE_INVALID.replace("{0}", "On").replace("{1}", "Y-m-d");
    assert_eq!(messages(form.errors().unwrap()), vec![expected]);
}

#[test]
fn test_blank_optional_date_is_invalid() {
    let mut form = Form::new("event", memory_store())
        .with_field(Date::date("born").label("Born").required(false))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("born", "")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    let expected = DATE_INVALID.replace("{0}", "Born").replace("{1}", "Y-m-d");
    assert_eq!(messages(form.errors().unwrap()), vec![expected]);
}

#[test]
fn test_number_below_minimum() {
    let mut form = make_signup_form(memory_store());
    let mut params = valid_params();
    params.insert("age", "12");
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    let errors = form.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].concerns("age"));
}

#[test]
fn test_radio_value_outside_options() {
    let mut form = make_signup_form(memory_store());
    let mut params = valid_params();
    params.insert("plan", "platinum");
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert!(form.errors().unwrap()[0].concerns("plan"));
}

// ============================================================================
// Category 3: Post-redirect-get
// ============================================================================

fn post_redirect_get(store: &Arc<dyn SessionStore>) {
    // POST: invalid submission is persisted
    let mut posted = make_signup_form(Arc::clone(store));
    let mut params = valid_params();
    params.insert("name", "");
    params.insert("age", "abc");
    assert_eq!(posted.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(posted.redirect_url(), Some("/signup"));
    let values = posted.values().unwrap().clone();
    let errors = posted.errors().unwrap().to_vec();
    assert_eq!(errors.len(), 2);

    // GET: a fresh form with the same id sees the same record
    let mut fresh = make_signup_form(Arc::clone(store));
    assert_eq!(fresh.values().unwrap(), &values);
    assert_eq!(fresh.errors().unwrap(), errors.as_slice());

    fresh.pre_dispatch().unwrap();
    assert_eq!(fresh.field("email").unwrap().core().value, Value::from("ann@example.com"));
    assert_eq!(fresh.field("name").unwrap().core().errors.len(), 1);
    let html = fresh.render_field("email").unwrap();
    assert!(html.contains(r#"value="ann@example.com""#));
    assert!(fresh.render_errors().contains("Field `Name` is required."));

    // POST again: success, the caller clears the record
    let mut retried = make_signup_form(Arc::clone(store));
    assert_eq!(retried.submit(&valid_params()).unwrap(), FormResult::Success);
    assert_eq!(retried.redirect_url(), Some("/welcome"));
    retried.clear_session().unwrap();

    let mut after = make_signup_form(Arc::clone(store));
    assert!(after.values().unwrap().is_empty());
    assert!(after.errors().unwrap().is_empty());
}

#[test]
fn test_post_redirect_get_in_memory() {
    post_redirect_get(&memory_store());
}

#[test]
fn test_post_redirect_get_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(dir.path()));
    post_redirect_get(&store);
}

#[test]
fn test_dates_survive_the_session() {
    let store = memory_store();
    let mut form = make_signup_form(Arc::clone(&store));
    let mut params = valid_params();
    params.insert("name", "");
    form.submit(&params).unwrap();

    let mut fresh = make_signup_form(store);
    assert_eq!(
        fresh.values().unwrap()["born"],
        Value::DateTime(day(1990, 5, 1))
    );
    fresh.pre_dispatch().unwrap();
    assert!(fresh
        .render_field("born")
        .unwrap()
        .contains(r#"value="1990-05-01""#));
}

#[test]
fn test_csrf_token_round_trip() {
    let store = memory_store();
    let mut get = Form::new("login", Arc::clone(&store))
        .with_csrf(true)
        .with_field(Text::new("user"))
        .unwrap();
    let hidden = get.render_csrf().unwrap();
    let token = store.load("formwork.form.login").unwrap().csrf[0].clone();
    assert!(hidden.contains(&token.name));

    let mut post = Form::new("login", Arc::clone(&store))
        .with_csrf(true)
        .with_field(Text::new("user"))
        .unwrap();
    let params = RequestParams::from_pairs(vec![
        ("user", "ann"),
        (token.name.as_str(), token.value.as_str()),
    ]);
    assert_eq!(post.submit(&params).unwrap(), FormResult::Success);

    let mut forged = Form::new("login", store)
        .with_csrf(true)
        .with_field(Text::new("user"))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("user", "ann"), (token.name.as_str(), "forged")]);
    assert_eq!(forged.submit(&params).unwrap(), FormResult::Error);
    assert!(forged.csrf_failed());
}

// ============================================================================
// Category 4: Results, groups, custom validators and settings
// ============================================================================

#[test]
fn test_multi_step_buttons() {
    let build = || {
        Form::new("wizard", memory_store())
            .with_next_step_url("/wizard/3")
            .with_prev_step_url("/wizard/1")
            .with_field(Text::new("step2"))
            .unwrap()
            .with_field(SubmitButton::new("prev").with_result_state(FormResult::SuccessPrevStep))
            .unwrap()
            .with_field(SubmitButton::new("next").with_result_state(FormResult::SuccessNextStep))
            .unwrap()
    };

    let mut form = build();
    let params = RequestParams::from_pairs(vec![("step2", "x"), ("prev", "Back")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::SuccessPrevStep);
    assert_eq!(form.redirect_url(), Some("/wizard/1"));

    let mut form = build();
    let params = RequestParams::from_pairs(vec![("step2", "x"), ("next", "Next")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::SuccessNextStep);
    assert_eq!(form.redirect_url(), Some("/wizard/3"));

    let mut form = build();
    let params = RequestParams::from_pairs(vec![("next", "Next")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
}

#[test]
fn test_checkbox_group_collects_keys() {
    let mut form = Form::new("prefs", memory_store())
        .with_field(
            FieldsGroup::checkboxes("topics")
                .option("rust", "Rust")
                .option("go", "Go")
                .option("zig", "Zig"),
        )
        .unwrap();
    let params = RequestParams::parse("topics%5B%5D=rust&topics%5B%5D=zig");
    assert_eq!(form.submit(&params).unwrap(), FormResult::Success);
    assert_eq!(
        form.values().unwrap()["topics"],
        Value::from(vec!["rust".to_string(), "zig".to_string()])
    );

    let params = RequestParams::parse("topics%5B%5D=rust&topics%5B%5D=cobol");
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(
        form.values().unwrap()["topics"],
        Value::from(vec!["rust".to_string()])
    );
    assert_eq!(form.errors().unwrap().len(), 1);
}

#[test]
fn test_closure_validator_registers_error() {
    let mut form = Form::new("account", memory_store())
        .with_field(Text::new("username").label("Username").validator(
            ClosureValidator::new("NotAdmin", |value, ctx| {
                if value.as_str() == Some("admin") {
                    ctx.add_error("Field '{0}' cannot be '{1}'.", &["admin".to_string()]);
                }
                value
            }),
        ))
        .unwrap();
    let params = RequestParams::from_pairs(vec![("username", "admin")]);
    assert_eq!(form.submit(&params).unwrap(), FormResult::Error);
    assert_eq!(
        messages(form.errors().unwrap()),
        vec!["Field 'Username' cannot be 'admin'.".to_string()]
    );
}

#[test]
fn test_settings_and_translation() {
    let mut settings = Settings::default();
    settings.default_required = false;
    settings.html_ids_delimiter = "-".to_string();
    settings.language_code = "cs".to_string();
    settings
        .error_messages
        .insert("empty_content".into(), "Nothing was sent.".into());
    let catalog = CatalogTranslator::for_settings(&settings).with_messages(vec![
        ("Nothing was sent.", "Nic nebylo odesláno."),
        ("Name", "Jméno"),
    ]);
    assert_eq!(catalog.language(), "cs");

    let mut form = Form::new("cz", memory_store())
        .with_settings(settings)
        .with_translator(Arc::new(catalog))
        .with_field(Text::new("name").label("Name"))
        .unwrap();
    assert_eq!(
        form.field("name").unwrap().core().id.as_deref(),
        Some("cz-name")
    );
    assert!(!form.field("name").unwrap().core().is_required());

    assert_eq!(form.submit(&RequestParams::new()).unwrap(), FormResult::Error);
    assert_eq!(
        messages(form.errors().unwrap()),
        vec!["Nic nebylo odesláno.".to_string()]
    );

    let mut fresh = Form::new("cz", memory_store())
        .with_translator(Arc::new(
            CatalogTranslator::new("cs").with_messages(vec![("Name", "Jméno")]),
        ))
        .with_field(Text::new("name").label("Name"))
        .unwrap();
    fresh.pre_dispatch().unwrap();
    assert!(fresh.render_field("name").unwrap().contains(">Jméno</label>"));
}

#[test]
fn test_set_values_feeds_fields() {
    let mut form = make_signup_form(memory_store());
    let mut defaults = HashMap::new();
    defaults.insert("name".to_string(), Value::from("Guest"));
    form.set_values(defaults);
    assert_eq!(form.field("name").unwrap().core().value, Value::from("Guest"));
    form.pre_dispatch().unwrap();
    assert!(form.render_field("name").unwrap().contains(r#"value="Guest""#));
}

#[test]
fn test_registry_drives_submission() {
    let store = memory_store();
    let mut registry = FormRegistry::new();
    registry.insert(make_signup_form(Arc::clone(&store))).unwrap();
    registry.set_auto_focus("signup", "email").unwrap();
    assert_eq!(
        registry.submit("signup", &valid_params()).unwrap(),
        FormResult::Success
    );
    let form = registry.get("signup").unwrap();
    assert!(form.field("email").unwrap().core().auto_focus);
    assert!(form.render_field("email").unwrap().contains(r#"autofocus="autofocus""#));
}
