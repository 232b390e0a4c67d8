use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::components::result_card::result_rows;
use crate::net::http::AUTHORIZATION;
use crate::net::mock::{MockTransport, client_with};

fn form(dish: &str, servings: &str) -> CalorieForm {
    CalorieForm { dish_name: dish.to_owned(), servings: servings.to_owned() }
}

fn idli() -> CalorieResult {
    CalorieResult {
        dish_name: "Idli".to_owned(),
        servings: 3.0,
        calories_per_serving: 58.3,
        total_calories: 174.9,
        source: Some("USDA FoodData Central".to_owned()),
        fdc_id: None,
        ingredient_breakdown: None,
    }
}

// =============================================================
// LookupState
// =============================================================

#[test]
fn form_defaults_to_one_serving() {
    assert_eq!(CalorieForm::default(), form("", "1"));
    assert_eq!(LookupState::default().result, None);
}

#[test]
fn reset_clears_form_errors_and_result() {
    let mut page = LookupState {
        form: form("Idli", "4"),
        errors: CalorieErrors { dish_name: None, servings: Some(SERVINGS_NOT_POSITIVE) },
        result: Some(idli()),
    };
    page.reset();
    assert_eq!(page.form, form("", "1"));
    assert!(page.errors.is_empty());
    assert_eq!(page.result, None);
}

#[test]
fn reset_after_successful_lookup_hides_result() {
    let (client, session, _) = client_with(MockTransport::replying(200, serde_json::to_value(idli()).unwrap()));
    session.set_token(Some("abc".to_owned()));
    let mut page = LookupState { form: form("Idli", "3"), ..LookupState::default() };
    let query = validate_query(&page.form).unwrap();
    page.result = Some(block_on(submit_query(&client, query)).unwrap());
    assert_eq!(page.result, Some(idli()));

    page.reset();
    assert_eq!(page, LookupState::default());
}

// =============================================================
// validate_query
// =============================================================

#[test]
fn zero_servings_is_rejected() {
    let errors = validate_query(&form("Idli", "0")).unwrap_err();
    assert_eq!(errors.servings, Some(SERVINGS_NOT_POSITIVE));
    assert_eq!(errors.dish_name, None);
}

#[test]
fn negative_servings_is_rejected() {
    assert_eq!(validate_query(&form("Idli", "-2")).unwrap_err().servings, Some(SERVINGS_NOT_POSITIVE));
}

#[test]
fn non_integer_servings_is_rejected() {
    for raw in ["", "1.5", "two", "99999999999"] {
        assert_eq!(validate_query(&form("Idli", raw)).unwrap_err().servings, Some(SERVINGS_NOT_WHOLE), "{raw}");
    }
}

#[test]
fn blank_dish_is_rejected() {
    let errors = validate_query(&form("   ", "2")).unwrap_err();
    assert_eq!(errors, CalorieErrors { dish_name: Some(DISH_REQUIRED), servings: None });
}

#[test]
fn valid_query_is_trimmed() {
    assert_eq!(
        validate_query(&form(" Idli ", " 3 ")),
        Ok(CalorieQuery { dish_name: "Idli".to_owned(), servings: 3 })
    );
}

// =============================================================
// submit_query
// =============================================================

#[test]
fn zero_servings_never_reaches_network() {
    let mock = MockTransport::replying(200, json!({}));
    let (client, _, _) = client_with(mock.clone());
    if let Ok(query) = validate_query(&form("Idli", "0")) {
        let _ = block_on(submit_query(&client, query));
    }
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn successful_lookup_is_rendered_verbatim() {
    let mock = MockTransport::replying(
        200,
        json!({
            "dish_name": "Idli",
            "servings": 3,
            "calories_per_serving": 58.3,
            "total_calories": 174.9,
            "source": "USDA FoodData Central"
        }),
    );
    let (client, session, _) = client_with(mock.clone());
    session.set_token(Some("abc".to_owned()));
    let query = validate_query(&form("Idli", "3")).unwrap();
    let result = block_on(submit_query(&client, query)).unwrap();

    let values: Vec<String> = result_rows(&result).into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec!["Idli", "3", "58.3", "174.9", "USDA FoodData Central"]);
    assert_eq!(mock.requests()[0].header(AUTHORIZATION), Some("Bearer abc"));
    assert_eq!(mock.requests()[0].body, Some(json!({"dish_name": "Idli", "servings": 3})));
}

#[test]
fn network_failure_redirects_to_login() {
    let (client, session, _) = client_with(MockTransport::failing("offline"));
    session.set_token(Some("still-valid".to_owned()));
    let query = validate_query(&form("Idli", "3")).unwrap();
    let failure = block_on(submit_query(&client, query)).unwrap_err();
    assert_eq!(failure, CalorieFailure { message: CALORIES_FAILED.to_owned(), redirect_to: "/login" });
    assert_eq!(session.token().as_deref(), Some("still-valid"));
}

#[test]
fn unknown_dish_redirects_to_login_with_detail() {
    let (client, _, _) = client_with(MockTransport::replying(
        404,
        json!({"detail": "Dish not found or nutrition info unavailable"}),
    ));
    let query = validate_query(&form("zzz", "1")).unwrap();
    let failure = block_on(submit_query(&client, query)).unwrap_err();
    assert_eq!(failure.message, "Dish not found or nutrition info unavailable");
    assert_eq!(failure.redirect_to, "/login");
}

#[test]
fn expired_token_redirects_to_login() {
    let (client, _, _) = client_with(MockTransport::replying(401, json!({"detail": "Invalid or expired token"})));
    let query = validate_query(&form("Idli", "1")).unwrap();
    assert_eq!(block_on(submit_query(&client, query)).unwrap_err().redirect_to, "/login");
}

#[test]
fn malformed_result_redirects_to_login() {
    let (client, _, _) = client_with(MockTransport::replying(200, json!({"dish_name": "Idli"})));
    let query = validate_query(&form("Idli", "1")).unwrap();
    let failure = block_on(submit_query(&client, query)).unwrap_err();
    assert_eq!(failure.message, CALORIES_FAILED);
    assert_eq!(failure.redirect_to, "/login");
}
