//! Signup wizard submission against a mock backend

mod common;

use common::TestApp;
use faqdesk_client::{ApiError, SignupForm, SignupStep, SignupWizard};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn filled_wizard() -> SignupWizard {
    SignupWizard::with_form(SignupForm {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        password: "s3cret!".to_string(),
        confirm_password: "s3cret!".to_string(),
        mobile: "9876543210".to_string(),
        website: "https://shop.example.com".to_string(),
        business_type: "retail".to_string(),
        location: "Pune".to_string(),
        pan: "ABCDE1234F".to_string(),
        tan: String::new(),
    })
}

#[tokio::test]
async fn test_signup_posts_full_payload_without_signing_in() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_json(json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "password": "s3cret!",
            "confirm_password": "s3cret!",
            "mobile": "9876543210",
            "website": "https://shop.example.com",
            "business_type": "retail",
            "location": "Pune",
            "pan": "ABCDE1234F",
            "tan": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "client-1"})))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut wizard = filled_wizard();
    assert_eq!(wizard.next().unwrap(), SignupStep::Business);
    assert_eq!(wizard.next().unwrap(), SignupStep::Compliance);

    let request = wizard.submit().unwrap();
    let created = app.api.signup(&request).await.unwrap();

    assert_eq!(created["id"], "client-1");
    app.assert_signed_out();
}

#[tokio::test]
async fn test_signup_rejection_surfaces_detail() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&app.server)
        .await;

    let request = filled_wizard().submit().unwrap();
    let err = app.api.signup(&request).await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 400, .. }));
    assert_eq!(err.to_string(), "Email already registered");
}

#[tokio::test]
async fn test_signup_rejection_without_detail_uses_fallback() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({})))
        .mount(&app.server)
        .await;

    let request = filled_wizard().submit().unwrap();
    let err = app.api.signup(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Signup failed: 422");
}
