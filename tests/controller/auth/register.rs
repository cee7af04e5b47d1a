use compost::{model::auth::RegisterForm, server::controller::auth::register};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

fn register_form(password2: &str) -> RegisterForm {
    RegisterForm {
        username: TEST_USERNAME.to_string(),
        email: TEST_EMAIL.to_string(),
        password1: "testpass123".to_string(),
        password2: password2.to_string(),
    }
}

#[tokio::test]
/// Expect 303 to the login page with a flash message for a valid registration
async fn redirects_to_login_after_registration() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;

    let result = register(
        State(test.into_app_state()),
        test.session.clone(),
        Form(register_form("testpass123")),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_redirect(&resp, "/login");

    let messages = flash_messages(&test).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message, "Account created for testuser");

    assert_eq!(entity::prelude::Account::find().count(&test.db).await?, 1);
    assert_eq!(entity::prelude::Profile::find().count(&test.db).await?, 1);

    Ok(())
}

#[tokio::test]
/// Expect 400 with a password2 error and no account for mismatched passwords
async fn returns_bad_request_for_password_mismatch() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;

    let result = register(
        State(test.into_app_state()),
        test.session.clone(),
        Form(register_form("wrongpass")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ValidationErrorDto = json_body(resp).await;
    assert_eq!(body.error, "Please correct the errors below.");
    assert!(body.fields.contains_key("password2"));

    assert_eq!(entity::prelude::Account::find().count(&test.db).await?, 0);

    Ok(())
}

#[tokio::test]
/// Expect 303 to home without registering when already logged in
async fn redirects_home_when_logged_in() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account("existing", "existing@example.com", TEST_PASSWORD)
        .build()
        .await?;
    SessionAccountId::insert(&test.session, 1).await.unwrap();

    let result = register(
        State(test.into_app_state()),
        test.session.clone(),
        Form(register_form("testpass123")),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_redirect(&resp, "/");
    assert_eq!(entity::prelude::Account::find().count(&test.db).await?, 1);

    Ok(())
}
