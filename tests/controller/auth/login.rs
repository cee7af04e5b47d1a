use compost::{
    model::auth::LoginForm,
    server::{
        controller::auth::login,
        model::session::expiry::{SessionLoginExpiry, REMEMBER_ME_AGE_SECS},
    },
};

use super::*;

fn login_form(password: &str, remember_me: bool) -> LoginForm {
    LoginForm {
        username: TEST_USERNAME.to_string(),
        password: password.to_string(),
        remember_me,
    }
}

#[tokio::test]
/// Expect 303 home with the account in session and a browser-session expiry
async fn logs_in_without_remember_me() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Form(login_form(TEST_PASSWORD, false)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_redirect(&resp, "/");

    assert_eq!(SessionAccountId::get(&test.session).await.unwrap(), Some(1));
    assert_eq!(SessionLoginExpiry::age_secs(&test.session), 0);

    Ok(())
}

#[tokio::test]
/// Expect a two week session when remember me is checked
async fn logs_in_with_remember_me() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Form(login_form(TEST_PASSWORD, true)),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(
        SessionLoginExpiry::age_secs(&test.session),
        REMEMBER_ME_AGE_SECS
    );
    assert_eq!(REMEMBER_ME_AGE_SECS, 1_209_600);

    Ok(())
}

#[tokio::test]
/// Expect 401 with the generic login message for a wrong password
async fn returns_unauthorized_for_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Form(login_form("wrongpassword", false)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorDto = json_body(resp).await;
    assert_eq!(
        body.error,
        "Please enter a correct username and password. Note that both fields may be case-sensitive."
    );

    assert!(SessionAccountId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect 400 when username and password are missing
async fn returns_bad_request_for_empty_form() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Form(LoginForm::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorDto = json_body(resp).await;
    assert!(body.fields.contains_key("username"));
    assert!(body.fields.contains_key("password"));

    Ok(())
}
