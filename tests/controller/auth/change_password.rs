use compost::{
    model::auth::ChangePasswordForm,
    server::{
        controller::auth::change_password, data::account::AccountRepository,
        util::password::verify_password,
    },
};

use super::*;

fn change_form(old: &str) -> ChangePasswordForm {
    ChangePasswordForm {
        old_password: old.to_string(),
        new_password1: "newpassword123".to_string(),
        new_password2: "newpassword123".to_string(),
    }
}

#[tokio::test]
/// Expect 303 home with a flash message and the new password stored
async fn changes_password_for_logged_in_account() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    SessionAccountId::insert(&test.session, 1).await.unwrap();

    let result = change_password(
        State(test.into_app_state()),
        test.session.clone(),
        Form(change_form(TEST_PASSWORD)),
    )
    .await;

    assert!(result.is_ok());
    assert_redirect(&result.unwrap().into_response(), "/");

    let messages = flash_messages(&test).await;
    assert_eq!(messages[0].message, "Password change successful");
    assert_eq!(SessionAccountId::get(&test.session).await.unwrap(), Some(1));

    let account = AccountRepository::new(&test.db).get(1).await?.unwrap();
    assert!(verify_password("newpassword123", &account.password_hash).unwrap());
    assert!(!verify_password(TEST_PASSWORD, &account.password_hash).unwrap());

    Ok(())
}

#[tokio::test]
/// Expect 400 for a wrong old password
async fn returns_bad_request_for_wrong_old_password() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    SessionAccountId::insert(&test.session, 1).await.unwrap();

    let result = change_password(
        State(test.into_app_state()),
        test.session.clone(),
        Form(change_form("wrongpassword")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorDto = json_body(resp).await;
    assert!(body.fields.contains_key("old_password"));

    Ok(())
}

#[tokio::test]
/// Expect 401 when not logged in
async fn returns_unauthorized_without_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;

    let result = change_password(
        State(test.into_app_state()),
        test.session.clone(),
        Form(change_form(TEST_PASSWORD)),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorDto = json_body(resp).await;
    assert_eq!(body.error, "Authentication required");

    Ok(())
}

#[tokio::test]
/// Expect 401 and a flushed session when the account no longer exists
async fn flushes_stale_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;
    SessionAccountId::insert(&test.session, 42).await.unwrap();

    let result = change_password(
        State(test.into_app_state()),
        test.session.clone(),
        Form(change_form(TEST_PASSWORD)),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(SessionAccountId::get(&test.session).await.unwrap().is_none());

    Ok(())
}
