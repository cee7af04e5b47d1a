use compost::{
    model::auth::{PasswordResetConfirmForm, PasswordResetForm},
    server::{
        controller::auth::{password_reset, password_reset_confirm},
        mail::MemoryMailer,
    },
};

use super::*;

fn reset_token(body: &str) -> String {
    let start = body.find("/reset/").unwrap() + "/reset/".len();

    body[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}

#[tokio::test]
/// Expect 303 home with one email sent to a known address
async fn emails_reset_link_to_known_address() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    let mailer = MemoryMailer::new();

    let result = password_reset(
        State(test.into_app_state_with_mailer(mailer.clone())),
        test.session.clone(),
        Form(PasswordResetForm {
            email: TEST_EMAIL.to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    assert_redirect(&result.unwrap().into_response(), "/");

    let outbox = mailer.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, vec![TEST_EMAIL.to_string()]);
    assert!(outbox[0].subject.contains("Password reset on Example.com"));

    let messages = flash_messages(&test).await;
    assert_eq!(
        messages[0].message,
        "Please check your email for instructions to reset your password."
    );

    Ok(())
}

#[tokio::test]
/// Expect the same redirect but no email for an unknown address
async fn sends_nothing_for_unknown_address() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;
    let mailer = MemoryMailer::new();

    let result = password_reset(
        State(test.into_app_state_with_mailer(mailer.clone())),
        test.session.clone(),
        Form(PasswordResetForm {
            email: "nobody@example.com".to_string(),
        }),
    )
    .await;

    assert_redirect(&result.unwrap().into_response(), "/");
    assert!(mailer.outbox().is_empty());

    Ok(())
}

#[tokio::test]
/// Expect the emailed token to reset the password exactly once
async fn confirms_reset_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    let mailer = MemoryMailer::new();
    let state = test.into_app_state_with_mailer(mailer.clone());

    password_reset(
        State(state.clone()),
        test.session.clone(),
        Form(PasswordResetForm {
            email: TEST_EMAIL.to_string(),
        }),
    )
    .await
    .unwrap();
    let token = reset_token(&mailer.outbox()[0].body);

    let form = PasswordResetConfirmForm {
        token,
        new_password1: "freshcompost1".to_string(),
        new_password2: "freshcompost1".to_string(),
    };

    let result = password_reset_confirm(
        State(state.clone()),
        test.session.clone(),
        Form(form.clone()),
    )
    .await;
    assert_redirect(&result.unwrap().into_response(), "/login");

    let result = password_reset_confirm(State(state), test.session.clone(), Form(form)).await;
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorDto = json_body(resp).await;
    assert!(body.fields.contains_key("token"));

    Ok(())
}
