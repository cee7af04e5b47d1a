use compost::{model::user::ProfileDto, server::controller::user::get_profile};

use super::*;

#[tokio::test]
/// Expect 200 with the profile of the logged-in account
async fn returns_profile_for_logged_in_account() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    SessionAccountId::insert(&test.session, 1).await.unwrap();

    let result = get_profile(State(test.into_app_state()), test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let profile: ProfileDto = json_body(resp).await;
    assert_eq!(profile.user.username, TEST_USERNAME);
    assert_eq!(profile.bio, "");
    assert_eq!(profile.avatar, DEFAULT_AVATAR_PATH);

    Ok(())
}

#[tokio::test]
/// Expect 401 when not logged in
async fn returns_unauthorized_without_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;

    let result = get_profile(State(test.into_app_state()), test.session.clone()).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
