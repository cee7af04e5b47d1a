use compost::server::controller::auth::logout;

use super::*;

#[tokio::test]
/// Expect 303 to login with the session flushed
async fn flushes_session_on_logout() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    SessionAccountId::insert(&test.session, 1).await.unwrap();

    let result = logout(test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_redirect(&resp, "/login");

    assert!(SessionAccountId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect 303 to login even when nobody is logged in
async fn redirects_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = logout(test.session.clone()).await;

    assert!(result.is_ok());
    assert_redirect(&result.unwrap().into_response(), "/login");

    Ok(())
}
