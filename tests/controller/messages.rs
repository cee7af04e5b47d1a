use compost::server::{
    controller::messages::get_messages,
    model::session::flash::{FlashLevel, SessionFlash},
};

use super::*;

#[tokio::test]
/// Expect queued messages once, then an empty list
async fn drains_flash_messages() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    SessionFlash::push(&test.session, FlashLevel::Success, "Profile update successful")
        .await
        .unwrap();

    let resp = get_messages(test.session.clone())
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let messages: Vec<FlashMessageDto> = json_body(resp).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, "success");
    assert_eq!(messages[0].message, "Profile update successful");

    let resp = get_messages(test.session.clone())
        .await
        .unwrap()
        .into_response();
    let messages: Vec<FlashMessageDto> = json_body(resp).await;
    assert!(messages.is_empty());

    Ok(())
}
