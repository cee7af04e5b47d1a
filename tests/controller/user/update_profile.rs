use axum::Router;
use compost::server::data::account::AccountRepository;
use image::ImageFormat;
use tower::ServiceExt;

use crate::util::http::{
    form_request, get_request, location, multipart_request, session_cookie, Part,
};

use super::*;

/// Logs in through the router and returns the session cookie
async fn login_cookie(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(form_request(
            "/api/auth/login",
            &format!("username={}&password={}", TEST_USERNAME, TEST_PASSWORD),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    session_cookie(&resp).expect("login sets a session cookie")
}

#[tokio::test]
/// Expect an oversized upload to be stored within 100x100 and the profile updated
async fn stores_resized_avatar() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    let app = test.into_router();
    let cookie = login_cookie(&app).await;
    let avatar = factory::solid_image(200, 200, ImageFormat::Png)?;

    let resp = app
        .clone()
        .oneshot(multipart_request(
            "/api/user/profile",
            &[
                Part::Text("username", TEST_USERNAME),
                Part::Text("email", TEST_EMAIL),
                Part::Text("bio", "Vermicomposting since 2019"),
                Part::File {
                    name: "avatar",
                    file_name: "test_avatar.png",
                    content_type: "image/png",
                    bytes: &avatar,
                },
            ],
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/profile"));

    let (width, height) = test
        .media()
        .image_dimensions("profile_images/test_avatar.png")
        .await?;
    assert!(width <= 100 && height <= 100);

    let resp = app
        .clone()
        .oneshot(get_request("/api/user/profile", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: compost::model::user::ProfileDto = json_body(resp).await;
    assert_eq!(profile.avatar, "profile_images/test_avatar.png");
    assert_eq!(profile.bio, "Vermicomposting since 2019");

    let resp = app
        .oneshot(get_request("/api/messages", Some(&cookie)))
        .await
        .unwrap();
    let messages: Vec<FlashMessageDto> = json_body(resp).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message, "Profile update successful");

    Ok(())
}

#[tokio::test]
/// Expect an empty file part to keep the current avatar
async fn keeps_avatar_without_upload() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    let app = test.into_router();
    let cookie = login_cookie(&app).await;

    let resp = app
        .oneshot(multipart_request(
            "/api/user/profile",
            &[
                Part::Text("username", "renamed"),
                Part::Text("email", TEST_EMAIL),
                Part::Text("bio", ""),
                Part::File {
                    name: "avatar",
                    file_name: "",
                    content_type: "application/octet-stream",
                    bytes: b"",
                },
            ],
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let account = AccountRepository::new(&test.db).get(1).await?.unwrap();
    assert_eq!(account.username, "renamed");
    assert!(test.media().list_dir("profile_images")?.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect 400 with an avatar error and nothing written for a corrupt upload
async fn rejects_corrupt_avatar() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_account(TEST_USERNAME, TEST_EMAIL, TEST_PASSWORD)
        .build()
        .await?;
    let app = test.into_router();
    let cookie = login_cookie(&app).await;

    let resp = app
        .oneshot(multipart_request(
            "/api/user/profile",
            &[
                Part::Text("username", "renamed"),
                Part::Text("email", TEST_EMAIL),
                Part::Text("bio", "new bio"),
                Part::File {
                    name: "avatar",
                    file_name: "test_avatar.png",
                    content_type: "image/png",
                    bytes: b"not an image at all",
                },
            ],
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorDto = json_body(resp).await;
    assert!(body.fields.contains_key("avatar"));

    assert!(test.media().list_dir("profile_images")?.is_empty());
    let account = AccountRepository::new(&test.db).get(1).await?.unwrap();
    assert_eq!(account.username, TEST_USERNAME);

    Ok(())
}

#[tokio::test]
/// Expect 401 when not logged in
async fn returns_unauthorized_without_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_account_tables().build().await?;
    let app = test.into_router();

    let resp = app
        .oneshot(multipart_request(
            "/api/user/profile",
            &[Part::Text("username", TEST_USERNAME)],
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
