//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with the test session where possible. Endpoints that need
//! the full request pipeline, such as multipart uploads, are driven through the router with
//! `tower::ServiceExt::oneshot`.

mod auth;
mod messages;
mod user;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use compost::{
    model::api::{ErrorDto, FlashMessageDto, ValidationErrorDto},
    server::model::session::{account::SessionAccountId, flash::SessionFlash},
};
use compost_test_utils::prelude::*;

use crate::util::{http::json_body, TestContextExt};

/// Asserts a `303 See Other` redirect to `target`
fn assert_redirect(resp: &Response, target: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(target)
    );
}

async fn flash_messages(test: &TestContext) -> Vec<FlashMessageDto> {
    SessionFlash::drain(&test.session).await.unwrap()
}
