//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Each endpoint is annotated with OpenAPI specifications via utoipa, which are collected into
/// a unified OpenAPI document served at `/api/docs/openapi.json`.
///
/// # Registered Endpoints
/// - `POST /api/auth/register` - Register a new account
/// - `POST /api/auth/login` - Log in with username and password
/// - `GET /api/auth/logout` - Log out the current account
/// - `POST /api/auth/password/change` - Change the password of the current account
/// - `POST /api/auth/password/reset` - Email a password reset link
/// - `POST /api/auth/password/reset/confirm` - Set a new password with a reset token
/// - `GET /api/user/profile` - Get the profile of the current account
/// - `POST /api/user/profile` - Update the profile of the current account
/// - `GET /api/messages` - Drain queued flash messages
///
/// # Returns
/// An Axum `Router<AppState>` ready to be given state and the session layer.
///
/// # Example
/// ```ignore
/// let state = AppState::new(db, media, Arc::new(ConsoleMailer), config.site);
/// let router = routes().with_state(state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Compost", description = "Compost accounts API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Registration, login and password routes"),
        (name = controller::user::USER_TAG, description = "Profile routes"),
        (name = controller::messages::MESSAGES_TAG, description = "Flash message routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::change_password))
        .routes(routes!(controller::auth::password_reset))
        .routes(routes!(controller::auth::password_reset_confirm))
        .routes(routes!(controller::user::get_profile, controller::user::update_profile))
        .routes(routes!(controller::messages::get_messages))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
