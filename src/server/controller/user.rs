use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        user::{AvatarUpload, ProfileDto, ProfileUpdateForm, UpdateProfileMultipart},
    },
    server::{
        controller::util::get_account::get_account_from_session,
        error::{auth::AuthError, Error},
        model::{
            app::AppState,
            session::flash::{FlashLevel, SessionFlash},
        },
        service::profile::ProfileService,
    },
};

pub static USER_TAG: &str = "user";

pub const PROFILE_UPDATED_MESSAGE: &str = "Profile update successful";

/// Get the profile of the logged-in account
///
/// # Responses
/// - 200 (Success): Account identity together with bio and avatar path
/// - 401 (Unauthorized): Not logged in
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Success when retrieving the profile", body = ProfileDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let account = get_account_from_session(&state, &session).await?;

    let Some(profile) = ProfileService::new(&state.db, &state.media, &state.events)
        .get_profile(account.id)
        .await?
    else {
        return Err(AuthError::AccountNotInDatabase(account.id).into());
    };

    Ok((StatusCode::OK, Json(profile)))
}

/// Update username, email, bio and optionally the avatar of the logged-in account
///
/// An uploaded avatar larger than 100x100 pixels is scaled down to fit before it is stored.
///
/// # Responses
/// - 303 (See Other): Profile saved, redirect to the profile page with a success message
/// - 400 (Bad Request): Form is invalid or the avatar is not a readable image
/// - 401 (Unauthorized): Not logged in
/// - 500 (Internal Server Error): Database, media or session error
#[utoipa::path(
    post,
    path = "/api/user/profile",
    tag = USER_TAG,
    request_body(content = UpdateProfileMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Profile saved"),
        (status = 400, description = "Form is invalid", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let account = get_account_from_session(&state, &session).await?;

    let form = read_profile_form(multipart).await?;

    ProfileService::new(&state.db, &state.media, &state.events)
        .update_profile(account.id, form)
        .await?;

    SessionFlash::push(&session, FlashLevel::Success, PROFILE_UPDATED_MESSAGE).await?;

    Ok(Redirect::to("/profile"))
}

/// Collects the profile form fields from a multipart body.
///
/// Unknown fields are ignored. Browsers submit an empty, unnamed file part when no avatar was
/// chosen, which is treated as no upload.
async fn read_profile_form(mut multipart: Multipart) -> Result<ProfileUpdateForm, Error> {
    let mut form = ProfileUpdateForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "username" => form.username = field.text().await?,
            "email" => form.email = field.text().await?,
            "bio" => form.bio = field.text().await?,
            "avatar" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;

                if !(file_name.is_empty() && bytes.is_empty()) {
                    form.avatar = Some(AvatarUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
