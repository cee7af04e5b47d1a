use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        auth::{
            ChangePasswordForm, LoginForm, PasswordResetConfirmForm, PasswordResetForm,
            RegisterForm,
        },
    },
    server::{
        controller::util::get_account::get_account_from_session,
        error::{auth::AuthError, validation::ValidationError, Error},
        model::{
            app::AppState,
            session::{
                account::SessionAccountId,
                expiry::SessionLoginExpiry,
                flash::{FlashLevel, SessionFlash},
            },
        },
        service::{account::AccountService, password_reset::PasswordResetService},
        util::validation::REQUIRED_MESSAGE,
    },
};

pub static AUTH_TAG: &str = "auth";

pub const PASSWORD_CHANGED_MESSAGE: &str = "Password change successful";
pub const PASSWORD_RESET_SENT_MESSAGE: &str =
    "Please check your email for instructions to reset your password.";
pub const PASSWORD_RESET_COMPLETE_MESSAGE: &str = "Password reset complete";

/// Registers a new account
///
/// Callers that are already logged in are sent home without registering anything.
///
/// # Responses
/// - 303 (See Other): Account created, redirect to the login page with a success message
/// - 303 (See Other): Caller is already logged in, redirect to `/`
/// - 400 (Bad Request): Form is invalid, field errors are returned
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created or caller already logged in"),
        (status = 400, description = "Form is invalid", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, Error> {
    if SessionAccountId::get(&session).await?.is_some() {
        return Ok(Redirect::to("/"));
    }

    let account = AccountService::new(&state.db, &state.events)
        .register(&form)
        .await?;

    SessionFlash::push(
        &session,
        FlashLevel::Success,
        &format!("Account created for {}", account.username),
    )
    .await?;

    Ok(Redirect::to("/login"))
}

/// Logs in with a username and password
///
/// The session ID is cycled on success. With `remember_me` the session survives two weeks of
/// inactivity, otherwise it ends when the browser closes.
///
/// # Responses
/// - 303 (See Other): Logged in, redirect to `/`
/// - 400 (Bad Request): Username or password missing
/// - 401 (Unauthorized): Incorrect username or password
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in"),
        (status = 400, description = "Username or password missing", body = ValidationErrorDto),
        (status = 401, description = "Incorrect username or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, Error> {
    let mut errors = ValidationError::new();
    if form.username.is_empty() {
        errors.add("username", REQUIRED_MESSAGE);
    }
    if form.password.is_empty() {
        errors.add("password", REQUIRED_MESSAGE);
    }
    errors.into_result()?;

    let Some(account) = AccountService::new(&state.db, &state.events)
        .authenticate(&form.username, &form.password)
        .await?
    else {
        return Err(AuthError::InvalidCredentials.into());
    };

    session.cycle_id().await?;
    SessionAccountId::insert(&session, account.id).await?;
    SessionLoginExpiry::apply(&session, form.remember_me);

    tracing::debug!(account_id = account.id, remember_me = form.remember_me, "Logged in");

    Ok(Redirect::to("/"))
}

/// Logs the caller out by flushing their session
///
/// # Responses
/// - 303 (See Other): Logged out, redirect to the login page
/// - 500 (Internal Server Error): There was an issue flushing the session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Only flush when there is actually an account in session
    if SessionAccountId::get(&session).await?.is_some() {
        session.flush().await?;
    }

    Ok(Redirect::to("/login"))
}

/// Changes the password of the logged-in account
///
/// # Responses
/// - 303 (See Other): Password changed, redirect to `/` with a success message
/// - 400 (Bad Request): Old password wrong or new passwords invalid
/// - 401 (Unauthorized): Not logged in
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    post,
    path = "/api/auth/password/change",
    tag = AUTH_TAG,
    request_body(content = ChangePasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Password changed"),
        (status = 400, description = "Form is invalid", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChangePasswordForm>,
) -> Result<impl IntoResponse, Error> {
    let account = get_account_from_session(&state, &session).await?;

    AccountService::new(&state.db, &state.events)
        .change_password(account.id, &form)
        .await?;

    // Keep the caller logged in under a fresh session ID
    session.cycle_id().await?;
    SessionFlash::push(&session, FlashLevel::Success, PASSWORD_CHANGED_MESSAGE).await?;

    Ok(Redirect::to("/"))
}

/// Requests a password reset link by email
///
/// The response is the same whether or not an account uses the address.
///
/// # Responses
/// - 303 (See Other): Request handled, redirect to `/` with an info message
/// - 400 (Bad Request): Email missing or malformed
/// - 500 (Internal Server Error): Database, mail or session error
#[utoipa::path(
    post,
    path = "/api/auth/password/reset",
    tag = AUTH_TAG,
    request_body(content = PasswordResetForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Reset requested"),
        (status = 400, description = "Form is invalid", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn password_reset(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PasswordResetForm>,
) -> Result<impl IntoResponse, Error> {
    PasswordResetService::new(&state.db, &state.events, state.mailer.as_ref(), &state.site)
        .request_reset(&form)
        .await?;

    SessionFlash::push(&session, FlashLevel::Info, PASSWORD_RESET_SENT_MESSAGE).await?;

    Ok(Redirect::to("/"))
}

/// Sets a new password using the token from a reset email
///
/// # Responses
/// - 303 (See Other): Password reset, redirect to the login page with a success message
/// - 400 (Bad Request): Token invalid, used or expired, or new passwords invalid
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    post,
    path = "/api/auth/password/reset/confirm",
    tag = AUTH_TAG,
    request_body(
        content = PasswordResetConfirmForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Password reset"),
        (status = 400, description = "Form is invalid", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PasswordResetConfirmForm>,
) -> Result<impl IntoResponse, Error> {
    PasswordResetService::new(&state.db, &state.events, state.mailer.as_ref(), &state.site)
        .confirm_reset(&form)
        .await?;

    SessionFlash::push(&session, FlashLevel::Success, PASSWORD_RESET_COMPLETE_MESSAGE).await?;

    Ok(Redirect::to("/login"))
}
