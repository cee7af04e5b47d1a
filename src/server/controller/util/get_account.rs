use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::AccountModel, session::account::SessionAccountId},
    service::account::AccountService,
};

/// Retrieves the logged-in account from session and then from database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The caller's session
///
/// # Returns
/// - `Ok(AccountModel)`: Account found
/// - `Err(Error::AuthError(AuthError::AccountNotInSession))`: No account ID in session
/// - `Err(Error::AuthError(AuthError::AccountNotInDatabase))`: Account ID in session was not
///   found in database (session is flushed)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_account_from_session(
    state: &AppState,
    session: &Session,
) -> Result<AccountModel, Error> {
    let Some(account_id) = SessionAccountId::get(session).await? else {
        return Err(Error::AuthError(AuthError::AccountNotInSession));
    };

    let Some(account) = AccountService::new(&state.db, &state.events)
        .get_account(account_id)
        .await?
    else {
        session.flush().await?;

        tracing::warn!(
            "Flushed session for account ID {} with active session but not found in database",
            account_id
        );

        return Err(Error::AuthError(AuthError::AccountNotInDatabase(account_id)));
    };

    Ok(account)
}
