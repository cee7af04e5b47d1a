
use compost_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;
use crate::server::{error::validation::ValidationError, media::MediaStorage};

fn event_bus(test: &TestContext) -> AccountEventBus {
    AccountEventBus::with_profile_binder(MediaStorage::new(test.media_root()))
}

fn register_form(username: &str, email: &str, password1: &str, password2: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_string(),
        email: email.to_string(),
        password1: password1.to_string(),
        password2: password2.to_string(),
    }
}

fn validation_error(result: Result<AccountModel, Error>) -> ValidationError {
    match result {
        Err(Error::ValidationError(errors)) => errors,
        other => panic!("expected validation error, got {:?}", other),
    }
}
