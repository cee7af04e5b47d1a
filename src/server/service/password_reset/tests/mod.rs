
use compost_test_utils::prelude::*;

use super::*;
use crate::server::{error::validation::ValidationError, mail::MemoryMailer, media::MediaStorage};

struct Services {
    events: AccountEventBus,
    mailer: MemoryMailer,
    site: SiteConfig,
}

impl Services {
    fn new(test: &TestContext) -> Self {
        Self {
            events: AccountEventBus::with_profile_binder(MediaStorage::new(test.media_root())),
            mailer: MemoryMailer::new(),
            site: SiteConfig::default(),
        }
    }

    fn reset<'a>(&'a self, test: &'a TestContext) -> PasswordResetService<'a> {
        PasswordResetService::new(&test.db, &self.events, &self.mailer, &self.site)
    }
}

/// Pulls the token out of the reset link in an email body.
fn token_from_body(body: &str) -> String {
    let start = body.find("/reset/").expect("reset link in email body") + "/reset/".len();

    body[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}

fn confirm_form(token: &str, new1: &str, new2: &str) -> PasswordResetConfirmForm {
    PasswordResetConfirmForm {
        token: token.to_string(),
        new_password1: new1.to_string(),
        new_password2: new2.to_string(),
    }
}

fn validation_error<T: std::fmt::Debug>(result: Result<T, Error>) -> ValidationError {
    match result {
        Err(Error::ValidationError(errors)) => errors,
        other => panic!("expected validation error, got {:?}", other),
    }
}
