
use compost_test_utils::prelude::*;

use super::*;
use crate::server::error::validation::ValidationError;

struct Services {
    media: MediaStorage,
    events: AccountEventBus,
}

impl Services {
    fn new(test: &TestContext) -> Self {
        let media = MediaStorage::new(test.media_root());
        let events = AccountEventBus::with_profile_binder(media.clone());

        Self { media, events }
    }

    fn profile<'a>(&'a self, test: &'a TestContext) -> ProfileService<'a> {
        ProfileService::new(&test.db, &self.media, &self.events)
    }
}

fn update_form(username: &str, email: &str, bio: &str) -> ProfileUpdateForm {
    ProfileUpdateForm {
        username: username.to_string(),
        email: email.to_string(),
        bio: bio.to_string(),
        avatar: None,
    }
}

fn validation_error(result: Result<ProfileModel, Error>) -> ValidationError {
    match result {
        Err(Error::ValidationError(errors)) => errors,
        other => panic!("expected validation error, got {:?}", other),
    }
}
