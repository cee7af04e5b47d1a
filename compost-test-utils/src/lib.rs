pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{DEFAULT_AVATAR_PATH, TEST_EMAIL, TEST_PASSWORD, TEST_USERNAME},
        fixtures::image::factory,
        TestBuilder, TestContext, TestError,
    };
}
