/// Username used by most account fixtures.
pub const TEST_USERNAME: &str = "testuser";
/// Email used by most account fixtures.
pub const TEST_EMAIL: &str = "test@example.com";
/// Plain text password of every account fixture unless stated otherwise.
pub const TEST_PASSWORD: &str = "password123";
/// Avatar path assigned to new profiles.
pub const DEFAULT_AVATAR_PATH: &str = "profile_images/default.jpg";
