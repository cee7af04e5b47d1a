//! Media storage and avatar image processing.
//!
//! - `storage` - Filesystem media root with atomic writes and upload naming
//! - `avatar` - Avatar normalization to a fixed bounding box

pub mod avatar;
pub mod storage;

pub use avatar::{AvatarNormalizer, AVATAR_MAX_DIMENSION};
pub use storage::{MediaStorage, DEFAULT_AVATAR, PROFILE_IMAGES_DIR};
