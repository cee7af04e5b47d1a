use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ProfileDto {
    pub user: UserDto,
    pub bio: String,
    /// Avatar path relative to the media root
    pub avatar: String,
    pub updated_at: NaiveDateTime,
}

/// Multipart profile edit submission, documented for OpenAPI only.
///
/// The controller reads the multipart stream field by field; the `avatar` part is optional
/// and carries the uploaded image file.
#[derive(utoipa::ToSchema)]
pub struct UpdateProfileMultipart {
    pub username: String,
    pub email: String,
    pub bio: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub avatar: Option<String>,
}

/// An uploaded avatar file as received from the multipart form.
#[derive(Clone, Debug)]
pub struct AvatarUpload {
    /// Client supplied file name, used to derive the stored name and as a format hint
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parsed profile edit submission.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdateForm {
    pub username: String,
    pub email: String,
    pub bio: String,
    /// `None` keeps the current avatar
    pub avatar: Option<AvatarUpload>,
}
