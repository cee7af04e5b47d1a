//! Filesystem-backed media storage.
//!
//! All paths handed to [`MediaStorage`] are relative to the media root, e.g.
//! `profile_images/default.jpg`, which is also the form stored in the database.

use std::{
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use rand::{distr::Alphanumeric, Rng};
use tempfile::NamedTempFile;

use crate::server::error::{avatar::AvatarError, Error};

/// Directory under the media root that holds uploaded avatars.
pub const PROFILE_IMAGES_DIR: &str = "profile_images";

/// Placeholder avatar assigned to every new profile.
pub const DEFAULT_AVATAR: &str = "profile_images/default.jpg";

/// Suffixed names tried for an upload before giving up.
const MAX_NAME_ATTEMPTS: usize = 16;

/// Media files rooted at a single directory.
#[derive(Clone, Debug)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a media-relative path to a filesystem path under the media root.
    ///
    /// # Returns
    /// - `Ok(PathBuf)` - Path inside the media root
    /// - `Err(Error::ParseError)` - Path is absolute, empty or escapes the media root
    pub fn path(&self, relative: &str) -> Result<PathBuf, Error> {
        let relative_path = Path::new(relative);

        let is_contained = !relative.is_empty()
            && relative_path
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_contained {
            return Err(Error::ParseError(format!(
                "Media path {:?} is not a relative path inside the media root",
                relative
            )));
        }

        Ok(self.root.join(relative_path))
    }

    /// Reads a media file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub async fn read(&self, relative: &str) -> Result<Option<Vec<u8>>, Error> {
        let path = self.path(relative)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn exists(&self, relative: &str) -> Result<bool, Error> {
        let path = self.path(relative)?;

        Ok(tokio::fs::try_exists(&path).await?)
    }

    /// Replaces the contents of a media file atomically.
    ///
    /// The bytes are written and synced to a temporary file in the target directory, which
    /// is then renamed over the target. Readers see either the previous file or the complete
    /// new one. The temporary file is removed if any step fails.
    pub async fn write_atomic(&self, relative: &str, bytes: Vec<u8>) -> Result<(), Error> {
        let path = self.path(relative)?;

        tokio::task::spawn_blocking(move || write_atomic_blocking(&path, &bytes)).await??;

        Ok(())
    }

    /// Stores an uploaded file under `dir`, returning its media-relative path.
    ///
    /// The file name is sanitized and, if a file with that name already exists, a random
    /// suffix is added before the extension. Names are claimed with a no-clobber rename, so
    /// concurrent uploads with the same name never overwrite each other.
    pub async fn save_upload(
        &self,
        dir: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Error> {
        let dir_path = self.path(dir)?;
        let file_name = sanitize_file_name(file_name);

        let stored_name =
            tokio::task::spawn_blocking(move || save_new_blocking(&dir_path, &file_name, &bytes))
                .await??;

        Ok(format!("{}/{}", dir, stored_name))
    }

    /// Removes a media file, succeeding if it is already gone.
    pub async fn remove(&self, relative: &str) -> Result<(), Error> {
        let path = self.path(relative)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Creates the placeholder avatar at [`DEFAULT_AVATAR`] if it does not exist yet.
    ///
    /// The placeholder is a plain grey JPEG of the maximum avatar size.
    pub async fn ensure_default_avatar(&self) -> Result<(), Error> {
        if self.exists(DEFAULT_AVATAR).await? {
            return Ok(());
        }

        let bytes = tokio::task::spawn_blocking(|| {
            let side = crate::server::media::AVATAR_MAX_DIMENSION;
            let placeholder = image::RgbImage::from_pixel(side, side, image::Rgb([204, 204, 204]));

            let mut bytes = std::io::Cursor::new(Vec::new());
            placeholder
                .write_to(&mut bytes, image::ImageFormat::Jpeg)
                .map(|_| bytes.into_inner())
                .map_err(AvatarError::Encode)
        })
        .await??;

        self.write_atomic(DEFAULT_AVATAR, bytes).await?;
        tracing::info!("Created default avatar at {}", self.root.join(DEFAULT_AVATAR).display());

        Ok(())
    }
}

/// Writes and syncs `bytes` to a temporary file in `dir`, deleted on drop unless persisted.
fn staged_file(dir: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    Ok(tmp)
}

fn write_atomic_blocking(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    staged_file(dir, bytes)?
        .persist(target)
        .map_err(|err| err.error)?;

    Ok(())
}

/// Moves the staged upload to `file_name` in `dir`, or to a suffixed name if that is taken.
///
/// Returns the file name the upload was stored under.
fn save_new_blocking(dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<String> {
    let mut tmp = staged_file(dir, bytes)?;
    let mut candidate = file_name.to_string();

    for _ in 0..MAX_NAME_ATTEMPTS {
        match tmp.persist_noclobber(dir.join(&candidate)) {
            Ok(_) => return Ok(candidate),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                tmp = err.file;
                candidate = with_random_suffix(file_name);
            }
            Err(err) => return Err(err.error),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("No free name for upload {:?} in {}", file_name, dir.display()),
    ))
}

/// Reduces an uploaded file name to a safe single path segment.
///
/// Directory components are dropped and any character other than ASCII alphanumerics,
/// `.`, `-` and `_` becomes `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_start_matches('.');

    if sanitized.is_empty() {
        "avatar".to_string()
    } else {
        sanitized.to_string()
    }
}

fn with_random_suffix(file_name: &str) -> String {
    let suffix = random_token(7);

    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, suffix, ext),
        _ => format!("{}_{}", file_name, suffix),
    }
}

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
