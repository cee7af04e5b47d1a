//! Generated images and media root fixtures.

pub mod factory;

use std::path::PathBuf;

use image::ImageFormat;

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn media<'a>(&'a self) -> MediaFixtures<'a> {
        MediaFixtures { setup: self }
    }
}

pub struct MediaFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> MediaFixtures<'a> {
    /// Write raw bytes to a path relative to the temporary media root.
    ///
    /// Parent directories are created as needed.
    pub async fn write_file(&self, relative: &str, bytes: &[u8]) -> Result<PathBuf, TestError> {
        let path = self.setup.media_root().join(relative);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        Ok(path)
    }

    /// Write a solid red image to the media root, encoded according to the file extension.
    pub async fn write_image(
        &self,
        relative: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf, TestError> {
        let format = ImageFormat::from_path(relative)?;
        let bytes = factory::solid_image(width, height, format)?;

        self.write_file(relative, &bytes).await
    }

    /// Dimensions of an image stored under the media root.
    pub async fn image_dimensions(&self, relative: &str) -> Result<(u32, u32), TestError> {
        let bytes = tokio::fs::read(self.setup.media_root().join(relative)).await?;

        factory::dimensions(&bytes)
    }

    /// Returns true if a file exists under the media root.
    pub fn exists(&self, relative: &str) -> bool {
        self.setup.media_root().join(relative).exists()
    }

    /// Names of all files in a media subdirectory, sorted.
    pub fn list_dir(&self, relative: &str) -> Result<Vec<String>, TestError> {
        let dir = self.setup.media_root().join(relative);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();

        Ok(names)
    }
}
