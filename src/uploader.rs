use std::path::Path;

use log::{debug, info};

use crate::{
    client::{is_already_exists, LakeClient},
    errors::{LakeError, LakeResult, UploadError, UploadResult},
    settings::Settings,
};

/// Runs the upload flow against a [`LakeClient`].
pub struct Uploader {
    client: Box<dyn LakeClient>,
}

impl Clone for Uploader {
    fn clone(&self) -> Self {
        Self {
            client: dyn_clone::clone_box(&*self.client),
        }
    }
}

impl Uploader {
    #[must_use]
    pub fn new(client: Box<dyn LakeClient>) -> Self {
        Self { client }
    }

    /// Creates the container, reusing it when the service reports it already
    /// exists. Containers are addressed by name on every later call, so
    /// there is no handle to hold on to.
    ///
    /// # Errors
    ///
    /// Any service response other than success or already-exists maps into a
    /// [`LakeError`].
    pub async fn ensure_container(&self, name: &str) -> LakeResult<()> {
        info!("provisioning container `{name}`");

        match self.client.create_file_system(name).await {
            Ok(()) => {
                info!("container `{name}` created");
                Ok(())
            }
            Err(error) if is_already_exists(&error) => {
                debug!("container `{name}` already exists");
                Ok(())
            }
            Err(error) => Err(error.kind().into()),
        }
    }

    /// Same create-or-reuse contract as [`Self::ensure_container`], for a
    /// directory path inside the container.
    ///
    /// # Errors
    ///
    /// Any service response other than success or already-exists maps into a
    /// [`LakeError`].
    pub async fn ensure_directory(&self, container: &str, name: &str) -> LakeResult<()> {
        info!("provisioning directory `{name}` in container `{container}`");

        match self.client.create_directory(container, name).await {
            Ok(()) => {
                info!("directory `{name}` created");
                Ok(())
            }
            Err(error) if is_already_exists(&error) => {
                debug!("directory `{name}` already exists");
                Ok(())
            }
            Err(error) => Err(error.kind().into()),
        }
    }

    /// Reads the local file and sends its bytes to
    /// `{directory}/{file_name}`, overwriting any existing file of that
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::Source`] when the local file cannot be read, or
    /// the mapped service error when the upload itself fails.
    pub async fn upload_file(
        &self,
        container: &str,
        directory: &str,
        source: &Path,
        file_name: &str,
    ) -> LakeResult<()> {
        let content = match tokio::fs::read(source).await {
            Ok(content) => content,
            Err(error) => {
                return Err(LakeError::Source {
                    path: source.to_path_buf(),
                    source: error,
                })
            }
        };

        let destination = format!("{directory}/{file_name}");
        match self.client.upload(container, &destination, content).await {
            Ok(()) => {
                info!(
                    "uploaded `{}` to `{container}/{destination}`",
                    source.display()
                );
                Ok(())
            }
            Err(error) => Err(error.kind().into()),
        }
    }

    /// The whole flow: ensure container, ensure directory, upload. Stops at
    /// the first failing stage and tags the error with it, so a
    /// provisioning failure never lets a later stage run against a resource
    /// that was not set up.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure as an [`UploadError`].
    pub async fn run(&self, settings: &Settings) -> UploadResult<()> {
        self.ensure_container(&settings.container)
            .await
            .map_err(|source| UploadError::Container {
                name: settings.container.clone(),
                source,
            })?;

        self.ensure_directory(&settings.container, &settings.directory)
            .await
            .map_err(|source| UploadError::Directory {
                name: settings.directory.clone(),
                source,
            })?;

        let file_name = settings.file_name().map_err(|error| UploadError::Upload {
            name: settings.source.display().to_string(),
            source: LakeError::Any(Box::new(error)),
        })?;

        self.upload_file(
            &settings.container,
            &settings.directory,
            &settings.source,
            file_name,
        )
        .await
        .map_err(|source| UploadError::Upload {
            name: file_name.to_string(),
            source,
        })
    }
}
