//! The seam between the upload logic and the Azure Data Lake SDK.
//!
//! [`LakeClient`] covers the three remote calls the program makes, so the
//! pipeline can be exercised against a fake in tests. [`DataLakeSdkClient`]
//! is the real thing.

use azure_storage::prelude::*;
use azure_storage_datalake::prelude::*;
use dyn_clone::DynClone;

use crate::errors::{LakeError, LakeResult};

#[async_trait::async_trait]
pub trait LakeClient: DynClone + Send + Sync {
    async fn create_file_system(&self, container: &str) -> azure_core::Result<()>;

    async fn create_directory(&self, container: &str, directory: &str) -> azure_core::Result<()>;

    async fn upload(&self, container: &str, path: &str, content: Vec<u8>) -> azure_core::Result<()>;
}

/// [`LakeClient`] backed by the `azure_storage_datalake` service client,
/// authenticated with a SAS token against
/// `https://{account}.dfs.core.windows.net`.
#[derive(Clone)]
pub struct DataLakeSdkClient {
    client: DataLakeClient,
}

impl DataLakeSdkClient {
    /// Builds the service client from the account name and a SAS token.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::InvalidSasToken`] when the token does not parse
    /// as a query-string credential.
    pub fn new(account: &str, sas_token: &str) -> LakeResult<Self> {
        let credentials =
            StorageCredentials::sas_token(sas_token).map_err(|_| LakeError::InvalidSasToken)?;

        Ok(Self {
            client: DataLakeClient::new(account.to_string(), credentials),
        })
    }
}

#[async_trait::async_trait]
impl LakeClient for DataLakeSdkClient {
    async fn create_file_system(&self, container: &str) -> azure_core::Result<()> {
        self.client.file_system_client(container).create().await?;
        Ok(())
    }

    async fn create_directory(&self, container: &str, directory: &str) -> azure_core::Result<()> {
        self.client
            .file_system_client(container)
            .get_directory_client(directory)
            .create()
            .await?;
        Ok(())
    }

    /// Create-overwrite, append, then flush with close. The create call
    /// truncates any existing file of the same name, which is what gives the
    /// upload its overwrite-on-conflict semantics.
    async fn upload(&self, container: &str, path: &str, content: Vec<u8>) -> azure_core::Result<()> {
        let file = self
            .client
            .file_system_client(container)
            .get_file_client(path);
        let length = content.len() as i64;

        file.create().await?;
        file.append(0, content).await?;
        file.flush(length).close(true).await?;

        Ok(())
    }
}

/// Whether the service rejected a create call because the resource is
/// already there. Both the blob and the dfs endpoint spellings count, plus
/// the path-level one for directories.
pub fn is_already_exists(error: &azure_core::error::Error) -> bool {
    matches!(
        error.kind(),
        azure_storage::ErrorKind::HttpResponse {
            error_code: Some(code),
            ..
        } if code == "ContainerAlreadyExists"
            || code == "FilesystemAlreadyExists"
            || code == "PathAlreadyExists"
    )
}

impl From<&azure_storage::ErrorKind> for LakeError {
    fn from(kind: &azure_storage::ErrorKind) -> Self {
        match kind {
            azure_storage::ErrorKind::HttpResponse {
                status: _,
                error_code,
            } => match error_code.as_ref().map(String::as_str) {
                Some(
                    "ContainerNotFound" | "FilesystemNotFound" | "PathNotFound" | "BlobNotFound",
                ) => Self::ResourceNotFound,
                Some("AuthenticationFailed") => Self::AuthenticationFailed,
                _ => Self::Any(Box::new(kind.clone().into_error())),
            },
            azure_storage::ErrorKind::Credential => Self::AuthenticationFailed,
            _ => Self::Any(Box::new(kind.clone().into_error())),
        }
    }
}
