use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable `{0}`")]
    MissingVar(&'static str),

    #[error("environment variable `{0}` is set but empty")]
    EmptyVar(&'static str),

    #[error("source path `{}` has no file name", .0.display())]
    InvalidSource(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum LakeError {
    #[error("authentication against the storage account failed")]
    AuthenticationFailed,

    #[error("resource not found")]
    ResourceNotFound,

    #[error("the provided SAS token is malformed")]
    InvalidSasToken,

    #[error("could not read local file `{}`: {}", .path.display(), .source)]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Any(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure of one stage of the upload pipeline. The pipeline stops at the
/// first of these, so the variant names the furthest stage reached.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to provision container `{name}`: {source}")]
    Container { name: String, source: LakeError },

    #[error("failed to provision directory `{name}`: {source}")]
    Directory { name: String, source: LakeError },

    #[error("failed to upload `{name}`: {source}")]
    Upload { name: String, source: LakeError },
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;
pub type LakeResult<T> = std::result::Result<T, LakeError>;
pub type UploadResult<T> = std::result::Result<T, UploadError>;
