//! # Datalake Upload
//!
//! Sends one local file into an Azure Data Lake Gen2 directory. The flow is
//! deliberately linear: build a service client from a SAS token, make sure
//! the container exists, make sure the directory exists, upload the file
//! with overwrite. Each stage short-circuits the run on its first error, so
//! nothing ever executes against a resource that failed to provision.
//!
//! ```rust,no_run
//! use datalake_upload::{client::DataLakeSdkClient, settings::Settings, uploader::Uploader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let client = DataLakeSdkClient::new(&settings.account, &settings.sas_token)?;
//!     Uploader::new(Box::new(client)).run(&settings).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod errors;
pub mod settings;
pub mod uploader;
