//! Process configuration, read once at startup and passed by reference from
//! there on.

use std::{
    env, fmt,
    path::{Path, PathBuf},
};

use crate::errors::{SettingsError, SettingsResult};

const ACCOUNT_NAME: &str = "ACCOUNT_NAME";
const CONTAINER_NAME: &str = "CONTAINER_NAME";
const DIRECTORY_NAME: &str = "DIRECTORY_NAME";
const SAS_TOKEN: &str = "SAS_TOKEN";
const SOURCE_FILE: &str = "SOURCE_FILE";

const DEFAULT_SOURCE: &str = "Data.csv";

/// Everything the upload run needs: the storage account, the target
/// container and directory, the SAS credential and the local file to send.
#[derive(Clone)]
pub struct Settings {
    pub account: String,
    pub container: String,
    pub directory: String,
    pub sas_token: String,
    pub source: PathBuf,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] when a required variable is missing or
    /// empty.
    pub fn from_env() -> SettingsResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> SettingsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            account: required(&lookup, ACCOUNT_NAME)?,
            container: required(&lookup, CONTAINER_NAME)?,
            directory: required(&lookup, DIRECTORY_NAME)?,
            sas_token: required(&lookup, SAS_TOKEN)?,
            source: lookup(SOURCE_FILE)
                .filter(|value| !value.is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_SOURCE), PathBuf::from),
        })
    }

    /// The destination file name: the final component of the source path.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidSource`] when the source path ends in
    /// something that is not a file name, such as `..`.
    pub fn file_name(&self) -> SettingsResult<&str> {
        self.source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SettingsError::InvalidSource(self.source.clone()))
    }

    /// Replaces the local source file, keeping the rest of the settings.
    #[must_use]
    pub fn with_source(mut self, source: &Path) -> Self {
        self.source = source.to_path_buf();
        self
    }
}

fn required<F>(lookup: &F, name: &'static str) -> SettingsResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or(SettingsError::MissingVar(name))?;
    if value.is_empty() {
        return Err(SettingsError::EmptyVar(name));
    }
    Ok(value)
}

// The SAS token is a credential, keep it out of debug output.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("account", &self.account)
            .field("container", &self.container)
            .field("directory", &self.directory)
            .field("sas_token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use insta::assert_debug_snapshot;

    use super::*;

    fn full_env() -> BTreeMap<&'static str, &'static str> {
        BTreeMap::from([
            (ACCOUNT_NAME, "acct1"),
            (CONTAINER_NAME, "data"),
            (DIRECTORY_NAME, "incoming"),
            (SAS_TOKEN, "sv=2022-11-02&sig=secret"),
        ])
    }

    fn from_map(vars: &BTreeMap<&'static str, &'static str>) -> SettingsResult<Settings> {
        Settings::from_lookup(|name| vars.get(name).map(ToString::to_string))
    }

    #[test]
    fn reads_all_variables() {
        let mut vars = full_env();
        vars.insert(SOURCE_FILE, "exports/report.csv");

        let settings = from_map(&vars).unwrap();

        assert_eq!(settings.account, "acct1");
        assert_eq!(settings.container, "data");
        assert_eq!(settings.directory, "incoming");
        assert_eq!(settings.source, PathBuf::from("exports/report.csv"));
        assert_eq!(settings.file_name().unwrap(), "report.csv");
    }

    #[test]
    fn source_defaults_when_unset() {
        let settings = from_map(&full_env()).unwrap();
        assert_eq!(settings.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(settings.file_name().unwrap(), DEFAULT_SOURCE);
    }

    #[test]
    fn missing_variable_fails() {
        let mut vars = full_env();
        vars.remove(SAS_TOKEN);

        assert!(matches!(
            from_map(&vars),
            Err(SettingsError::MissingVar(SAS_TOKEN))
        ));
    }

    #[test]
    fn empty_variable_fails() {
        let mut vars = full_env();
        vars.insert(CONTAINER_NAME, "");

        assert!(matches!(
            from_map(&vars),
            Err(SettingsError::EmptyVar(CONTAINER_NAME))
        ));
    }

    #[test]
    fn source_without_file_name_fails() {
        let settings = from_map(&full_env()).unwrap().with_source(Path::new(".."));

        assert!(matches!(
            settings.file_name(),
            Err(SettingsError::InvalidSource(_))
        ));
    }

    #[test]
    fn debug_redacts_the_token() {
        let settings = from_map(&full_env()).unwrap();

        assert_debug_snapshot!(settings, @r###"
        Settings {
            account: "acct1",
            container: "data",
            directory: "incoming",
            sas_token: "<redacted>",
            source: "Data.csv",
        }
        "###);
    }
}
