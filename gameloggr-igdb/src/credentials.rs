use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::IgdbError;

pub const CLIENT_ID_VAR: &str = "IGDB_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "IGDB_CLIENT_SECRET";

/// Twitch application credentials used to obtain an IGDB token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub client_id: CredentialSource,
    pub client_secret: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    igdb: Option<IgdbConfig>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct IgdbConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from environment variables or the config file.
    ///
    /// Priority: env vars > config file. Both fields are required.
    pub fn load() -> Result<Self, IgdbError> {
        let config = config_path().and_then(|p| load_config_file(&p));
        resolve(|var| std::env::var(var).ok(), config.as_ref())
    }
}

fn resolve(
    env: impl Fn(&str) -> Option<String>,
    config: Option<&IgdbConfig>,
) -> Result<Credentials, IgdbError> {
    let client_id = env(CLIENT_ID_VAR)
        .or_else(|| config.and_then(|c| c.client_id.clone()))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            IgdbError::Config(format!(
                "Missing client_id. Set {CLIENT_ID_VAR} or run `gameloggr credentials set`"
            ))
        })?;

    let client_secret = env(CLIENT_SECRET_VAR)
        .or_else(|| config.and_then(|c| c.client_secret.clone()))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            IgdbError::Config(format!(
                "Missing client_secret. Set {CLIENT_SECRET_VAR} or run `gameloggr credentials set`"
            ))
        })?;

    Ok(Credentials {
        client_id,
        client_secret,
    })
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gameloggr").join("credentials.toml"))
}

/// Whether usable credentials are available from any source.
pub fn has_credentials() -> bool {
    Credentials::load().is_ok()
}

/// Save credentials to the config file, creating parent directories as needed.
///
/// Returns the path the file was written to.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, IgdbError> {
    let path = config_path()
        .ok_or_else(|| IgdbError::Config("Could not determine config directory".to_string()))?;
    save_to(&path, creds)?;
    Ok(path)
}

fn save_to(path: &Path, creds: &Credentials) -> Result<(), IgdbError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        igdb: Some(IgdbConfig {
            client_id: Some(creds.client_id.clone()),
            client_secret: Some(creds.client_secret.clone()),
        }),
    };
    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| IgdbError::Config(format!("Failed to serialize config: {}", e)))?;

    let mut file = open_private(path)?;
    file.write_all(toml_str.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Open `path` for writing, truncated and readable only by the owner.
///
/// A new file is created with mode 0600. An existing file is narrowed to
/// 0600 before anything is written to it.
#[cfg(unix)]
fn open_private(path: &Path) -> Result<std::fs::File, IgdbError> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> Result<std::fs::File, IgdbError> {
    Ok(std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

/// Delete the saved credentials file.
///
/// Returns the removed path, or `None` if there was nothing to remove.
pub fn remove_from_file() -> Result<Option<PathBuf>, IgdbError> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    Ok(remove_from(&path)?.then_some(path))
}

fn remove_from(path: &Path) -> Result<bool, IgdbError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = config_path().and_then(|p| load_config_file(&p));
    sources(|var| std::env::var(var).ok(), config.as_ref())
}

fn sources(env: impl Fn(&str) -> Option<String>, config: Option<&IgdbConfig>) -> CredentialSources {
    let client_id = if env(CLIENT_ID_VAR).is_some() {
        CredentialSource::EnvVar(CLIENT_ID_VAR)
    } else if config.and_then(|c| c.client_id.as_ref()).is_some() {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Missing
    };

    let client_secret = if env(CLIENT_SECRET_VAR).is_some() {
        CredentialSource::EnvVar(CLIENT_SECRET_VAR)
    } else if config.and_then(|c| c.client_secret.as_ref()).is_some() {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Missing
    };

    CredentialSources {
        client_id,
        client_secret,
    }
}

fn load_config_file(path: &Path) -> Option<IgdbConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    config.igdb
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
