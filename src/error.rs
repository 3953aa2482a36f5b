//! Application error types using thiserror
//!
//! Error hierarchy:
//! - FetchError: Issues talking to a vendor endpoint or reading its response
//! - BaselineError: Issues reading the baseline file
//! - ConfigError: Issues with CLI or config file settings
//! - NotifyError: Issues delivering the chat notification
//! - AppError: Errors that abort a monitoring run

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Vendor endpoint related errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while resolving a product version
///
/// Every variant collapses to a single diagnostic string at the extractor
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection failure or other transport problem
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Request exceeded its timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// Endpoint answered with a status the source cannot use
    #[error("unexpected HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response could not be decoded
    #[error("invalid response from {url}: {message}")]
    Parse { url: String, message: String },

    /// Response was well formed but carried no version signal
    #[error("version not found")]
    NotFound,

    /// Every source of a multi-source product failed
    #[error("all sources failed: {details}")]
    AllSourcesFailed { details: String },
}

impl FetchError {
    /// Creates a Transport error
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        FetchError::Timeout { url: url.into() }
    }

    /// Creates a Status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        FetchError::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a Parse error
    pub fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Parse {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Errors related to the baseline file
#[derive(Error, Debug)]
pub enum BaselineError {
    /// Baseline file does not exist
    #[error("baseline file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read baseline file
    #[error("failed to read baseline file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Baseline file is not a JSON object of entries
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this tool
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A setting has an unusable value
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors related to notification delivery
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The POST could not be sent
    #[error("failed to send notification: {message}")]
    SendFailed { message: String },

    /// The sink answered with a non-success status
    #[error("notification rejected with HTTP {status}")]
    Rejected { status: u16 },

    /// The payload could not be serialized
    #[error("failed to serialize notification payload: {message}")]
    Serialize { message: String },
}

impl BaselineError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        BaselineError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BaselineError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BaselineError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidValue error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
