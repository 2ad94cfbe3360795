use std::fmt;

#[derive(Debug)]
pub enum FinchatError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    SessionError(String),
    NetworkError(reqwest::Error),
    Timeout,
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl fmt::Display for FinchatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinchatError::ApiError { status, message } => {
                write!(f, "Agent API error (status {}): {}", status, message)
            }
            FinchatError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FinchatError::SessionError(msg) => write!(f, "Session error: {}", msg),
            FinchatError::NetworkError(e) => write!(f, "Network error: {}", e),
            FinchatError::Timeout => write!(f, "Request timeout"),
            FinchatError::IoError(e) => write!(f, "IO error: {}", e),
            FinchatError::JsonError(e) => write!(f, "JSON error: {}", e),
            FinchatError::YamlError(e) => write!(f, "YAML error: {}", e),
            FinchatError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FinchatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FinchatError::NetworkError(e) => Some(e),
            FinchatError::IoError(e) => Some(e),
            FinchatError::JsonError(e) => Some(e),
            FinchatError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FinchatError {
    fn from(err: reqwest::Error) -> Self {
        FinchatError::NetworkError(err)
    }
}

impl From<std::io::Error> for FinchatError {
    fn from(err: std::io::Error) -> Self {
        FinchatError::IoError(err)
    }
}

impl From<serde_json::Error> for FinchatError {
    fn from(err: serde_json::Error) -> Self {
        FinchatError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for FinchatError {
    fn from(err: serde_yaml::Error) -> Self {
        FinchatError::YamlError(err)
    }
}

impl From<anyhow::Error> for FinchatError {
    fn from(err: anyhow::Error) -> Self {
        FinchatError::Other(err.to_string())
    }
}

impl From<String> for FinchatError {
    fn from(msg: String) -> Self {
        FinchatError::Other(msg)
    }
}

impl From<&str> for FinchatError {
    fn from(msg: &str) -> Self {
        FinchatError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FinchatError>;
