use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Error, Debug)]
pub enum MonitorError {
    /// A required field was left empty; raised before any request is made
    #[error("{0}")]
    Validation(String),
    /// The service answered with a non-2xx status
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// The request could not complete (offline, DNS, timeout)
    #[error("Could not reach the monitoring service. Check your connection and try again.")]
    Network(#[source] reqwest::Error),
    #[error("Unexpected response from the monitoring service: {0}")]
    Decode(String),
    #[error("Cannot {action} from the {from} view")]
    InvalidTransition {
        action: &'static str,
        from: &'static str,
    },
    #[error("Monitor {0} is not in the loaded list")]
    UnknownMonitor(i64),
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl MonitorError {
    pub fn status(&self) -> Option<u16> {
        match self {
            MonitorError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(e: serde_json::Error) -> Self {
        MonitorError::Decode(e.to_string())
    }
}
