use thiserror::Error;

/// Local validation failures of the target registry. None of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("target name is empty")]
    EmptyName,
    #[error("Target \"{0}\" already exists.")]
    DuplicateName(String),
    #[error("invalid color \"{0}\", expected #rrggbb")]
    InvalidColor(String),
    #[error("no target at index {index} (registry holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The plot service could not be reached, or its answer could not be read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("decode response body: {0}")]
    Decode(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
#[error("invalid base64 image data: {0}")]
pub struct ImageError(#[from] pub base64::DecodeError);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid number of seconds: {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    EmptyUrl { var: &'static str },
}

/// How a plot attempt went wrong, as seen by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotFailure {
    /// No response arrived.
    TransportFailure,
    /// Non-2xx without a per-target error list.
    ServiceFailureGeneric { status: u16, message: String },
    /// One or more targets were rejected by the service.
    PerTargetFailure { names: Vec<String> },
}
