use thiserror::Error;

/// Error types for the gsa-rs library.
#[derive(Error, Debug)]
pub enum GsaError {
    /// The problem specification (names and bounds) is malformed.
    #[error("Invalid problem specification: {0}")]
    InvalidProblem(String),

    /// A method token that does not name one of the supported methods.
    #[error("Unsupported sensitivity method: {0}")]
    UnsupportedMethod(String),

    /// An analysis was requested before a model was defined.
    #[error("No model defined: call define_model before running an analysis")]
    ModelNotDefined,

    /// Invalid analysis configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error indicating a mismatch in array dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during model evaluation.
    #[error("Function evaluation error: {0}")]
    FunctionEvaluation(String),

    /// Error during computational operations.
    #[error("Computation error: {0}")]
    InvalidComputation(String),

    /// Invalid state of the analysis session.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Error for boundary definitions.
    #[error("Bounds error: {0}")]
    BoundsError(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error while formatting a rendered document.
    #[error("Formatting error: {0}")]
    FormatError(#[from] std::fmt::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

impl From<crate::parameters::BoundsError> for GsaError {
    fn from(err: crate::parameters::BoundsError) -> Self {
        GsaError::BoundsError(format!("{}", err))
    }
}

/// Result type alias for gsa-rs operations.
pub type Result<T> = std::result::Result<T, GsaError>;

/// Extensions for converting from other error types.
impl From<String> for GsaError {
    fn from(s: String) -> Self {
        GsaError::Other(s)
    }
}

impl From<&str> for GsaError {
    fn from(s: &str) -> Self {
        GsaError::Other(s.to_string())
    }
}
