use thiserror::Error;

/// Main error type for Pathfinder
#[derive(Error, Debug)]
pub enum PathfinderError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A location file line that does not read as `SOURCE:DEST(weight),...`
    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// Edge insertion referencing a vertex that was never added
    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using PathfinderError
pub type Result<T> = std::result::Result<T, PathfinderError>;
