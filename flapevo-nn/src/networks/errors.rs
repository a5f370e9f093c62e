use thiserror::Error;

/// Errors raised by network construction,
/// inference and recombination.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The input vector's length doesn't match the
    /// network's input layer, or a parameter slice
    /// doesn't match its layer's dimensions.
    #[error("dimension mismatch: expected {expected} values, found {found}")]
    Dimension { expected: usize, found: usize },
    /// Two networks with different layer sizes were
    /// crossed over.
    #[error("topology mismatch: {expected:?} crossed with {found:?}")]
    TopologyMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// The layer sizes don't describe a valid network.
    #[error("invalid topology {0:?}: at least two non-empty layers are required")]
    InvalidTopology(Vec<usize>),
    /// A layer transition index was out of range.
    #[error("no layer transition {index} (network has {count})")]
    NoSuchTransition { index: usize, count: usize },
    /// Persisted network data was malformed.
    #[error("malformed network data: {0}")]
    Format(#[from] FormatError),
    /// A network file couldn't be read or written.
    #[error("network file error: {0}")]
    Io(#[from] std::io::Error),
}

/// The ways persisted network data can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid magic bytes {0:?}")]
    BadMagic([u8; 4]),
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u16),
    #[error("unknown activation identifier {0}")]
    UnknownActivation(u8),
    #[error("invalid topology {0:?}")]
    InvalidTopology(Vec<usize>),
    #[error("truncated data: needed {needed} more bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("{0} bytes of trailing data")]
    TrailingData(usize),
}
