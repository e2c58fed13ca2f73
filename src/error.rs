//! Error types for the paging simulator.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, VmError>;

/// Rejected session configuration. Raised before any translation happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame count must be positive")]
    ZeroFrames,

    #[error("TLB size must be positive")]
    ZeroTlbSize,

    /// Page size must be a power of two that splits a 16-bit address
    #[error("invalid page size {0}: expected a power of two between 2 and 32768")]
    InvalidPageSize(usize),

    #[error("unknown replacement policy '{0}': use FIFO or LRU")]
    UnknownPolicy(String),
}

/// Main error type for a translation session
#[derive(Error, Debug)]
pub enum VmError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot open backing store {}: {source}", path.display())]
    BackingStoreOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Seek or read against the backing store failed, including short reads
    #[error("failed to load page {page} from backing store: {source}")]
    BackingStore {
        page: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: logical address {value} is outside [0, 65535]")]
    AddressOutOfRange { line: usize, value: i64 },

    #[error("line {line}: expected a logical address or directive, got '{token}'")]
    InvalidInput { line: usize, token: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl VmError {
    pub(crate) fn backing_store(page: usize, source: io::Error) -> Self {
        VmError::BackingStore { page, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: VmError = ConfigError::ZeroFrames.into();
        assert!(matches!(err, VmError::Config(ConfigError::ZeroFrames)));
        assert!(err.to_string().contains("frame count"));
    }

    #[test]
    fn test_backing_store_error_keeps_source() {
        use std::error::Error as _;

        let err = VmError::backing_store(5, io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(err.to_string().contains("page 5"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_backing_store_open_error_names_path() {
        let err = VmError::BackingStoreOpen {
            path: PathBuf::from("/tmp/STORE.bin"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let text = err.to_string();
        assert!(text.starts_with("cannot open backing store /tmp/STORE.bin"));
    }

    #[test]
    fn test_input_errors_name_the_line() {
        let err = VmError::AddressOutOfRange { line: 3, value: 70000 };
        assert!(err.to_string().starts_with("line 3"));

        let err = VmError::InvalidInput { line: 7, token: "abc".to_string() };
        assert!(err.to_string().contains("'abc'"));
    }
}
