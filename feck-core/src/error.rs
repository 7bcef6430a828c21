use thiserror::Error;

/// Every failure mode the codec can surface, matching the error kinds of the
/// bundle-format contract one-for-one (see the crate's design notes).
#[derive(Debug, Error)]
pub enum FeckError {
    #[error("invalid shape: k={k}, m={m} (require 2 <= k < m <= 255)")]
    InvalidShape { k: usize, m: usize },

    #[error("allocation of {requested_bytes} bytes would overflow addressable memory")]
    AllocationFailed { requested_bytes: u128 },

    #[error("not a feck bundle: magic bytes do not match 'FECK'")]
    InvalidBundle,

    #[error("unsupported bundle version {found} (expected 1)")]
    UnsupportedVersion { found: u8 },

    #[error("data length {actual} does not match bundle's recorded length {expected}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("unrepairable: {bad} primary chunk(s) damaged but only {available} repair chunk(s) intact")]
    Unrepairable { bad: usize, available: usize },

    #[error("internal invariant violation: Reed-Solomon decode failed with a singular system: {0}")]
    SingularSystem(String),
}

pub type Result<T> = std::result::Result<T, FeckError>;
