use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid Pix key: normalizes to an empty string")]
    InvalidKey,

    #[error("Value for tag {tag} is {len} characters long (max 99)")]
    ValueTooLong { tag: String, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Payload truncated at offset {0}")]
    Truncated(usize),

    #[error("Invalid length field at offset {0}")]
    InvalidLength(usize),

    #[error("Payload does not end with a 6304 checksum field")]
    MissingChecksum,

    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}
