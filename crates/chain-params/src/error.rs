//! Error types shared across the crate.

use thiserror::Error;

/// A network lookup did not match any known parameter set.
///
/// This is the only error expected under normal operation, e.g. when probing
/// an unsupported network string; the caller decides the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The id string does not name a network on the selected chain.
    #[error("unknown network id `{0}`")]
    UnknownId(String),
    /// The payment-protocol id is outside the supported vocabulary.
    #[error("unknown payment protocol id `{0}`")]
    UnknownPaymentProtocolId(String),
}

/// A block store lookup failed.
///
/// Propagated unmodified and never retried: it signals the chain index
/// itself may be inconsistent, which validation cannot recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block store error: {0}")]
pub struct StorageError(pub String);

/// A compact-bits value with the mantissa sign bit set.
///
/// Difficulty targets are unsigned; such encodings never occur in valid
/// blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("compact target {0:#010x} has its sign bit set")]
pub struct CompactTargetError(pub u32);

/// A candidate block violates a consensus rule checked by this crate.
///
/// Fatal to accepting that specific block, not to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The stored difficulty target is not the one the retarget rule
    /// (or the testnet relaxation) requires at this height.
    #[error("difficulty transition not allowed: {0}")]
    BadDifficulty(String),
    /// The ancestry collaborator failed while walking back.
    #[error(transparent)]
    Store(#[from] StorageError),
    /// The candidate carries an undecodable difficulty encoding.
    #[error(transparent)]
    CompactTarget(#[from] CompactTargetError),
}

/// Genesis-block construction failure.
///
/// A hash mismatch means the hardcoded network constants and the
/// hashing/serialization logic have drifted apart. There is no recovery
/// path; parameter-set construction turns this into a panic at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenesisError {
    #[error("genesis hash mismatch: built {actual}, expected {expected}")]
    HashMismatch { expected: String, actual: String },
    #[error("genesis script constant is not valid hex")]
    InvalidScriptBytes(#[from] hex::FromHexError),
    #[error(transparent)]
    CompactTarget(#[from] CompactTargetError),
    #[error("exhausted the nonce space solving the genesis block")]
    NonceSpaceExhausted,
}
