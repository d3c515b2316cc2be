//! Consensus parameters and chain validation rules for the supported
//! blockchain networks.
//!
//! This crate provides pure Rust implementations of:
//! - The parameter sets of the Bitcoin and Internet of People networks
//!   (production, test, regtest, and unit-test flavors of each)
//! - Compact difficulty bits encoding and decoding
//! - Deterministic genesis block construction with integrity checking
//! - Difficulty transition validation, including the test network
//!   minimum-difficulty relaxation
//! - Version-majority tallying and the soft-fork verification flags
//!   derived from it
//! - Checkpoint tables pinning known-good block hashes

pub mod block;
pub mod chain;
pub mod checkpoints;
pub mod compact;
pub mod difficulty;
pub mod error;
pub mod genesis;
pub mod hash;
pub mod params;
pub mod tally;

pub use block::{Block, BlockHeader, Transaction};
pub use chain::{Blockchain, NetworkKind};
pub use checkpoints::Checkpoints;
pub use compact::{decode_compact_bits, encode_compact_bits};
pub use difficulty::{BlockSource, StoredBlock};
pub use error::{
    CompactTargetError, GenesisError, RegistryError, StorageError, VerificationError,
};
pub use genesis::GenesisDescriptor;
pub use hash::{double_sha256, BlockHash};
pub use params::{get, ChainRegistry, ConsensusParams, ProtocolVersion};
pub use tally::{BlockVerifyFlag, ScriptVerifyFlag, VersionTally};
