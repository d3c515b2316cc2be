//! Version-majority tracking and the verification flags derived from it.

use std::collections::HashSet;

use crate::block::{BlockHeader, Transaction, BLOCK_VERSION_BIP34, BLOCK_VERSION_BIP65};
use crate::difficulty::{BlockSource, StoredBlock};
use crate::error::StorageError;
use crate::params::{ConsensusParams, BIP16_ENFORCE_TIME};

/// Extra checks applied to a whole block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockVerifyFlag {
    /// BIP34: the coinbase input script must start with the block height.
    HeightInCoinbase,
}

/// Extra checks applied to transaction scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptVerifyFlag {
    /// BIP16: pay-to-script-hash outputs are evaluated as scripts.
    P2sh,
    /// BIP65: OP_CHECKLOCKTIMEVERIFY is enforced.
    CheckLockTimeVerify,
}

/// A sliding window over the versions of the most recent blocks.
///
/// The window must fill up before any count is reported; until then every
/// query answers `None` and no majority rule fires.
#[derive(Debug, Clone)]
pub struct VersionTally {
    window: Vec<i32>,
    write_head: usize,
    stored: usize,
}

impl VersionTally {
    /// An empty tally sized to the network's majority window.
    pub fn new(params: &ConsensusParams) -> Self {
        VersionTally {
            window: vec![0; params.majority_window as usize],
            write_head: 0,
            stored: 0,
        }
    }

    /// Record the version of a newly connected block, evicting the oldest
    /// entry once the window is full.
    pub fn add(&mut self, version: i32) {
        self.window[self.write_head] = version;
        self.write_head = (self.write_head + 1) % self.window.len();
        if self.stored < self.window.len() {
            self.stored += 1;
        }
    }

    /// How many blocks in the window carry at least `version`, or `None`
    /// while the window has not filled up yet.
    pub fn count_at_or_above(&self, version: i32) -> Option<u32> {
        if self.stored < self.window.len() {
            return None;
        }
        Some(self.window.iter().filter(|v| **v >= version).count() as u32)
    }

    /// Prime the tally from the chain ending at `chain_head`, oldest block
    /// first. A chain shorter than the window leaves the tally unfilled.
    pub fn initialize(
        &mut self,
        store: &dyn BlockSource,
        chain_head: &StoredBlock,
    ) -> Result<(), StorageError> {
        let mut versions = Vec::with_capacity(self.window.len());
        let mut cursor = Some(chain_head.clone());
        while let Some(block) = cursor {
            versions.push(block.header.version);
            if versions.len() == self.window.len() {
                break;
            }
            cursor = store.get(&block.header.prev_block_hash)?;
        }
        for version in versions.into_iter().rev() {
            self.add(version);
        }
        Ok(())
    }

    /// The window size.
    pub fn size(&self) -> usize {
        self.window.len()
    }
}

impl ConsensusParams {
    /// The block-level checks in force for `block` given the recent
    /// version majority.
    pub fn block_verification_flags(
        &self,
        block: &BlockHeader,
        tally: &VersionTally,
    ) -> HashSet<BlockVerifyFlag> {
        let mut flags = HashSet::new();
        if block.is_bip34() {
            if let Some(count) = tally.count_at_or_above(BLOCK_VERSION_BIP34) {
                if count >= self.majority_enforce_block_upgrade {
                    flags.insert(BlockVerifyFlag::HeightInCoinbase);
                }
            }
        }
        flags
    }

    /// The script-level checks in force for `transaction` inside `block`.
    ///
    /// P2SH activates by timestamp; OP_CHECKLOCKTIMEVERIFY needs the block
    /// itself to signal BIP65 and strictly more than the enforce threshold
    /// of the window to agree. The current rules depend only on the block
    /// context; the transaction is part of the surface for rules that
    /// inspect it.
    pub fn transaction_verification_flags(
        &self,
        block: &BlockHeader,
        _transaction: &Transaction,
        tally: &VersionTally,
    ) -> HashSet<ScriptVerifyFlag> {
        let mut flags = HashSet::new();
        if block.time >= BIP16_ENFORCE_TIME {
            flags.insert(ScriptVerifyFlag::P2sh);
        }
        if block.version >= BLOCK_VERSION_BIP65 {
            if let Some(count) = tally.count_at_or_above(BLOCK_VERSION_BIP65) {
                if count > self.majority_enforce_block_upgrade {
                    flags.insert(ScriptVerifyFlag::CheckLockTimeVerify);
                }
            }
        }
        flags
    }
}
