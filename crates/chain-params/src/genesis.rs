//! Deterministic genesis block construction.

use log::debug;
use num_bigint::BigUint;

use crate::block::{Block, BlockHeader, Transaction, BLOCK_VERSION_GENESIS};
use crate::chain::Blockchain;
use crate::compact::decode_compact_bits;
use crate::error::GenesisError;
use crate::hash::BlockHash;
use crate::params::COIN;

/// How a descriptor fixes the genesis timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenesisTime {
    /// The historical launch timestamp.
    Fixed(u32),
    /// Stamp with the wall clock at construction time (unit-test networks).
    WallClock,
}

/// How a descriptor fixes the genesis nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenesisNonce {
    /// The historical mined nonce.
    Fixed(u32),
    /// Grind a fresh nonce against the descriptor's own target
    /// (unit-test networks, where the target makes that instant).
    Solve,
}

/// Everything needed to rebuild one network's genesis block from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisDescriptor {
    /// Selects the coinbase script and output key constants.
    pub chain: Blockchain,
    pub time: GenesisTime,
    /// Compact difficulty of the genesis header.
    pub bits: u32,
    pub nonce: GenesisNonce,
    /// The known block hash, display hex. `None` only for networks that
    /// solve a fresh genesis and so cannot pin one.
    pub expected_hash: Option<&'static str>,
}

impl GenesisDescriptor {
    /// Build the genesis block and verify it against the pinned hash.
    ///
    /// The coinbase pays the classic fifty-coin reward to the chain's
    /// hardcoded key; its txid doubles as the merkle root since it is the
    /// only transaction. A hash mismatch means the constants and the
    /// serialization logic have drifted apart and is unrecoverable.
    pub fn build(&self) -> Result<Block, GenesisError> {
        let input_script = hex::decode(self.chain.genesis_coinbase_script())?;
        let output_key = hex::decode(self.chain.genesis_output_key())?;
        let coinbase = Transaction::coinbase(input_script, &output_key, 50 * COIN);
        let merkle_root = coinbase.txid();

        let time = match self.time {
            GenesisTime::Fixed(t) => t,
            GenesisTime::WallClock => wall_clock(),
        };
        let mut header = BlockHeader {
            version: BLOCK_VERSION_GENESIS,
            prev_block_hash: BlockHash::ZERO,
            merkle_root,
            time,
            bits: self.bits,
            nonce: 0,
        };

        match self.nonce {
            GenesisNonce::Fixed(n) => header.nonce = n,
            GenesisNonce::Solve => {
                let target: BigUint = decode_compact_bits(self.bits)?;
                if !header.solve(&target) {
                    return Err(GenesisError::NonceSpaceExhausted);
                }
                debug!(
                    "solved {} genesis with nonce {} at time {}",
                    self.chain, header.nonce, header.time
                );
            }
        }

        if let Some(expected) = self.expected_hash {
            let actual = header.hash().to_display_hex();
            if actual != expected {
                return Err(GenesisError::HashMismatch {
                    expected: expected.to_owned(),
                    actual,
                });
            }
        }

        Ok(Block { header, transactions: vec![coinbase] })
    }
}

fn wall_clock() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
