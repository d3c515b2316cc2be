//! Difficulty transition validation.

use log::{debug, info};
use num_bigint::BigUint;

use crate::block::BlockHeader;
use crate::compact::{decode_compact_bits, encode_compact_bits};
use crate::error::{StorageError, VerificationError};
use crate::hash::BlockHash;
use crate::params::{ConsensusParams, TARGET_SPACING};

/// A block header annotated with its height in the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlock {
    pub header: BlockHeader,
    pub height: u32,
}

/// Read access to previously accepted blocks, keyed by hash.
///
/// Validation walks ancestor chains through this trait; the caller decides
/// whether the blocks live in memory, on disk, or elsewhere.
pub trait BlockSource {
    /// Look up a block. `Ok(None)` means the block is simply not stored;
    /// `Err` means the store itself failed and validation must abort.
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, StorageError>;
}

impl ConsensusParams {
    /// Whether the block after `height` starts a new retarget cycle.
    pub fn is_difficulty_transition_point(&self, height: u32) -> bool {
        (height + 1) % self.interval == 0
    }

    /// Check that `next` carries the difficulty the network rules require
    /// given its parent `prev`.
    ///
    /// Away from a transition point the bits must simply repeat, except on
    /// test networks after the relaxation date, where a stalled chain may
    /// fall back to minimum difficulty. At a transition point the new
    /// target is recomputed from the timespan of the ending cycle.
    pub fn check_difficulty_transition(
        &self,
        store: &dyn BlockSource,
        prev: &StoredBlock,
        next: &BlockHeader,
    ) -> Result<(), VerificationError> {
        if self.allow_any_difficulty {
            return Ok(());
        }

        if !self.is_difficulty_transition_point(prev.height) {
            if let Some(relaxation_date) = self.testnet_diff_date {
                if next.time > relaxation_date {
                    return self.check_testnet_difficulty(store, prev, next);
                }
            }
            if next.bits != prev.header.bits {
                return Err(VerificationError::BadDifficulty(format!(
                    "unexpected change at height {}: {:#010x} vs {:#010x}",
                    prev.height + 1,
                    next.bits,
                    prev.header.bits
                )));
            }
            return Ok(());
        }

        // Walk back one full cycle to find the block the timespan is
        // measured against.
        let mut cursor = prev.clone();
        for _ in 0..self.interval - 1 {
            cursor = self.walk_back(store, &cursor.header.prev_block_hash)?;
        }
        let interval_ago = cursor.header;

        let mut timespan = prev.header.time as i64 - interval_ago.time as i64;
        // Limit the adjustment step to a factor of four either way.
        let target_timespan = self.target_timespan as i64;
        timespan = timespan.clamp(target_timespan / 4, target_timespan * 4);

        let mut new_target = decode_compact_bits(prev.header.bits)?;
        new_target *= timespan as u64;
        new_target /= target_timespan as u64;
        if new_target > self.max_target {
            info!("difficulty hit proof of work limit: {:x}", new_target);
            new_target = self.max_target.clone();
        }

        // The calculated target has more precision than the compact form
        // can carry; truncate to the precision of the received bits before
        // comparing.
        let accuracy_bytes = (next.bits >> 24) as i64 - 3;
        let mask = if accuracy_bytes >= 0 {
            BigUint::from(0xff_ffffu32) << (8 * accuracy_bytes as u64)
        } else {
            BigUint::from(0xff_ffffu32) >> (8 * (-accuracy_bytes) as u64)
        };
        new_target &= mask;

        let new_compact = encode_compact_bits(&new_target);
        if new_compact != next.bits {
            return Err(VerificationError::BadDifficulty(format!(
                "calculated {:#010x} at the transition to height {}, block carries {:#010x}",
                new_compact,
                prev.height + 1,
                next.bits
            )));
        }
        debug!(
            "retarget at height {}: timespan {}s, new bits {:#010x}",
            prev.height + 1,
            timespan,
            new_compact
        );
        Ok(())
    }

    /// The relaxed rule of the public test networks: after a twenty-minute
    /// gap any block at or below the network floor is accepted, otherwise
    /// the block must repeat the last difficulty that was not itself a
    /// minimum-difficulty fallback.
    fn check_testnet_difficulty(
        &self,
        store: &dyn BlockSource,
        prev: &StoredBlock,
        next: &BlockHeader,
    ) -> Result<(), VerificationError> {
        // A negative delta counts as a gap; some historical clients
        // produced such timestamps and the network tolerated them.
        let time_delta = next.time as i64 - prev.header.time as i64;
        if (0..=2 * TARGET_SPACING as i64).contains(&time_delta) {
            let mut cursor = prev.clone();
            while cursor.height != 0
                && cursor.height % self.interval != 0
                && cursor.header.target()? == self.max_target
            {
                cursor = self.walk_back(store, &cursor.header.prev_block_hash)?;
            }
            if cursor.header.target()? != next.target()? {
                return Err(VerificationError::BadDifficulty(format!(
                    "testnet block at height {} changed difficulty to {:#010x} without a gap, last real difficulty was {:#010x}",
                    prev.height + 1,
                    next.bits,
                    cursor.header.bits
                )));
            }
        } else if next.target()? > self.max_target {
            return Err(VerificationError::BadDifficulty(format!(
                "target {:#010x} is easier than the network floor",
                next.bits
            )));
        }
        Ok(())
    }

    fn walk_back(
        &self,
        store: &dyn BlockSource,
        hash: &BlockHash,
    ) -> Result<StoredBlock, VerificationError> {
        store.get(hash)?.ok_or_else(|| {
            VerificationError::BadDifficulty(format!(
                "no way back through the chain: missing ancestor {hash}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::block::EASIEST_DIFFICULTY_TARGET;
    use crate::chain::{Blockchain, NetworkKind};
    use crate::checkpoints::Checkpoints;
    use crate::genesis::{GenesisDescriptor, GenesisNonce, GenesisTime};
    use crate::params::TARGET_TIMESPAN;

    const MAX_BITS: u32 = EASIEST_DIFFICULTY_TARGET;
    /// A harder-than-floor target for relaxation tests.
    const REAL_BITS: u32 = 0x2000ffff;

    struct MapSource(HashMap<BlockHash, StoredBlock>);

    impl MapSource {
        fn of(blocks: &[StoredBlock]) -> Self {
            MapSource(blocks.iter().map(|b| (b.header.hash(), b.clone())).collect())
        }
    }

    impl BlockSource for MapSource {
        fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, StorageError> {
            Ok(self.0.get(hash).cloned())
        }
    }

    fn test_params(interval: u32, testnet_diff_date: Option<u32>) -> ConsensusParams {
        let chain = Blockchain::Bitcoin;
        let genesis = GenesisDescriptor {
            chain,
            time: GenesisTime::Fixed(1_000_000),
            bits: MAX_BITS,
            nonce: GenesisNonce::Solve,
            expected_hash: None,
        }
        .build()
        .unwrap();
        ConsensusParams {
            chain,
            kind: NetworkKind::UnitTest,
            id: "test.difficulty",
            packet_magic: 0,
            port: 0,
            address_header: 111,
            p2sh_header: 196,
            dumped_private_key_header: 239,
            bip32_header_pub: 0,
            bip32_header_priv: 0,
            interval,
            target_timespan: TARGET_TIMESPAN,
            max_target: decode_compact_bits(MAX_BITS).unwrap(),
            testnet_diff_date,
            allow_any_difficulty: false,
            subsidy_decrease_block_count: 100,
            spendable_coinbase_depth: 5,
            premine_height: 0,
            majority_enforce_block_upgrade: 3,
            majority_reject_block_outdated: 4,
            majority_window: 7,
            dns_seeds: &[],
            alert_signing_key: "",
            payment_protocol_id: "unittest",
            uri_scheme: "bitcoin",
            checkpoints: Checkpoints::new(),
            genesis,
        }
    }

    fn header(prev: &BlockHash, time: u32, bits: u32) -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_block_hash: *prev,
            merkle_root: BlockHash::ZERO,
            time,
            bits,
            nonce: 0,
        }
    }

    /// Chain of `count` blocks after genesis, each `spacing` seconds apart.
    fn chain(params: &ConsensusParams, count: u32, spacing: u32, bits: &[u32]) -> Vec<StoredBlock> {
        let genesis = StoredBlock { header: params.genesis.header.clone(), height: 0 };
        let mut blocks = vec![genesis];
        for i in 0..count {
            let prev = &blocks[i as usize];
            let next = header(
                &prev.header.hash(),
                prev.header.time + spacing,
                bits[i as usize],
            );
            blocks.push(StoredBlock { header: next, height: i + 1 });
        }
        blocks
    }

    #[test]
    fn test_bits_must_repeat_between_transitions() {
        let params = test_params(2016, None);
        let blocks = chain(&params, 1, 600, &[MAX_BITS]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[1];

        let good = header(&prev.header.hash(), prev.header.time + 600, MAX_BITS);
        assert!(params.check_difficulty_transition(&store, prev, &good).is_ok());

        let bad = header(&prev.header.hash(), prev.header.time + 600, REAL_BITS);
        assert!(matches!(
            params.check_difficulty_transition(&store, prev, &bad),
            Err(VerificationError::BadDifficulty(_))
        ));
    }

    #[test]
    fn test_on_time_cycle_keeps_the_target() {
        // Interval 4: the transition follows height 3. Blocks spaced so the
        // cycle took exactly the target timespan, leaving the target as is.
        let mut params = test_params(4, None);
        params.target_timespan = 1800;
        let blocks = chain(&params, 3, 600, &[MAX_BITS; 3]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[3];

        let good = header(&prev.header.hash(), prev.header.time + 600, MAX_BITS);
        assert!(params.check_difficulty_transition(&store, prev, &good).is_ok());

        let bad = header(&prev.header.hash(), prev.header.time + 600, REAL_BITS);
        assert!(matches!(
            params.check_difficulty_transition(&store, prev, &bad),
            Err(VerificationError::BadDifficulty(_))
        ));
    }

    #[test]
    fn test_slow_cycle_is_capped_at_the_floor() {
        // A cycle far beyond four times the target timespan would quadruple
        // the target, but it is already the network floor.
        let mut params = test_params(4, None);
        params.target_timespan = 1800;
        let blocks = chain(&params, 3, 1_000_000, &[MAX_BITS; 3]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[3];

        let next = header(&prev.header.hash(), prev.header.time + 600, MAX_BITS);
        assert!(params.check_difficulty_transition(&store, prev, &next).is_ok());
    }

    #[test]
    fn test_transition_needs_full_ancestry() {
        let params = test_params(4, None);
        let blocks = chain(&params, 3, 600, &[MAX_BITS; 3]);
        // Drop the genesis block from the store; the walk back must fail.
        let store = MapSource::of(&blocks[1..]);
        let prev = &blocks[3];

        let next = header(&prev.header.hash(), prev.header.time + 600, MAX_BITS);
        assert!(matches!(
            params.check_difficulty_transition(&store, prev, &next),
            Err(VerificationError::BadDifficulty(_))
        ));
    }

    #[test]
    fn test_relaxation_without_gap_requires_last_real_difficulty() {
        let params = test_params(2016, Some(1_000_000));
        // Height 1 carries a real difficulty, height 2 a floor fallback.
        let blocks = chain(&params, 2, 600, &[REAL_BITS, MAX_BITS]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[2];

        // On-time block: must step back over the fallback and repeat the
        // real difficulty.
        let good = header(&prev.header.hash(), prev.header.time + 600, REAL_BITS);
        assert!(params.check_difficulty_transition(&store, prev, &good).is_ok());

        let bad = header(&prev.header.hash(), prev.header.time + 600, MAX_BITS);
        assert!(matches!(
            params.check_difficulty_transition(&store, prev, &bad),
            Err(VerificationError::BadDifficulty(_))
        ));
    }

    #[test]
    fn test_relaxation_gap_allows_the_floor() {
        let params = test_params(2016, Some(1_000_000));
        let blocks = chain(&params, 2, 600, &[REAL_BITS, REAL_BITS]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[2];

        // Past the twenty-minute gap anything down to the floor goes.
        let gap = header(&prev.header.hash(), prev.header.time + 1201, MAX_BITS);
        assert!(params.check_difficulty_transition(&store, prev, &gap).is_ok());

        // But not below it.
        let below = header(&prev.header.hash(), prev.header.time + 1201, 0x217fffff);
        assert!(matches!(
            params.check_difficulty_transition(&store, prev, &below),
            Err(VerificationError::BadDifficulty(_))
        ));
    }

    #[test]
    fn test_relaxation_treats_negative_delta_as_gap() {
        let params = test_params(2016, Some(1_000_000));
        let blocks = chain(&params, 2, 600, &[REAL_BITS, REAL_BITS]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[2];

        let backwards = header(&prev.header.hash(), prev.header.time - 1, MAX_BITS);
        assert!(params.check_difficulty_transition(&store, prev, &backwards).is_ok());
    }

    #[test]
    fn test_relaxation_only_after_its_date() {
        let params = test_params(2016, Some(u32::MAX));
        let blocks = chain(&params, 1, 600, &[REAL_BITS]);
        let store = MapSource::of(&blocks);
        let prev = &blocks[1];

        // Before the date the strict repeat rule applies even with a gap.
        let next = header(&prev.header.hash(), prev.header.time + 5000, MAX_BITS);
        assert!(matches!(
            params.check_difficulty_transition(&store, prev, &next),
            Err(VerificationError::BadDifficulty(_))
        ));
    }

    #[test]
    fn test_unit_test_networks_skip_the_check() {
        let mut params = test_params(2016, None);
        params.allow_any_difficulty = true;
        let store = MapSource::of(&[]);
        let prev = StoredBlock { header: params.genesis.header.clone(), height: 0 };
        let next = header(&prev.header.hash(), prev.header.time + 600, REAL_BITS);
        assert!(params.check_difficulty_transition(&store, &prev, &next).is_ok());
    }
}
