//! Block headers, legacy transactions, and proof-of-work checks.

use num_bigint::BigUint;

use crate::compact::decode_compact_bits;
use crate::error::CompactTargetError;
use crate::hash::{double_sha256, BlockHash};

/// Version of blocks created before BIP34.
pub const BLOCK_VERSION_GENESIS: i32 = 1;
/// Version introduced by BIP34: height in the coinbase.
pub const BLOCK_VERSION_BIP34: i32 = 2;
/// Version introduced by BIP66: strict DER signatures.
pub const BLOCK_VERSION_BIP66: i32 = 3;
/// Version introduced by BIP65: OP_CHECKLOCKTIMEVERIFY.
pub const BLOCK_VERSION_BIP65: i32 = 4;

/// The serialized size of a block header.
pub const BLOCK_HEADER_SIZE: usize = 80;

/// The easiest representable difficulty, used by unit-test networks that
/// solve their own genesis block.
pub const EASIEST_DIFFICULTY_TARGET: u32 = 0x207f_ffff;

/// An 80-byte block header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block version.
    pub version: i32,
    /// Hash of the previous block (internal byte order).
    pub prev_block_hash: BlockHash,
    /// Merkle root of all transactions.
    pub merkle_root: BlockHash,
    /// Block timestamp (Unix time).
    pub time: u32,
    /// Difficulty target in compact bits format.
    pub bits: u32,
    /// Proof-of-work nonce.
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialize the block header to its 80-byte wire form.
    pub fn serialize(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let mut header = [0u8; BLOCK_HEADER_SIZE];
        header[0..4].copy_from_slice(&self.version.to_le_bytes());
        header[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        header[36..68].copy_from_slice(self.merkle_root.as_bytes());
        header[68..72].copy_from_slice(&self.time.to_le_bytes());
        header[72..76].copy_from_slice(&self.bits.to_le_bytes());
        header[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        header
    }

    /// The block hash: double SHA-256 of the serialized header.
    pub fn hash(&self) -> BlockHash {
        BlockHash::of(&self.serialize())
    }

    /// The difficulty target this header claims to meet.
    pub fn target(&self) -> Result<BigUint, CompactTargetError> {
        decode_compact_bits(self.bits)
    }

    /// Whether the header signals BIP34 (height in coinbase) or later.
    pub fn is_bip34(&self) -> bool {
        self.version >= BLOCK_VERSION_BIP34
    }

    /// Whether this header's hash meets its own claimed target.
    pub fn meets_target(&self) -> Result<bool, CompactTargetError> {
        let target = self.target()?;
        Ok(hash_meets_target(&self.hash(), &target))
    }

    /// Grind the nonce until the hash meets `target`, leaving the solving
    /// nonce in place. Returns false if the 32-bit nonce space is exhausted.
    ///
    /// Only test networks with trivial targets ever call this; a real
    /// target would take geological time here.
    pub fn solve(&mut self, target: &BigUint) -> bool {
        let mut serialized = self.serialize();
        loop {
            serialized[76..80].copy_from_slice(&self.nonce.to_le_bytes());
            let hash = BlockHash::from_bytes(double_sha256(&serialized));
            if hash_meets_target(&hash, target) {
                return true;
            }
            match self.nonce.checked_add(1) {
                Some(next) => self.nonce = next,
                None => return false,
            }
        }
    }
}

/// Compare a hash (interpreted as a little-endian 256-bit integer, the
/// internal byte order) against a difficulty target.
pub fn hash_meets_target(hash: &BlockHash, target: &BigUint) -> bool {
    BigUint::from_bytes_le(hash.as_bytes()) <= *target
}

/// A transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    /// Hash of the transaction holding the output being spent.
    pub prev_tx_hash: BlockHash,
    /// Index of the output being spent.
    pub prev_index: u32,
    /// Unlocking script.
    pub script: Vec<u8>,
    /// Sequence number.
    pub sequence: u32,
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    /// Value in satoshis.
    pub value: u64,
    /// Locking script.
    pub script_pubkey: Vec<u8>,
}

/// A transaction in the legacy (pre-segwit) serialization all the genesis
/// blocks of the supported chains hash with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

/// OP_CHECKSIG opcode, the tail of a pay-to-pubkey script.
const OP_CHECKSIG: u8 = 0xac;

impl Transaction {
    /// Build a coinbase transaction: one input spending the null outpoint
    /// with the given script, one pay-to-pubkey output.
    pub fn coinbase(input_script: Vec<u8>, output_pubkey: &[u8], value: u64) -> Self {
        let input = TxInput {
            prev_tx_hash: BlockHash::ZERO,
            prev_index: u32::MAX,
            script: input_script,
            sequence: u32::MAX,
        };
        // Pay-to-pubkey: push the key, then OP_CHECKSIG.
        let mut script_pubkey = Vec::with_capacity(output_pubkey.len() + 2);
        script_pubkey.push(output_pubkey.len() as u8);
        script_pubkey.extend_from_slice(output_pubkey);
        script_pubkey.push(OP_CHECKSIG);
        Transaction {
            version: 1,
            inputs: vec![input],
            outputs: vec![TxOutput { value, script_pubkey }],
            lock_time: 0,
        }
    }

    /// Whether this transaction spends the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1
            && self.inputs[0].prev_tx_hash == BlockHash::ZERO
            && self.inputs[0].prev_index == u32::MAX
    }

    /// Legacy wire serialization (no witness data).
    pub fn serialize(&self) -> Vec<u8> {
        let mut tx = Vec::with_capacity(200);
        tx.extend_from_slice(&self.version.to_le_bytes());
        encode_varint(&mut tx, self.inputs.len() as u64);
        for input in &self.inputs {
            tx.extend_from_slice(input.prev_tx_hash.as_bytes());
            tx.extend_from_slice(&input.prev_index.to_le_bytes());
            encode_varint(&mut tx, input.script.len() as u64);
            tx.extend_from_slice(&input.script);
            tx.extend_from_slice(&input.sequence.to_le_bytes());
        }
        encode_varint(&mut tx, self.outputs.len() as u64);
        for output in &self.outputs {
            tx.extend_from_slice(&output.value.to_le_bytes());
            encode_varint(&mut tx, output.script_pubkey.len() as u64);
            tx.extend_from_slice(&output.script_pubkey);
        }
        tx.extend_from_slice(&self.lock_time.to_le_bytes());
        tx
    }

    /// The transaction id: double SHA-256 of the legacy serialization.
    pub fn txid(&self) -> BlockHash {
        BlockHash::of(&self.serialize())
    }
}

/// Encode a Bitcoin-style variable-length integer.
pub fn encode_varint(buf: &mut Vec<u8>, value: u64) {
    if value < 0xfd {
        buf.push(value as u8);
    } else if value <= 0xffff {
        buf.push(0xfd);
        buf.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        buf.push(0xfe);
        buf.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&value.to_le_bytes());
    }
}

/// A block: header plus transaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// The block hash.
    pub fn hash(&self) -> BlockHash {
        self.header.hash()
    }
}
