//! The consensus parameter sets of the supported networks.
//!
//! Each network is one immutable [`ConsensusParams`] record built once, on
//! first use, by a [`Lazy`] singleton. Construction rebuilds the network's
//! genesis block from its descriptor and checks the hash against the pinned
//! constant, so a parameter set that exists at all is internally consistent.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::block::{Block, EASIEST_DIFFICULTY_TARGET};
use crate::chain::{
    Blockchain, NetworkKind, PAYMENT_PROTOCOL_ID_MAINNET, PAYMENT_PROTOCOL_ID_REGTEST,
    PAYMENT_PROTOCOL_ID_TESTNET,
};
use crate::checkpoints::Checkpoints;
use crate::compact::decode_compact_bits;
use crate::error::{GenesisError, RegistryError};
use crate::genesis::{GenesisDescriptor, GenesisNonce, GenesisTime};
use crate::hash::BlockHash;

/// One satoshi-denominated coin.
pub const COIN: u64 = 100_000_000;
/// The monetary cap: 21 million coins.
pub const MAX_MONEY: u64 = 21_000_000 * COIN;

/// Seconds a full retarget cycle aims to span: two weeks.
pub const TARGET_TIMESPAN: u32 = 14 * 24 * 60 * 60;
/// Seconds between blocks the difficulty aims for.
pub const TARGET_SPACING: u32 = 10 * 60;
/// Blocks per retarget cycle on the production and test networks.
pub const INTERVAL: u32 = TARGET_TIMESPAN / TARGET_SPACING;

/// The timestamp from which BIP16 (pay-to-script-hash) is enforced.
pub const BIP16_ENFORCE_TIME: u32 = 1_333_238_400;

/// Outputs below this many satoshis are considered dust.
pub const MIN_NONDUST_OUTPUT: u64 = 2730;

/// The alert key shared by the public test networks.
const TESTNET_ALERT_KEY: &str =
    "04302390343f91cc401d56d68b123028bf52e5fca1939df127f63c6467cdf9c8e2c14b61104cf817d0b780da337893ecc4aaff1309e536162dabbdb45200ca2b0a";

/// Date after which the test networks tolerate min-difficulty blocks when
/// block production stalls.
const TESTNET_DIFFICULTY_RELAXATION_DATE: u32 = 1_329_264_000;

/// Protocol version constants negotiated at connection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// The oldest peer version worth talking to.
    Minimum,
    /// First version that answers ping with pong.
    Pong,
    /// First version that supports Bloom filtering.
    BloomFilter,
    /// The version this library speaks.
    Current,
}

impl ProtocolVersion {
    pub fn number(self) -> u32 {
        match self {
            ProtocolVersion::Minimum => 70000,
            ProtocolVersion::Pong => 60001,
            ProtocolVersion::BloomFilter => 70000,
            ProtocolVersion::Current => 70001,
        }
    }
}

/// The full parameter set of one network of one chain.
///
/// Fields are crate-private; everything observable goes through accessors,
/// and equality and hashing consider only the id, which names the network
/// uniquely across chains.
#[derive(Debug, Clone)]
pub struct ConsensusParams {
    pub(crate) chain: Blockchain,
    pub(crate) kind: NetworkKind,
    pub(crate) id: &'static str,

    pub(crate) packet_magic: u32,
    pub(crate) port: u16,
    pub(crate) address_header: u8,
    pub(crate) p2sh_header: u8,
    pub(crate) dumped_private_key_header: u8,
    pub(crate) bip32_header_pub: u32,
    pub(crate) bip32_header_priv: u32,

    pub(crate) interval: u32,
    pub(crate) target_timespan: u32,
    pub(crate) max_target: BigUint,
    /// Test networks accept stalled-chain blocks at minimum difficulty
    /// after this date.
    pub(crate) testnet_diff_date: Option<u32>,
    /// Unit-test networks skip difficulty transition checking entirely.
    pub(crate) allow_any_difficulty: bool,

    pub(crate) subsidy_decrease_block_count: u32,
    pub(crate) spendable_coinbase_depth: u32,
    /// Blocks reserved for the launch premine; zero for chains without one.
    pub(crate) premine_height: u32,

    pub(crate) majority_enforce_block_upgrade: u32,
    pub(crate) majority_reject_block_outdated: u32,
    pub(crate) majority_window: u32,

    pub(crate) dns_seeds: &'static [&'static str],
    pub(crate) alert_signing_key: &'static str,
    pub(crate) payment_protocol_id: &'static str,
    pub(crate) uri_scheme: &'static str,

    pub(crate) checkpoints: Checkpoints,
    pub(crate) genesis: Block,
}

impl PartialEq for ConsensusParams {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConsensusParams {}

impl std::hash::Hash for ConsensusParams {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl ConsensusParams {
    pub fn chain(&self) -> Blockchain {
        self.chain
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    /// The unique, persistent id of this network.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// The first four bytes of every wire message on this network.
    pub fn packet_magic(&self) -> u32 {
        self.packet_magic
    }

    /// Default peer-to-peer port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Version byte of pay-to-pubkey-hash addresses.
    pub fn address_header(&self) -> u8 {
        self.address_header
    }

    /// Version byte of pay-to-script-hash addresses.
    pub fn p2sh_header(&self) -> u8 {
        self.p2sh_header
    }

    /// Version byte of WIF-dumped private keys.
    pub fn dumped_private_key_header(&self) -> u8 {
        self.dumped_private_key_header
    }

    /// BIP32 extended public key prefix.
    pub fn bip32_header_pub(&self) -> u32 {
        self.bip32_header_pub
    }

    /// BIP32 extended private key prefix.
    pub fn bip32_header_priv(&self) -> u32 {
        self.bip32_header_priv
    }

    /// Blocks per retarget cycle.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Seconds one retarget cycle aims to span.
    pub fn target_timespan(&self) -> u32 {
        self.target_timespan
    }

    /// The easiest (numerically largest) difficulty target this network
    /// accepts.
    pub fn max_target(&self) -> &BigUint {
        &self.max_target
    }

    /// Blocks between coinbase reward halvings.
    pub fn subsidy_decrease_block_count(&self) -> u32 {
        self.subsidy_decrease_block_count
    }

    /// Confirmations before a coinbase output may be spent.
    pub fn spendable_coinbase_depth(&self) -> u32 {
        self.spendable_coinbase_depth
    }

    /// Blocks reserved for the launch premine, zero when there is none.
    pub fn premine_height(&self) -> u32 {
        self.premine_height
    }

    pub fn majority_enforce_block_upgrade(&self) -> u32 {
        self.majority_enforce_block_upgrade
    }

    pub fn majority_reject_block_outdated(&self) -> u32 {
        self.majority_reject_block_outdated
    }

    /// Number of recent blocks examined for version-majority rules.
    pub fn majority_window(&self) -> u32 {
        self.majority_window
    }

    pub fn dns_seeds(&self) -> &[&'static str] {
        self.dns_seeds
    }

    pub fn alert_signing_key(&self) -> &'static str {
        self.alert_signing_key
    }

    /// The payment-protocol network string this parameter set reports.
    pub fn payment_protocol_id(&self) -> &'static str {
        self.payment_protocol_id
    }

    /// Scheme of payment URIs on this chain.
    pub fn uri_scheme(&self) -> &'static str {
        self.uri_scheme
    }

    /// Smallest output value that is not dust.
    pub fn min_non_dust_output(&self) -> u64 {
        MIN_NONDUST_OUTPUT
    }

    /// The monetary cap of the chain.
    pub fn max_money(&self) -> u64 {
        MAX_MONEY
    }

    /// Whether the chain has a monetary cap at all. Both supported chains
    /// do; altchains without one would override this.
    pub fn has_max_money(&self) -> bool {
        true
    }

    /// The wire protocol version to announce for `version` on this
    /// network.
    pub fn protocol_version_num(&self, version: ProtocolVersion) -> u32 {
        version.number()
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    /// Whether `hash` is acceptable at `height` under the checkpoint table.
    pub fn passes_checkpoint(&self, height: u32, hash: &BlockHash) -> bool {
        self.checkpoints.passes(height, hash)
    }

    /// Whether `height` carries a checkpoint pin.
    pub fn is_checkpoint(&self, height: u32) -> bool {
        self.checkpoints.contains(height)
    }

    /// This network's genesis block, rebuilt and verified at construction.
    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> BlockHash {
        self.genesis.header.hash()
    }

    /// A copy of this parameter set answering to a different URI scheme,
    /// for wallets that brand payment URIs. Identity (the id) is shared
    /// with the original, so the copy compares equal to it.
    pub fn with_uri_scheme(&self, uri_scheme: &'static str) -> ConsensusParams {
        let mut params = self.clone();
        params.uri_scheme = uri_scheme;
        params
    }
}

// Network tables. Construction order inside each function mirrors the
// field order of `ConsensusParams`; the genesis descriptor comes last so a
// broken table fails loudly at the hash check.

fn bitcoin_main() -> Result<ConsensusParams, GenesisError> {
    static DNS_SEEDS: &[&str] = &[
        "seed.bitcoin.sipa.be",
        "dnsseed.bluematt.me",
        "dnsseed.bitcoin.dashjr.org",
        "seed.bitcoinstats.com",
        "seed.bitnodes.io",
        "bitseed.xf2.org",
    ];
    let chain = Blockchain::Bitcoin;
    let checkpoints = Checkpoints::from_table(&[
        (91722, "00000000000271a2dc26e7667f8419f2e15416dc6955e5a6c6cdf3f2574dd08e"),
        (91812, "00000000000af0aed4792b1acee3d966af36cf5def14935db8de83d6f9306f2f"),
        (91842, "00000000000a4d0a398161ffc163c503763b1f4360639393e0e4c8e300e0caec"),
        (91880, "00000000000743f190a18c5577a3c2d2a1f610ae9601ac046a38084ccb7cd721"),
        (200000, "000000000000034a7dedef4a161fa058a2d67a173a90155f3a2fe6fc132e0ebf"),
    ])
    .unwrap_or_default();
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::Fixed(1231006505),
        bits: 0x1d00ffff,
        nonce: GenesisNonce::Fixed(2083236893),
        expected_hash: Some("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::Main,
        id: chain.network_id(NetworkKind::Main),
        packet_magic: 0xf9beb4d9,
        port: 8333,
        address_header: 0,
        p2sh_header: 5,
        dumped_private_key_header: 128,
        bip32_header_pub: 0x0488B21E,
        bip32_header_priv: 0x0488ADE4,
        interval: INTERVAL,
        target_timespan: TARGET_TIMESPAN,
        max_target: decode_compact_bits(0x1d00ffff)?,
        testnet_diff_date: None,
        allow_any_difficulty: false,
        subsidy_decrease_block_count: 210_000,
        spendable_coinbase_depth: 100,
        premine_height: 0,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        dns_seeds: DNS_SEEDS,
        alert_signing_key: chain.alert_signing_key(),
        payment_protocol_id: PAYMENT_PROTOCOL_ID_MAINNET,
        uri_scheme: chain.uri_scheme(),
        checkpoints,
        genesis,
    })
}

fn bitcoin_test() -> Result<ConsensusParams, GenesisError> {
    static DNS_SEEDS: &[&str] = &[
        "testnet-seed.bitcoin.jonasschnelli.ch",
        "testnet-seed.bluematt.me",
        "testnet-seed.bitcoin.schildbach.de",
    ];
    let chain = Blockchain::Bitcoin;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::Fixed(1296688602),
        bits: 0x1d00ffff,
        nonce: GenesisNonce::Fixed(414098458),
        expected_hash: Some("000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943"),
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::Test,
        id: chain.network_id(NetworkKind::Test),
        packet_magic: 0x0709110b,
        port: 18333,
        address_header: 111,
        p2sh_header: 196,
        dumped_private_key_header: 239,
        bip32_header_pub: 0x043587CF,
        bip32_header_priv: 0x04358394,
        interval: INTERVAL,
        target_timespan: TARGET_TIMESPAN,
        max_target: decode_compact_bits(0x1d00ffff)?,
        testnet_diff_date: Some(TESTNET_DIFFICULTY_RELAXATION_DATE),
        allow_any_difficulty: false,
        subsidy_decrease_block_count: 210_000,
        spendable_coinbase_depth: 100,
        premine_height: 0,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        dns_seeds: DNS_SEEDS,
        alert_signing_key: TESTNET_ALERT_KEY,
        payment_protocol_id: PAYMENT_PROTOCOL_ID_TESTNET,
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

fn bitcoin_regtest() -> Result<ConsensusParams, GenesisError> {
    let chain = Blockchain::Bitcoin;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::Fixed(1296688602),
        bits: EASIEST_DIFFICULTY_TARGET,
        nonce: GenesisNonce::Fixed(2),
        expected_hash: Some("0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206"),
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::Regtest,
        id: chain.network_id(NetworkKind::Regtest),
        packet_magic: 0xfabfb5da,
        port: 18444,
        address_header: 111,
        p2sh_header: 196,
        dumped_private_key_header: 239,
        bip32_header_pub: 0x043587CF,
        bip32_header_priv: 0x04358394,
        // Difficulty stays at the floor forever in regtest mode.
        interval: 10_000,
        target_timespan: TARGET_TIMESPAN,
        max_target: regtest_max_target(),
        testnet_diff_date: None,
        allow_any_difficulty: false,
        subsidy_decrease_block_count: 150,
        spendable_coinbase_depth: 100,
        premine_height: 0,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        dns_seeds: &[],
        alert_signing_key: chain.alert_signing_key(),
        payment_protocol_id: PAYMENT_PROTOCOL_ID_REGTEST,
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

fn bitcoin_unit_test() -> Result<ConsensusParams, GenesisError> {
    let chain = Blockchain::Bitcoin;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::WallClock,
        bits: EASIEST_DIFFICULTY_TARGET,
        nonce: GenesisNonce::Solve,
        expected_hash: None,
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::UnitTest,
        id: chain.network_id(NetworkKind::UnitTest),
        packet_magic: 0x0b110907,
        port: 18333,
        address_header: 111,
        p2sh_header: 196,
        dumped_private_key_header: 239,
        bip32_header_pub: 0x043587CF,
        bip32_header_priv: 0x04358394,
        interval: 10,
        target_timespan: 200_000_000,
        max_target: unit_test_max_target(),
        testnet_diff_date: None,
        allow_any_difficulty: true,
        subsidy_decrease_block_count: 100,
        spendable_coinbase_depth: 5,
        premine_height: 0,
        majority_enforce_block_upgrade: 3,
        majority_reject_block_outdated: 4,
        majority_window: 7,
        dns_seeds: &[],
        alert_signing_key: chain.alert_signing_key(),
        payment_protocol_id: "btc_unittest",
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

/// Nonce of the IoP production genesis block, ground against the
/// 0x1d00ffff launch target.
const IOP_MAINNET_GENESIS_NONCE: u32 = 1875087468;
const IOP_MAINNET_GENESIS_HASH: &str =
    "00000000bf5f2ee556cb9be8be64e0776af14933438dbb1af72c41bfb6c82db3";

fn iop_main() -> Result<ConsensusParams, GenesisError> {
    static DNS_SEEDS: &[&str] =
        &["ham1.fermat.cloud", "ham2.fermat.cloud", "ham3.fermat.cloud"];
    let chain = Blockchain::InternetOfPeople;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::Fixed(1463452181),
        bits: 0x1d00ffff,
        nonce: GenesisNonce::Fixed(IOP_MAINNET_GENESIS_NONCE),
        expected_hash: Some(IOP_MAINNET_GENESIS_HASH),
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::Main,
        id: chain.network_id(NetworkKind::Main),
        packet_magic: 0xc8e5b4af,
        port: 4877,
        address_header: 117,
        p2sh_header: 174,
        dumped_private_key_header: 49,
        bip32_header_pub: 0xBB8F4852,
        bip32_header_priv: 0x2B7FA42A,
        interval: INTERVAL,
        target_timespan: TARGET_TIMESPAN,
        max_target: decode_compact_bits(0x1d00ffff)?,
        testnet_diff_date: None,
        allow_any_difficulty: false,
        subsidy_decrease_block_count: 210_000,
        spendable_coinbase_depth: 100,
        premine_height: 42_000,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        dns_seeds: DNS_SEEDS,
        alert_signing_key: chain.alert_signing_key(),
        payment_protocol_id: PAYMENT_PROTOCOL_ID_MAINNET,
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

fn iop_test() -> Result<ConsensusParams, GenesisError> {
    static DNS_SEEDS: &[&str] = &[
        "ham4.fermat.cloud",
        "ham5.fermat.cloud",
        "ham6.fermat.cloud",
        "ham7.fermat.cloud",
        "ham8.fermat.cloud",
    ];
    let chain = Blockchain::InternetOfPeople;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::Fixed(1463452342),
        bits: 0x1d00ffff,
        nonce: GenesisNonce::Fixed(3335213172),
        expected_hash: Some("000000006f2bb863230cda4f4fbee520314077e599a90b9c6072ea2018d7f3a3"),
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::Test,
        id: chain.network_id(NetworkKind::Test),
        packet_magic: 0xb1fc50b3,
        port: 7475,
        address_header: 130,
        p2sh_header: 49,
        dumped_private_key_header: 76,
        bip32_header_pub: 0xBB8F4852,
        bip32_header_priv: 0x2B7FA42A,
        interval: INTERVAL,
        target_timespan: TARGET_TIMESPAN,
        max_target: decode_compact_bits(0x1d00ffff)?,
        testnet_diff_date: Some(TESTNET_DIFFICULTY_RELAXATION_DATE),
        allow_any_difficulty: false,
        subsidy_decrease_block_count: 210_000,
        spendable_coinbase_depth: 100,
        premine_height: 42_000,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        dns_seeds: DNS_SEEDS,
        alert_signing_key: TESTNET_ALERT_KEY,
        payment_protocol_id: PAYMENT_PROTOCOL_ID_TESTNET,
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

fn iop_regtest() -> Result<ConsensusParams, GenesisError> {
    let chain = Blockchain::InternetOfPeople;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::Fixed(1463452384),
        bits: EASIEST_DIFFICULTY_TARGET,
        nonce: GenesisNonce::Fixed(2528424328),
        expected_hash: Some("13ac5baa4b3656eec3ae4ab24b44ae602b9d1e549d9f1f238c1bfce54571b8b5"),
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::Regtest,
        id: chain.network_id(NetworkKind::Regtest),
        packet_magic: 0x35b2cc9e,
        port: 14877,
        address_header: 130,
        p2sh_header: 49,
        dumped_private_key_header: 76,
        bip32_header_pub: 0xBB8F4852,
        bip32_header_priv: 0x2B7FA42A,
        interval: 10_000,
        target_timespan: TARGET_TIMESPAN,
        max_target: regtest_max_target(),
        testnet_diff_date: None,
        allow_any_difficulty: false,
        subsidy_decrease_block_count: 150,
        spendable_coinbase_depth: 100,
        premine_height: 42_000,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        dns_seeds: &[],
        alert_signing_key: chain.alert_signing_key(),
        payment_protocol_id: PAYMENT_PROTOCOL_ID_REGTEST,
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

fn iop_unit_test() -> Result<ConsensusParams, GenesisError> {
    let chain = Blockchain::InternetOfPeople;
    let genesis = GenesisDescriptor {
        chain,
        time: GenesisTime::WallClock,
        bits: EASIEST_DIFFICULTY_TARGET,
        nonce: GenesisNonce::Solve,
        expected_hash: None,
    }
    .build()?;
    Ok(ConsensusParams {
        chain,
        kind: NetworkKind::UnitTest,
        id: chain.network_id(NetworkKind::UnitTest),
        packet_magic: 0xb1fc50b3,
        port: 18333,
        address_header: 111,
        p2sh_header: 196,
        dumped_private_key_header: 239,
        bip32_header_pub: 0xBB8F4852,
        bip32_header_priv: 0x2B7FA42A,
        interval: 10,
        target_timespan: 200_000_000,
        max_target: unit_test_max_target(),
        testnet_diff_date: None,
        allow_any_difficulty: true,
        subsidy_decrease_block_count: 100,
        spendable_coinbase_depth: 5,
        premine_height: 0,
        majority_enforce_block_upgrade: 3,
        majority_reject_block_outdated: 4,
        majority_window: 7,
        dns_seeds: &[],
        alert_signing_key: chain.alert_signing_key(),
        payment_protocol_id: "IoP_unittest",
        uri_scheme: chain.uri_scheme(),
        checkpoints: Checkpoints::new(),
        genesis,
    })
}

/// The regtest difficulty floor: 0x7f followed by 32 0xff bytes, wider than
/// any hash, so every block passes.
fn regtest_max_target() -> BigUint {
    (BigUint::from(0x7fu32) << 256) | ((BigUint::from(1u32) << 256) - 1u32)
}

/// Unit-test networks accept literally any hash.
fn unit_test_max_target() -> BigUint {
    (BigUint::from(1u32) << 256) - 1u32
}

fn built(result: Result<ConsensusParams, GenesisError>) -> ConsensusParams {
    match result {
        Ok(params) => params,
        Err(e) => panic!("consensus parameter construction failed: {e}"),
    }
}

pub static BITCOIN_MAINNET: Lazy<ConsensusParams> = Lazy::new(|| built(bitcoin_main()));
pub static BITCOIN_TESTNET: Lazy<ConsensusParams> = Lazy::new(|| built(bitcoin_test()));
pub static BITCOIN_REGTEST: Lazy<ConsensusParams> = Lazy::new(|| built(bitcoin_regtest()));
pub static BITCOIN_UNIT_TESTS: Lazy<ConsensusParams> = Lazy::new(|| built(bitcoin_unit_test()));
pub static IOP_MAINNET: Lazy<ConsensusParams> = Lazy::new(|| built(iop_main()));
pub static IOP_TESTNET: Lazy<ConsensusParams> = Lazy::new(|| built(iop_test()));
pub static IOP_REGTEST: Lazy<ConsensusParams> = Lazy::new(|| built(iop_regtest()));
pub static IOP_UNIT_TESTS: Lazy<ConsensusParams> = Lazy::new(|| built(iop_unit_test()));

/// Look up the singleton parameter set of a network.
pub fn get(chain: Blockchain, kind: NetworkKind) -> &'static ConsensusParams {
    match (chain, kind) {
        (Blockchain::Bitcoin, NetworkKind::Main) => &BITCOIN_MAINNET,
        (Blockchain::Bitcoin, NetworkKind::Test) => &BITCOIN_TESTNET,
        (Blockchain::Bitcoin, NetworkKind::Regtest) => &BITCOIN_REGTEST,
        (Blockchain::Bitcoin, NetworkKind::UnitTest) => &BITCOIN_UNIT_TESTS,
        (Blockchain::InternetOfPeople, NetworkKind::Main) => &IOP_MAINNET,
        (Blockchain::InternetOfPeople, NetworkKind::Test) => &IOP_TESTNET,
        (Blockchain::InternetOfPeople, NetworkKind::Regtest) => &IOP_REGTEST,
        (Blockchain::InternetOfPeople, NetworkKind::UnitTest) => &IOP_UNIT_TESTS,
    }
}

/// String-keyed access to the parameter sets of one chain.
///
/// Callers pick their chain once, carry the registry as a plain value, and
/// resolve ids or payment-protocol strings against it. Two registries for
/// different chains coexist in one process without interfering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainRegistry {
    chain: Blockchain,
}

impl ChainRegistry {
    pub fn new(chain: Blockchain) -> Self {
        ChainRegistry { chain }
    }

    pub fn chain(&self) -> Blockchain {
        self.chain
    }

    /// The parameter set of one network of this registry's chain.
    pub fn params(&self, kind: NetworkKind) -> &'static ConsensusParams {
        get(self.chain, kind)
    }

    /// Resolve a persistent network id, e.g. "org.bitcoin.production".
    pub fn from_id(&self, id: &str) -> Result<&'static ConsensusParams, RegistryError> {
        for kind in [
            NetworkKind::Main,
            NetworkKind::Test,
            NetworkKind::Regtest,
            NetworkKind::UnitTest,
        ] {
            if self.chain.network_id(kind) == id {
                return Ok(get(self.chain, kind));
            }
        }
        Err(RegistryError::UnknownId(id.to_owned()))
    }

    /// Resolve a payment-protocol network string ("main", "test",
    /// "regtest", "unittest").
    pub fn from_payment_protocol_id(
        &self,
        pid: &str,
    ) -> Result<&'static ConsensusParams, RegistryError> {
        match NetworkKind::from_payment_protocol_id(pid) {
            Some(kind) => Ok(get(self.chain, kind)),
            None => Err(RegistryError::UnknownPaymentProtocolId(pid.to_owned())),
        }
    }
}
