//! Chain and network-kind selectors and their identifier vocabulary.

use core::fmt;

/// A supported blockchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blockchain {
    /// Bitcoin
    Bitcoin,
    /// Internet of People
    InternetOfPeople,
}

/// Which flavor of a chain a parameter set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkKind {
    /// The production network where people trade things.
    Main,
    /// The public test network.
    Test,
    /// Regression-test mode for local app development.
    Regtest,
    /// Unit-test mode; allows any difficulty and solves its own genesis.
    UnitTest,
}

/// The string used by the payment protocol to represent the main net.
pub const PAYMENT_PROTOCOL_ID_MAINNET: &str = "main";
/// The string used by the payment protocol to represent the test net.
pub const PAYMENT_PROTOCOL_ID_TESTNET: &str = "test";
/// The string used by the payment protocol to represent regtest mode.
pub const PAYMENT_PROTOCOL_ID_REGTEST: &str = "regtest";
/// The string used by the payment protocol for unit testing (non-standard).
pub const PAYMENT_PROTOCOL_ID_UNIT_TESTS: &str = "unittest";

impl Blockchain {
    /// Short ticker for this chain.
    pub fn ticker(&self) -> &'static str {
        match self {
            Blockchain::Bitcoin => "BTC",
            Blockchain::InternetOfPeople => "IoP",
        }
    }

    /// Parse a chain from its ticker.
    pub fn from_ticker(s: &str) -> Option<Self> {
        match s {
            "BTC" => Some(Blockchain::Bitcoin),
            "IoP" => Some(Blockchain::InternetOfPeople),
            _ => None,
        }
    }

    /// Scheme part for URIs, for example "bitcoin:...".
    pub fn uri_scheme(&self) -> &'static str {
        match self {
            Blockchain::Bitcoin => "bitcoin",
            Blockchain::InternetOfPeople => "IoP",
        }
    }

    /// The globally unique parameter-set id for one network of this chain.
    ///
    /// These package-style strings are the persistent identifiers wallets
    /// store, so they are part of the public vocabulary and never change.
    pub fn network_id(&self, kind: NetworkKind) -> &'static str {
        match (self, kind) {
            (Blockchain::Bitcoin, NetworkKind::Main) => "org.bitcoin.production",
            (Blockchain::Bitcoin, NetworkKind::Test) => "org.bitcoin.test",
            (Blockchain::Bitcoin, NetworkKind::Regtest) => "org.bitcoin.regtest",
            (Blockchain::Bitcoin, NetworkKind::UnitTest) => "org.bitcoin.unittest",
            (Blockchain::InternetOfPeople, NetworkKind::Main) => "org.IoP.production",
            (Blockchain::InternetOfPeople, NetworkKind::Test) => "org.IoP.test",
            (Blockchain::InternetOfPeople, NetworkKind::Regtest) => "org.IoP.regtest",
            (Blockchain::InternetOfPeople, NetworkKind::UnitTest) => "org.IoP.unittest",
        }
    }

    /// The key historically used to sign alert messages on this chain.
    pub fn alert_signing_key(&self) -> &'static str {
        match self {
            Blockchain::Bitcoin => {
                "04fc9702847840aaf195de8442ebecedf5b095cdbb9bc716bda9110971b28a49e0ead8564ff0db22209e0374782c093bb899692d524e9d6a6956e7c5ecbcd68284"
            }
            Blockchain::InternetOfPeople => {
                "04db0f57cd33acb1bbef6088ace7cfd417d943936f9594eaa9d25e62e5af4a43ffb31830cbcc9c499b935e2961e3e77b5644cfbb316096d0d931b34427f8fab682"
            }
        }
    }

    /// The coinbase input script of this chain's genesis block: the
    /// difficulty bits followed by the historical newspaper headline.
    pub fn genesis_coinbase_script(&self) -> &'static str {
        match self {
            // "The Times 03/Jan/2009 Chancellor on brink of second bailout
            // for banks"
            Blockchain::Bitcoin => {
                "04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73"
            }
            // "La Nacion May 16th 2016 - Sarmiento cerca del descenso"
            Blockchain::InternetOfPeople => {
                "04ffff001d0104364c61204e6163696f6e204d617920313674682032303136202d205361726d69656e746f2063657263612064656c2064657363656e736f"
            }
        }
    }

    /// The public key the genesis coinbase output pays to.
    pub fn genesis_output_key(&self) -> &'static str {
        match self {
            Blockchain::Bitcoin => {
                "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f"
            }
            Blockchain::InternetOfPeople => {
                "04ce49f9cdc8d23176c818fd7e27e7b614d128a47acfdad0e4542300e7efbd8879f1337af3188c0dcb0747fdf26d0cb3b0fca0f4e5d7aec53c43f4a933f570ae86"
            }
        }
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

impl NetworkKind {
    /// Map a payment-protocol string to a network kind.
    ///
    /// The lookup vocabulary is fixed: "main", "test", "regtest",
    /// "unittest". Note the unit-test networks *report* chain-qualified ids
    /// (see `ConsensusParams::payment_protocol_id`) while still being
    /// addressed by the plain form here.
    pub fn from_payment_protocol_id(pid: &str) -> Option<Self> {
        match pid {
            PAYMENT_PROTOCOL_ID_MAINNET => Some(NetworkKind::Main),
            PAYMENT_PROTOCOL_ID_TESTNET => Some(NetworkKind::Test),
            PAYMENT_PROTOCOL_ID_REGTEST => Some(NetworkKind::Regtest),
            PAYMENT_PROTOCOL_ID_UNIT_TESTS => Some(NetworkKind::UnitTest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_roundtrip() {
        for chain in [Blockchain::Bitcoin, Blockchain::InternetOfPeople] {
            assert_eq!(Blockchain::from_ticker(chain.ticker()), Some(chain));
        }
        assert_eq!(Blockchain::from_ticker("DOGE"), None);
    }

    #[test]
    fn test_network_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for chain in [Blockchain::Bitcoin, Blockchain::InternetOfPeople] {
            for kind in [
                NetworkKind::Main,
                NetworkKind::Test,
                NetworkKind::Regtest,
                NetworkKind::UnitTest,
            ] {
                assert!(seen.insert(chain.network_id(kind)));
            }
        }
    }

    #[test]
    fn test_payment_protocol_vocabulary() {
        assert_eq!(NetworkKind::from_payment_protocol_id("main"), Some(NetworkKind::Main));
        assert_eq!(NetworkKind::from_payment_protocol_id("test"), Some(NetworkKind::Test));
        assert_eq!(NetworkKind::from_payment_protocol_id("regtest"), Some(NetworkKind::Regtest));
        assert_eq!(NetworkKind::from_payment_protocol_id("unittest"), Some(NetworkKind::UnitTest));
        assert_eq!(NetworkKind::from_payment_protocol_id("prod"), None);
    }
}
