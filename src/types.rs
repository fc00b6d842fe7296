//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use clap::ValueEnum;

use crate::constants::{
    LZ_HANDLE_CONTRACT_KEY, LZ_HANDLE_CONTRACT_NAME, LZ_HANDLE_CONTRACT_PATH,
    LZ_HANDLE_PROXY_CONTRACT_KEY, NFT_BRIDGE_CONTRACT_KEY, NFT_BRIDGE_CONTRACT_NAME,
    NFT_BRIDGE_CONTRACT_PATH, NFT_BRIDGE_PROXY_CONTRACT_KEY, ZK_HANDLE_CONTRACT_KEY,
    ZK_HANDLE_CONTRACT_NAME, ZK_HANDLE_CONTRACT_PATH, ZK_HANDLE_PROXY_CONTRACT_KEY,
};

/// The named networks the bridge contracts deploy to
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// The opBNB testnet
    #[value(name = "opbnb_test")]
    OpbnbTest,
    /// The Combo testnet
    #[value(name = "combo_test")]
    ComboTest,
    /// The BSC testnet
    #[value(name = "bsc_test")]
    BscTest,
}

impl Network {
    /// The chain id the network's RPC endpoint must report
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::OpbnbTest => 5611,
            Network::ComboTest => 91715,
            Network::BscTest => 97,
        }
    }

    /// The environment variable consulted for the network's RPC URL when
    /// no `--rpc-url` is given
    pub fn rpc_url_env_var(&self) -> &'static str {
        match self {
            Network::OpbnbTest => "OPBNB_TESTNET_URL",
            Network::ComboTest => "COMBO_TESTNET_URL",
            Network::BscTest => "BSC_TESTNET_URL",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::OpbnbTest => write!(f, "opbnb_test"),
            Network::ComboTest => write!(f, "combo_test"),
            Network::BscTest => write!(f, "bsc_test"),
        }
    }
}

/// The bridge implementation contracts the scripts can deploy
#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum BridgeContract {
    /// The NFT bridge contract
    NftBridge,
    /// The ZKBridge message handle contract
    ZkHandle,
    /// The LayerZero message handle contract
    LzHandle,
}

impl BridgeContract {
    /// The contract name the artifact store resolves
    pub fn contract_name(&self) -> &'static str {
        match self {
            BridgeContract::NftBridge => NFT_BRIDGE_CONTRACT_NAME,
            BridgeContract::ZkHandle => ZK_HANDLE_CONTRACT_NAME,
            BridgeContract::LzHandle => LZ_HANDLE_CONTRACT_NAME,
        }
    }

    /// The fully qualified source path passed to the verification command
    pub fn source_path(&self) -> &'static str {
        match self {
            BridgeContract::NftBridge => NFT_BRIDGE_CONTRACT_PATH,
            BridgeContract::ZkHandle => ZK_HANDLE_CONTRACT_PATH,
            BridgeContract::LzHandle => LZ_HANDLE_CONTRACT_PATH,
        }
    }

    /// The implementation contract key in the deployments file
    pub fn implementation_key(&self) -> &'static str {
        match self {
            BridgeContract::NftBridge => NFT_BRIDGE_CONTRACT_KEY,
            BridgeContract::ZkHandle => ZK_HANDLE_CONTRACT_KEY,
            BridgeContract::LzHandle => LZ_HANDLE_CONTRACT_KEY,
        }
    }

    /// The proxy contract key in the deployments file
    pub fn proxy_key(&self) -> &'static str {
        match self {
            BridgeContract::NftBridge => NFT_BRIDGE_PROXY_CONTRACT_KEY,
            BridgeContract::ZkHandle => ZK_HANDLE_PROXY_CONTRACT_KEY,
            BridgeContract::LzHandle => LZ_HANDLE_PROXY_CONTRACT_KEY,
        }
    }
}

impl Display for BridgeContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeContract::NftBridge => write!(f, "nft-bridge"),
            BridgeContract::ZkHandle => write!(f, "zk-handle"),
            BridgeContract::LzHandle => write!(f, "lz-handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The network table matches the chain ids of the deployment targets
    #[test]
    fn network_chain_ids() {
        assert_eq!(Network::OpbnbTest.chain_id(), 5611);
        assert_eq!(Network::ComboTest.chain_id(), 91715);
        assert_eq!(Network::BscTest.chain_id(), 97);
    }

    /// Display names match the network names used in verification commands
    #[test]
    fn network_display_names() {
        assert_eq!(Network::OpbnbTest.to_string(), "opbnb_test");
        assert_eq!(Network::ComboTest.to_string(), "combo_test");
        assert_eq!(Network::BscTest.to_string(), "bsc_test");
    }

    /// Each contract resolves to its own artifact name and deployment keys
    #[test]
    fn bridge_contract_names_and_keys() {
        assert_eq!(BridgeContract::NftBridge.contract_name(), "NFT721Bridge");
        assert_eq!(BridgeContract::ZkHandle.contract_name(), "ZKBridgeHandle");
        assert_eq!(BridgeContract::LzHandle.contract_name(), "LayerZeroHandle");
        assert_eq!(
            BridgeContract::NftBridge.implementation_key(),
            "nft_bridge_contract"
        );
        assert_eq!(
            BridgeContract::NftBridge.proxy_key(),
            "nft_bridge_proxy_contract"
        );
    }
}
