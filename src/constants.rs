//! Constants used in the deploy scripts

/// The name of the NFT bridge implementation contract
pub const NFT_BRIDGE_CONTRACT_NAME: &str = "NFT721Bridge";

/// The name of the ZKBridge handle implementation contract
pub const ZK_HANDLE_CONTRACT_NAME: &str = "ZKBridgeHandle";

/// The name of the LayerZero handle implementation contract
pub const LZ_HANDLE_CONTRACT_NAME: &str = "LayerZeroHandle";

/// The name of the upgradeable proxy contract the implementations
/// are deployed behind
pub const PROXY_CONTRACT_NAME: &str = "OptimizedTransparentUpgradeableProxy";

/// The fully qualified source path of the NFT bridge contract,
/// as passed to the block-explorer verification command
pub const NFT_BRIDGE_CONTRACT_PATH: &str = "contracts/NFT721Bridge.sol:NFT721Bridge";

/// The fully qualified source path of the ZKBridge handle contract
pub const ZK_HANDLE_CONTRACT_PATH: &str = "contracts/handle/ZKBridgeHandle.sol:ZKBridgeHandle";

/// The fully qualified source path of the LayerZero handle contract
pub const LZ_HANDLE_CONTRACT_PATH: &str = "contracts/handle/LayerZeroHandle.sol:LayerZeroHandle";

/// The fully qualified source path of the upgradeable proxy contract
pub const PROXY_CONTRACT_PATH: &str =
    "contracts/OptimizedTransparentUpgradeableProxy.sol:OptimizedTransparentUpgradeableProxy";

/// The human-readable signature of the NFT bridge's `initialize` method
pub const NFT_BRIDGE_INIT_SIGNATURE: &str = "initialize(uint16 _chainId)";

/// The human-readable signature of the `initialize` method shared by the
/// ZKBridge and LayerZero handles
pub const HANDLE_INIT_SIGNATURE: &str = "initialize(address _userApplication, address _endpoint)";

/// The number of confirmations to wait for on each deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 1;

/// The default directory searched for compiled contract artifacts
pub const DEFAULT_ARTIFACTS_PATH: &str = "artifacts";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default path of the proxy constructor-arguments file, consumed by the
/// block-explorer verification step
pub const DEFAULT_ARGUMENTS_PATH: &str = "arguments.js";

/// The deployments key in the deployments file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The NFT bridge implementation contract key in the deployments file
pub const NFT_BRIDGE_CONTRACT_KEY: &str = "nft_bridge_contract";

/// The NFT bridge proxy contract key in the deployments file
pub const NFT_BRIDGE_PROXY_CONTRACT_KEY: &str = "nft_bridge_proxy_contract";

/// The ZKBridge handle implementation contract key in the deployments file
pub const ZK_HANDLE_CONTRACT_KEY: &str = "zk_handle_contract";

/// The ZKBridge handle proxy contract key in the deployments file
pub const ZK_HANDLE_PROXY_CONTRACT_KEY: &str = "zk_handle_proxy_contract";

/// The LayerZero handle implementation contract key in the deployments file
pub const LZ_HANDLE_CONTRACT_KEY: &str = "lz_handle_contract";

/// The LayerZero handle proxy contract key in the deployments file
pub const LZ_HANDLE_PROXY_CONTRACT_KEY: &str = "lz_handle_proxy_contract";
