//! Definitions of Solidity functions called during deployment

use ethers::contract::abigen;

/// The initializer of the `NFT721Bridge` implementation.
///
/// Pins the call data layout the dynamic builder must produce for the
/// bridge deployment task.
pub mod nft_bridge {
    use alloy_sol_types::sol;

    sol! {
        function initialize(uint16 _chainId) external;
    }
}

/// The initializer shared by the `ZKBridgeHandle` and `LayerZeroHandle`
/// implementations: the served user application followed by the messaging
/// endpoint.
pub mod handle {
    use alloy_sol_types::sol;

    sol! {
        function initialize(address _userApplication, address _endpoint) external;
    }
}

abigen!(
    OptimizedTransparentUpgradeableProxy,
    r#"[
        function upgradeToAndCall(address newImplementation, bytes memory data) external payable
    ]"#,
);
