//! Definitions of CLI arguments and commands for the deploy scripts

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use ethers::providers::Middleware;

use crate::{
    artifacts::ArtifactStore,
    commands::{deploy_implementation, deploy_lz_handle, deploy_nft_bridge, deploy_zk_handle, upgrade},
    constants::{DEFAULT_ARGUMENTS_PATH, DEFAULT_ARTIFACTS_PATH, DEFAULT_DEPLOYMENTS_PATH},
    errors::ScriptError,
    types::{BridgeContract, Network},
};

/// Deployment tasks for the cross-chain NFT bridge contracts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    // TODO: Better key management
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL; defaults to the selected chain's environment variable
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// The network to deploy to
    #[arg(short, long)]
    pub chain: Network,

    /// Directory holding the compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_PATH)]
    pub artifacts_path: String,

    /// Path of the deployments file the deployed addresses are recorded in
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// Path the proxy constructor arguments are written to
    #[arg(long, default_value = DEFAULT_ARGUMENTS_PATH)]
    pub arguments_path: String,

    /// The deployment task to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available deployment tasks
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the NFT bridge implementation and its initialized proxy
    DeployNft(DeployNftArgs),
    /// Deploy the ZKBridge handle implementation and its initialized proxy
    DeployZkHandle(DeployZkHandleArgs),
    /// Deploy the LayerZero handle implementation and its initialized proxy
    DeployLzHandle(DeployLzHandleArgs),
    /// Deploy a bare implementation contract, without a proxy
    DeployImplementation(DeployImplementationArgs),
    /// Point an existing proxy at a new implementation
    Upgrade(UpgradeArgs),
}

impl Command {
    /// Dispatch the selected task
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        ctx: &DeployContext,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployNft(args) => deploy_nft_bridge(args, client, ctx).await,
            Command::DeployZkHandle(args) => deploy_zk_handle(args, client, ctx).await,
            Command::DeployLzHandle(args) => deploy_lz_handle(args, client, ctx).await,
            Command::DeployImplementation(args) => deploy_implementation(args, client, ctx).await,
            Command::Upgrade(args) => upgrade(args, client).await,
        }
    }
}

/// Deploy the `NFT721Bridge` contract behind an
/// `OptimizedTransparentUpgradeableProxy`.
///
/// The proxy's constructor delegatecalls the encoded `initialize(uint16)`
/// into the implementation, so deployment and initialization are atomic:
/// a reverted initializer reverts the proxy deployment as a whole.
#[derive(Args)]
pub struct DeployNftArgs {
    /// The bridge-side chain id baked into the initializer
    /// (not the EVM chain id of the network)
    #[arg(short, long)]
    pub id: u16,

    /// Admin address for the proxy, in hex; must not be the zero address
    #[arg(short, long)]
    pub admin: String,
}

/// Deploy the `ZKBridgeHandle` contract behind an initialized proxy
#[derive(Args)]
pub struct DeployZkHandleArgs {
    /// Address of the user application the handle serves
    /// (the NFT bridge proxy), in hex
    #[arg(short, long)]
    pub ua: String,

    /// Address of the ZKBridge endpoint, in hex
    #[arg(short, long)]
    pub zk: String,

    /// Admin address for the proxy, in hex; must not be the zero address
    #[arg(short, long)]
    pub admin: String,
}

/// Deploy the `LayerZeroHandle` contract behind an initialized proxy
#[derive(Args)]
pub struct DeployLzHandleArgs {
    /// Address of the user application the handle serves
    /// (the NFT bridge proxy), in hex
    #[arg(short, long)]
    pub ua: String,

    /// Address of the LayerZero endpoint, in hex
    #[arg(short, long)]
    pub endpoint: String,

    /// Admin address for the proxy, in hex; must not be the zero address
    #[arg(short, long)]
    pub admin: String,
}

/// Deploy a bare implementation contract, without a proxy
#[derive(Args)]
pub struct DeployImplementationArgs {
    /// The bridge contract to deploy
    #[arg(short, long)]
    pub contract: BridgeContract,
}

/// Point an existing proxy at a new implementation.
///
/// The configured private key must be the proxy's admin; calls from any
/// other sender fall through to the implementation.
#[derive(Args)]
pub struct UpgradeArgs {
    /// Address of the proxy contract, in hex
    #[arg(long)]
    pub proxy: String,

    /// Address of the new implementation contract, in hex
    #[arg(short, long)]
    pub implementation: String,

    /// Optional calldata, in hex form, with which to call the new
    /// implementation when upgrading
    #[arg(long)]
    pub calldata: Option<String>,
}

/// Per-invocation configuration shared by the deployment tasks
pub struct DeployContext {
    /// The target network
    pub chain: Network,
    /// Directory holding the compiled contract artifacts
    pub artifacts_path: String,
    /// Path of the deployments file
    pub deployments_path: String,
    /// Path the proxy constructor arguments are written to
    pub arguments_path: String,
}

impl DeployContext {
    /// The artifact store rooted at the configured artifacts directory
    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(self.artifacts_path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::types::Network;

    use super::{Cli, Command};

    /// The NFT bridge task parses its parameters and the global options
    #[test]
    fn can_parse_deploy_nft() {
        let cli = Cli::parse_from([
            "nft-bridge-scripts",
            "--priv-key",
            "0xkey",
            "--chain",
            "opbnb_test",
            "deploy-nft",
            "--id",
            "119",
            "--admin",
            "0x1111111111111111111111111111111111111111",
        ]);

        assert_eq!(cli.chain, Network::OpbnbTest);
        assert_eq!(cli.artifacts_path, "artifacts");
        assert_eq!(cli.arguments_path, "arguments.js");
        match cli.command {
            Command::DeployNft(args) => {
                assert_eq!(args.id, 119);
                assert_eq!(args.admin, "0x1111111111111111111111111111111111111111");
            }
            _ => panic!("parsed the wrong command"),
        }
    }

    /// The upgrade task's migration calldata stays optional
    #[test]
    fn can_parse_upgrade_without_calldata() {
        let cli = Cli::parse_from([
            "nft-bridge-scripts",
            "--priv-key",
            "0xkey",
            "--chain",
            "bsc_test",
            "upgrade",
            "--proxy",
            "0x1111111111111111111111111111111111111111",
            "--implementation",
            "0x2222222222222222222222222222222222222222",
        ]);

        match cli.command {
            Command::Upgrade(args) => {
                assert!(args.calldata.is_none());
            }
            _ => panic!("parsed the wrong command"),
        }
    }
}
