//! Implementations of the deployment tasks

use std::{str::FromStr, sync::Arc};

use ethers::{
    providers::Middleware,
    types::{Address, Bytes},
};
use tracing::info;

use crate::{
    cli::{
        DeployContext, DeployImplementationArgs, DeployLzHandleArgs, DeployNftArgs,
        DeployZkHandleArgs, UpgradeArgs,
    },
    deploy::{ContractDeployment, Deployer},
    errors::ScriptError,
    solidity::OptimizedTransparentUpgradeableProxy,
    types::BridgeContract,
    utils::{
        handle_initialize_calldata, nft_bridge_initialize_calldata, parse_nonzero_address,
        print_proxy_verify_command, print_verify_command, write_arguments_file,
        write_deployed_address,
    },
};

/// Deploy the `NFT721Bridge` implementation and its initialized proxy
pub async fn deploy_nft_bridge(
    args: DeployNftArgs,
    client: Arc<impl Middleware>,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    let admin = parse_nonzero_address(&args.admin, "admin")?;
    let init_calldata = nft_bridge_initialize_calldata(args.id)?;

    deploy_with_proxy(BridgeContract::NftBridge, admin, init_calldata, client, ctx).await
}

/// Deploy the `ZKBridgeHandle` implementation and its initialized proxy
pub async fn deploy_zk_handle(
    args: DeployZkHandleArgs,
    client: Arc<impl Middleware>,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    let admin = parse_nonzero_address(&args.admin, "admin")?;
    let user_application = parse_nonzero_address(&args.ua, "user application")?;
    let zk_bridge = parse_nonzero_address(&args.zk, "zkbridge endpoint")?;
    let init_calldata = handle_initialize_calldata(user_application, zk_bridge)?;

    deploy_with_proxy(BridgeContract::ZkHandle, admin, init_calldata, client, ctx).await
}

/// Deploy the `LayerZeroHandle` implementation and its initialized proxy
pub async fn deploy_lz_handle(
    args: DeployLzHandleArgs,
    client: Arc<impl Middleware>,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    let admin = parse_nonzero_address(&args.admin, "admin")?;
    let user_application = parse_nonzero_address(&args.ua, "user application")?;
    let endpoint = parse_nonzero_address(&args.endpoint, "endpoint")?;
    let init_calldata = handle_initialize_calldata(user_application, endpoint)?;

    deploy_with_proxy(BridgeContract::LzHandle, admin, init_calldata, client, ctx).await
}

/// Deploy a bare implementation contract, without a proxy.
///
/// Used to stage the new implementation of an upgrade rollout.
pub async fn deploy_implementation(
    args: DeployImplementationArgs,
    client: Arc<impl Middleware>,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    let contract = args.contract;
    info!("deploying {} implementation to {}", contract, ctx.chain);

    let deployer = Deployer::new(client, ctx.artifact_store());
    let deployed = deployer
        .deploy_plan(vec![ContractDeployment::new(contract.contract_name())])
        .await?;
    let instance = &deployed[0];

    println!("{}:{:#x}", contract.contract_name(), instance.address);
    write_deployed_address(
        &ctx.deployments_path,
        contract.implementation_key(),
        instance.address,
    )?;
    print_verify_command(instance.address, ctx.chain, contract.source_path());

    Ok(())
}

/// Point an existing proxy at a new implementation, optionally delegating
/// migration call data into it.
///
/// The configured private key must be the proxy's admin.
pub async fn upgrade(args: UpgradeArgs, client: Arc<impl Middleware>) -> Result<(), ScriptError> {
    let proxy_address = parse_nonzero_address(&args.proxy, "proxy")?;
    let implementation_address =
        parse_nonzero_address(&args.implementation, "implementation")?;

    let data = if let Some(calldata) = args.calldata {
        Bytes::from_str(&calldata)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?
    } else {
        Bytes::new()
    };

    let proxy = OptimizedTransparentUpgradeableProxy::new(proxy_address, client);
    proxy
        .upgrade_to_and_call(implementation_address, data)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    println!("Proxy {proxy_address:#x} upgraded to {implementation_address:#x}");

    Ok(())
}

/// Deploy an implementation contract and its proxy, record the addresses,
/// and print the operator follow-ups.
///
/// The initializer call data is constructed and validated by the caller
/// before the implementation is broadcast, so an encoding error never
/// leaves an orphaned implementation on-chain.
async fn deploy_with_proxy(
    contract: BridgeContract,
    admin: Address,
    init_calldata: Vec<u8>,
    client: Arc<impl Middleware>,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    info!("deploying {} to {}", contract, ctx.chain);

    let deployer = Deployer::new(client, ctx.artifact_store());
    let deployed = deployer
        .deploy_plan(vec![ContractDeployment::new(contract.contract_name())])
        .await?;
    let implementation = &deployed[0];

    println!("{}:{:#x}", contract.contract_name(), implementation.address);
    print_verify_command(implementation.address, ctx.chain, contract.source_path());
    println!("-------------------------------------------------------------------");
    println!("initData:0x{}", hex::encode(&init_calldata));

    let proxy = deployer
        .deploy_proxy(implementation, admin, init_calldata.clone())
        .await?;
    println!("Proxy:{:#x}", proxy.address);

    write_arguments_file(
        &ctx.arguments_path,
        implementation.address,
        admin,
        &init_calldata,
    )?;
    write_deployed_address(
        &ctx.deployments_path,
        contract.implementation_key(),
        implementation.address,
    )?;
    write_deployed_address(&ctx.deployments_path, contract.proxy_key(), proxy.address)?;

    print_proxy_verify_command(proxy.address, ctx.chain, &ctx.arguments_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ethers::providers::{Http, Provider};

    use crate::{
        cli::{DeployContext, DeployNftArgs},
        errors::ScriptError,
        types::Network,
    };

    use super::deploy_nft_bridge;

    /// A zero admin address is rejected before call data is built or any
    /// transaction broadcast
    #[tokio::test]
    async fn zero_admin_rejected_before_broadcast() {
        // The provider is never connected to; validation fails first
        let client = Arc::new(Provider::<Http>::try_from("http://127.0.0.1:8545").unwrap());
        let ctx = DeployContext {
            chain: Network::BscTest,
            artifacts_path: "artifacts".to_string(),
            deployments_path: "deployments.json".to_string(),
            arguments_path: "arguments.js".to_string(),
        };
        let args = DeployNftArgs {
            id: 119,
            admin: "0x0000000000000000000000000000000000000000".to_string(),
        };

        let err = deploy_nft_bridge(args, client, &ctx).await.unwrap_err();
        assert!(matches!(err, ScriptError::InvalidParameter(_)));
    }
}
