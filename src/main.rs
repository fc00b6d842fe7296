use clap::Parser;
use nft_bridge_scripts::{
    cli::{Cli, DeployContext},
    errors::ScriptError,
    utils::{resolve_rpc_url, setup_client},
};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        chain,
        artifacts_path,
        deployments_path,
        arguments_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let rpc_url = resolve_rpc_url(chain, rpc_url)?;
    let client = setup_client(&priv_key, &rpc_url, chain.chain_id()).await?;

    let ctx = DeployContext {
        chain,
        artifacts_path,
        deployments_path,
        arguments_path,
    };

    command.run(client, &ctx).await
}
