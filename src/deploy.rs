//! The deployment orchestrator: broadcasts contract creation transactions
//! in plan order and wires up the upgradeable proxy

use std::sync::Arc;

use ethers::{
    abi::Token,
    contract::ContractFactory,
    providers::Middleware,
    types::{Address, H256},
};
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    constants::{NUM_DEPLOY_CONFIRMATIONS, PROXY_CONTRACT_NAME},
    errors::ScriptError,
};

/// A single step of a deployment plan
pub struct ContractDeployment {
    /// Name of the contract artifact to deploy
    pub name: String,
    /// Values for the contract's constructor, in declared order
    pub constructor_args: Vec<Token>,
}

impl ContractDeployment {
    /// A deployment step for a contract without constructor arguments
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            constructor_args: Vec::new(),
        }
    }
}

/// The on-chain result of a deployment step
#[derive(Clone, Debug)]
pub struct DeployedInstance {
    /// Name of the deployed contract
    pub name: String,
    /// Address the contract was created at
    pub address: Address,
    /// Hash of the creation transaction
    pub transaction_hash: H256,
}

/// Deploys contracts against a single network target.
///
/// Each broadcast blocks until the creation transaction is confirmed; there
/// is no retry, and a failed step leaves earlier deployments on-chain for
/// the operator to reconcile.
pub struct Deployer<M> {
    /// The RPC client the creation transactions are broadcast through
    client: Arc<M>,
    /// The compiled-artifact store backing the deployments
    artifacts: ArtifactStore,
}

impl<M: Middleware> Deployer<M> {
    /// Create a deployer over the given client and artifact store
    pub fn new(client: Arc<M>, artifacts: ArtifactStore) -> Self {
        Self { client, artifacts }
    }

    /// Deploy the contracts of a plan in order.
    ///
    /// Returns one instance per plan entry. The first failing step aborts
    /// the remaining ones; contracts deployed by earlier steps are not
    /// rolled back.
    pub async fn deploy_plan(
        &self,
        plan: Vec<ContractDeployment>,
    ) -> Result<Vec<DeployedInstance>, ScriptError> {
        let mut deployed = Vec::with_capacity(plan.len());
        for step in plan {
            deployed.push(self.deploy_contract(&step.name, step.constructor_args).await?);
        }

        Ok(deployed)
    }

    /// Deploy a single contract, resolving its artifact by name
    pub async fn deploy_contract(
        &self,
        name: &str,
        constructor_args: Vec<Token>,
    ) -> Result<DeployedInstance, ScriptError> {
        let artifact = self.artifacts.load(name)?;
        let factory = ContractFactory::new(artifact.abi, artifact.bytecode, self.client.clone());

        let (contract, receipt) = factory
            .deploy_tokens(constructor_args)
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .send_with_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        info!("{} deployed at {:#x}", name, contract.address());

        Ok(DeployedInstance {
            name: name.to_string(),
            address: contract.address(),
            transaction_hash: receipt.transaction_hash,
        })
    }

    /// Deploy the upgradeable proxy wired to a freshly deployed
    /// implementation.
    ///
    /// The proxy's constructor delegatecalls `init_calldata` into the
    /// implementation atomically with deployment; a revert there reverts
    /// the whole creation transaction.
    pub async fn deploy_proxy(
        &self,
        implementation: &DeployedInstance,
        admin: Address,
        init_calldata: Vec<u8>,
    ) -> Result<DeployedInstance, ScriptError> {
        let constructor_args = vec![
            Token::Address(implementation.address),
            Token::Address(admin),
            Token::Bytes(init_calldata),
        ];

        self.deploy_contract(PROXY_CONTRACT_NAME, constructor_args).await
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, sync::Arc};

    use ethers::providers::{Http, Provider};

    use crate::{artifacts::ArtifactStore, errors::ScriptError};

    use super::{ContractDeployment, Deployer};

    /// A plan stops at the first unresolvable artifact, before any network
    /// interaction
    #[tokio::test]
    async fn missing_artifact_fails_before_broadcast() {
        let dir = env::temp_dir().join("nft-bridge-scripts-deploy-empty-artifacts");
        fs::create_dir_all(&dir).unwrap();

        // The provider is never connected to; artifact resolution fails first
        let client = Arc::new(Provider::<Http>::try_from("http://127.0.0.1:8545").unwrap());
        let deployer = Deployer::new(client, ArtifactStore::new(dir));

        let err = deployer
            .deploy_plan(vec![ContractDeployment::new("NoSuchContract")])
            .await
            .unwrap_err();
        assert!(matches!(err, ScriptError::ArtifactNotFound(_)));
    }
}
