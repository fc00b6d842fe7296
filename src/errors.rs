//! Definitions of errors that can occur during the execution of the deployment tasks

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment tasks
#[derive(Debug)]
pub enum ScriptError {
    /// No compiled artifact exists for a requested contract name
    ArtifactNotFound(String),
    /// Error parsing a Solidity compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// The RPC endpoint reports a different chain id than the selected network
    ChainIdMismatch(String),
    /// A task parameter failed validation before anything was broadcast
    InvalidParameter(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// Error writing the proxy constructor-arguments file
    WriteArguments(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ArtifactNotFound(s) => write!(f, "artifact not found: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ChainIdMismatch(s) => write!(f, "chain id mismatch: {}", s),
            ScriptError::InvalidParameter(s) => write!(f, "invalid parameter: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::WriteArguments(s) => write!(f, "error writing arguments file: {}", s),
        }
    }
}

impl Error for ScriptError {}
