//! Resolution of compiled contract artifacts by name

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use ethers::{abi::Abi, types::Bytes};
use serde_json::Value;

use crate::errors::ScriptError;

/// A compiled contract: its ABI and creation bytecode
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// The contract's ABI
    pub abi: Abi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
}

/// Looks up compiled artifacts by contract name under a build output
/// directory, following the nested `contracts/<Name>.sol/<Name>.json`
/// layout the contract toolchain emits
pub struct ArtifactStore {
    /// The root of the build output directory
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given build output directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a contract's artifact by name.
    ///
    /// Fails with [`ScriptError::ArtifactNotFound`] when no artifact exists
    /// for the name, i.e. the contract was never built or the build output
    /// is stale.
    pub fn load(&self, contract_name: &str) -> Result<ContractArtifact, ScriptError> {
        let file_name = format!("{contract_name}.json");
        let path = find_artifact(&self.root, &file_name).ok_or_else(|| {
            ScriptError::ArtifactNotFound(format!(
                "no artifact for `{contract_name}` under {}",
                self.root.display()
            ))
        })?;

        let raw =
            fs::read_to_string(&path).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        let artifact: Value =
            serde_json::from_str(&raw).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        let abi: Abi = serde_json::from_value(artifact["abi"].clone())
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        let bytecode_str = artifact["bytecode"].as_str().ok_or_else(|| {
            ScriptError::ArtifactParsing(format!("`{contract_name}` artifact has no bytecode"))
        })?;
        let bytecode = Bytes::from_str(bytecode_str)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        // An empty bytecode string marks an interface or abstract contract
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "`{contract_name}` has no deployable bytecode"
            )));
        }

        Ok(ContractArtifact { abi, bytecode })
    }
}

/// Walk the build output directory looking for the artifact file
fn find_artifact(dir: &Path, file_name: &str) -> Option<PathBuf> {
    for entry in fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = find_artifact(&path, file_name) {
                return Some(found);
            }
        } else if path.file_name() == Some(OsStr::new(file_name)) {
            return Some(path);
        }
    }

    None
}
