//! Utilities for the deploy scripts

use std::{
    env,
    fs::{self, File},
    io::Read,
    path::PathBuf,
    str::FromStr,
    sync::Arc,
};

use ethers::{
    abi::Token,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, U256},
};
use json::JsonValue;

use crate::{
    calldata::CalldataBuilder,
    constants::{
        DEPLOYMENTS_KEY, HANDLE_INIT_SIGNATURE, NFT_BRIDGE_INIT_SIGNATURE, PROXY_CONTRACT_PATH,
    },
    errors::ScriptError,
    types::Network,
};

/// Sets up the client with which the deployment transactions are broadcast,
/// validating that the RPC endpoint reports the chain id of the selected
/// network before anything is sent.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
    expected_chain_id: u64,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();

    if chain_id != expected_chain_id {
        return Err(ScriptError::ChainIdMismatch(format!(
            "network expects chain id {expected_chain_id}, RPC endpoint reports {chain_id}"
        )));
    }

    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// Resolve the RPC URL for a network: an explicit `--rpc-url` wins,
/// otherwise the network's environment variable is consulted
pub fn resolve_rpc_url(chain: Network, rpc_url: Option<String>) -> Result<String, ScriptError> {
    match rpc_url {
        Some(url) => Ok(url),
        None => env::var(chain.rpc_url_env_var()).map_err(|_| {
            ScriptError::ClientInitialization(format!(
                "no RPC URL for {chain}: pass --rpc-url or set {}",
                chain.rpc_url_env_var()
            ))
        }),
    }
}

/// Parse an operator-provided address, rejecting the zero address
pub fn parse_nonzero_address(value: &str, label: &str) -> Result<Address, ScriptError> {
    let address = Address::from_str(value)
        .map_err(|e| ScriptError::InvalidParameter(format!("{label}: {e}")))?;

    if address == Address::zero() {
        return Err(ScriptError::InvalidParameter(format!(
            "{label} must not be the zero address"
        )));
    }

    Ok(address)
}

/// Prepare call data for the NFT bridge's `initialize` method
pub fn nft_bridge_initialize_calldata(chain_id: u16) -> Result<Vec<u8>, ScriptError> {
    CalldataBuilder::for_function(NFT_BRIDGE_INIT_SIGNATURE)?
        .with_args(vec![Token::Uint(U256::from(chain_id))])
        .build()
}

/// Prepare call data for a handle's `initialize` method
pub fn handle_initialize_calldata(
    user_application: Address,
    endpoint: Address,
) -> Result<Vec<u8>, ScriptError> {
    CalldataBuilder::for_function(HANDLE_INIT_SIGNATURE)?
        .with_args(vec![
            Token::Address(user_application),
            Token::Address(endpoint),
        ])
        .build()
}

/// Overwrite the proxy constructor-arguments file consumed by the
/// block-explorer verification step.
///
/// The file holds exactly the three-element list
/// `[implementation, admin, init call data]` of the most recent run,
/// serialized as a loadable JavaScript module.
pub fn write_arguments_file(
    path: &str,
    implementation: Address,
    admin: Address,
    init_calldata: &[u8],
) -> Result<(), ScriptError> {
    let arguments = [
        format!("{implementation:#x}"),
        format!("{admin:#x}"),
        format!("0x{}", hex::encode(init_calldata)),
    ];
    let serialized = serde_json::to_string(&arguments)
        .map_err(|e| ScriptError::WriteArguments(e.to_string()))?;

    fs::write(path, format!("module.exports = {serialized}"))
        .map_err(|e| ScriptError::WriteArguments(e.to_string()))
}

/// Parse the deployments file into JSON
pub fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Read a previously recorded contract address from the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &str,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    let parsed_json = get_json_from_file(file_path)?;

    Address::from_str(
        parsed_json[DEPLOYMENTS_KEY][contract_key]
            .as_str()
            .ok_or_else(|| {
                ScriptError::ReadDeployments(
                    "could not parse contract address from deployments file".to_string(),
                )
            })?,
    )
    .map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Record a deployed contract address in the deployments file, creating the
/// file on first use and merging with previously recorded keys
pub fn write_deployed_address(
    file_path: &str,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    }
    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[DEPLOYMENTS_KEY][contract_key] = JsonValue::String(format!("{address:#x}"));

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    Ok(())
}

/// Print the block-explorer verification command for a deployed
/// implementation contract
pub fn print_verify_command(address: Address, chain: Network, contract_path: &str) {
    println!("npx hardhat verify {address:#x} --network {chain} --contract {contract_path}");
}

/// Print the verification command for a deployed proxy, whose constructor
/// arguments are read from the arguments file
pub fn print_proxy_verify_command(address: Address, chain: Network, arguments_path: &str) {
    println!(
        "npx hardhat verify {address:#x} --network {chain} --constructor-args {arguments_path} --contract {PROXY_CONTRACT_PATH}"
    );
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use alloy_primitives::Address as AlloyAddress;
    use alloy_sol_types::SolCall;
    use ethers::types::Address;

    use crate::{
        errors::ScriptError,
        solidity::{handle, nft_bridge},
        types::Network,
    };

    use super::{
        handle_initialize_calldata, nft_bridge_initialize_calldata, parse_addr_from_deployments_file,
        parse_nonzero_address, resolve_rpc_url, write_arguments_file, write_deployed_address,
    };

    /// A unique temp path per test, stable across runs
    fn temp_path(name: &str) -> String {
        env::temp_dir().join(name).to_str().unwrap().to_string()
    }

    /// The dynamically built initializer call data is byte-identical to the
    /// statically typed encoding
    #[test]
    fn typed_and_dynamic_initializer_encodings_agree() {
        let dynamic = nft_bridge_initialize_calldata(119).unwrap();
        let typed = nft_bridge::initializeCall { _chainId: 119 }.abi_encode();
        assert_eq!(dynamic, typed);

        let user_application = Address::repeat_byte(0x11);
        let endpoint = Address::repeat_byte(0x22);
        let dynamic = handle_initialize_calldata(user_application, endpoint).unwrap();
        let typed = handle::initializeCall {
            _userApplication: AlloyAddress::from_slice(user_application.as_bytes()),
            _endpoint: AlloyAddress::from_slice(endpoint.as_bytes()),
        }
        .abi_encode();
        assert_eq!(dynamic, typed);
    }

    /// The arguments file holds exactly the three-element list of the most
    /// recent run; prior content is fully replaced
    #[test]
    fn arguments_file_is_overwritten() {
        let path = temp_path("nft-bridge-scripts-arguments-test.js");
        let implementation = Address::repeat_byte(0x11);
        let admin = Address::repeat_byte(0x22);

        write_arguments_file(&path, implementation, admin, &[0x13, 0x75, 0x09, 0x46]).unwrap();
        write_arguments_file(&path, implementation, admin, &[0xaa]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let serialized = contents.strip_prefix("module.exports = ").unwrap();
        let arguments: Vec<String> = serde_json::from_str(serialized).unwrap();
        assert_eq!(
            arguments,
            vec![
                format!("{implementation:#x}"),
                format!("{admin:#x}"),
                "0xaa".to_string(),
            ]
        );
    }

    /// Recorded addresses merge per key and read back exactly
    #[test]
    fn deployments_file_merges_keys() {
        let path = temp_path("nft-bridge-scripts-deployments-test.json");
        let _ = fs::remove_file(&path);

        write_deployed_address(&path, "nft_bridge_contract", Address::repeat_byte(1)).unwrap();
        write_deployed_address(&path, "nft_bridge_proxy_contract", Address::repeat_byte(2))
            .unwrap();

        assert_eq!(
            parse_addr_from_deployments_file(&path, "nft_bridge_contract").unwrap(),
            Address::repeat_byte(1)
        );
        assert_eq!(
            parse_addr_from_deployments_file(&path, "nft_bridge_proxy_contract").unwrap(),
            Address::repeat_byte(2)
        );
    }

    /// The zero address and unparseable input are both rejected
    #[test]
    fn nonzero_address_validation() {
        let valid = "0x1111111111111111111111111111111111111111";
        assert_eq!(
            parse_nonzero_address(valid, "admin").unwrap(),
            Address::repeat_byte(0x11)
        );

        let zero = "0x0000000000000000000000000000000000000000";
        let err = parse_nonzero_address(zero, "admin").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidParameter(_)));

        let err = parse_nonzero_address("not an address", "admin").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidParameter(_)));
    }

    /// An explicit `--rpc-url` wins over the network's environment variable
    #[test]
    fn explicit_rpc_url_wins() {
        let url = resolve_rpc_url(Network::BscTest, Some("http://localhost:8545".to_string()))
            .unwrap();
        assert_eq!(url, "http://localhost:8545");
    }

    /// With neither `--rpc-url` nor the environment variable set, client
    /// setup fails before anything is broadcast
    #[test]
    fn missing_rpc_url_is_an_error() {
        env::remove_var(Network::ComboTest.rpc_url_env_var());
        let err = resolve_rpc_url(Network::ComboTest, None).unwrap_err();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));
    }
}
