//! Typed construction of contract call data

use ethers::abi::{Function, HumanReadableParser, Token};

use crate::errors::ScriptError;

/// Builds the call data for a contract method: the 4-byte selector of the
/// method's canonical signature followed by the ABI-encoded argument list,
/// in declared parameter order.
///
/// Encoding is deterministic in (signature, arguments) and performs no
/// network interaction; arity and type mismatches fail here, before any
/// transaction is constructed.
#[derive(Debug)]
pub struct CalldataBuilder {
    /// The parsed target function
    function: Function,
    /// The argument list, in declared parameter order
    args: Vec<Token>,
}

impl CalldataBuilder {
    /// Parse a human-readable function signature,
    /// e.g. `initialize(uint16 _chainId)`
    pub fn for_function(signature: &str) -> Result<Self, ScriptError> {
        let function = HumanReadableParser::parse_function(signature).map_err(|e| {
            ScriptError::CalldataConstruction(format!(
                "invalid function signature `{signature}`: {e}"
            ))
        })?;

        Ok(Self {
            function,
            args: Vec::new(),
        })
    }

    /// Set the argument list, in declared parameter order
    pub fn with_args(mut self, args: Vec<Token>) -> Self {
        self.args = args;
        self
    }

    /// The 4-byte selector of the function's canonical signature
    pub fn selector(&self) -> [u8; 4] {
        self.function.short_signature()
    }

    /// Encode the call data, checking the argument list against the
    /// function's declared parameters
    pub fn build(self) -> Result<Vec<u8>, ScriptError> {
        if self.args.len() != self.function.inputs.len() {
            return Err(ScriptError::CalldataConstruction(format!(
                "`{}` takes {} arguments, got {}",
                self.function.name,
                self.function.inputs.len(),
                self.args.len()
            )));
        }

        self.function
            .encode_input(&self.args)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
    }
}
