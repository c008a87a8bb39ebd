// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Reading the contract interface description.
//!
//! Accepts either a Hardhat/Foundry build artifact (an object with an `abi`
//! member) or a bare ABI array.

use std::fs;
use std::path::Path;

use alloy_json_abi::{Error as ErrorDecl, JsonAbi};
use serde_json::Value;

use crate::error::{Error, Result};

/// What the client needs from the contract's interface description.
#[derive(Debug, Clone, Default)]
pub struct ContractInterface {
    /// `contractName` of the artifact, when present.
    pub contract_name: Option<String>,
    /// Canonical signatures of every function.
    pub functions: Vec<String>,
    /// Custom errors the contract may revert with.
    pub errors: Vec<ErrorDecl>,
}

impl ContractInterface {
    /// Loads an artifact file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not an artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses artifact JSON.
    ///
    /// # Errors
    ///
    /// Fails when the JSON has neither an `abi` member nor a top-level array,
    /// or when the ABI itself is malformed.
    pub fn parse(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;

        let (contract_name, abi) = match value {
            Value::Array(_) => (None, value),
            Value::Object(mut object) => {
                let name = object
                    .get("contractName")
                    .and_then(Value::as_str)
                    .map(ToString::to_string);
                let abi = object
                    .remove("abi")
                    .ok_or_else(|| Error::Config("artifact has no 'abi' member".to_string()))?;
                (name, abi)
            }
            _ => return Err(Error::Config("artifact is not a JSON object or array".to_string())),
        };

        let abi: JsonAbi = serde_json::from_value(abi)?;
        Ok(Self {
            contract_name,
            functions: abi.functions().map(|f| f.signature()).collect(),
            errors: abi.errors().cloned().collect(),
        })
    }

    /// Signatures from `required` that the interface does not declare.
    #[must_use]
    pub fn missing_functions<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|sig| !self.functions.iter().any(|f| f == sig))
            .collect()
    }
}
