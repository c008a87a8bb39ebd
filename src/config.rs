// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Client configuration, read from `thoughtverse.toml`.
//!
//! ```toml
//! rpc_url = "http://127.0.0.1:8545"
//! contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
//! artifact = "artifacts/contracts/ContentPlatform.sol/ContentPlatform.json"
//! posting_fee = "0.0002"
//!
//! [confirmation]
//! poll_interval_ms = 500
//! timeout_secs = 120
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::address::{self, Address};
use crate::contract::ConfirmationPolicy;
use crate::error::{Error, Result};
use crate::units::parse_ether;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "thoughtverse.toml";

/// Endpoint used when nothing else is configured.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet provider.
    pub rpc_url: String,
    /// Address of the deployed contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    /// Build artifact describing the contract interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    /// Posting fee to pay, in ether. Read from the contract when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_fee: Option<String>,
    /// Transaction confirmation settings.
    pub confirmation: ConfirmationConfig,
}

/// `[confirmation]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfirmationConfig {
    /// Delay between receipt polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Seconds to wait for a receipt before giving up.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: None,
            artifact: None,
            posting_fee: None,
            confirmation: ConfirmationConfig::default(),
        }
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        let policy = ConfirmationPolicy::default();
        Self {
            poll_interval_ms: u64::try_from(policy.poll_interval.as_millis()).unwrap_or(u64::MAX),
            timeout_secs: policy.timeout.as_secs(),
        }
    }
}

impl Config {
    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Reads `path` when given (it must exist), otherwise [`CONFIG_FILE`]
    /// from `dir` when present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Fails when an explicit path is missing or any file is malformed.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let default = dir.join(CONFIG_FILE);
        if default.is_file() {
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// The parsed contract address.
    ///
    /// # Errors
    ///
    /// Fails when no address is configured or it is malformed.
    pub fn contract_address(&self) -> Result<Address> {
        self.contract_address
            .as_deref()
            .ok_or_else(|| {
                Error::Config(format!(
                    "no contract address configured; set contract_address in {CONFIG_FILE} or pass --contract"
                ))
            })
            .and_then(address::parse)
    }

    /// The posting fee override, if any.
    ///
    /// # Errors
    ///
    /// Fails when the configured value is not a valid ether amount.
    pub fn posting_fee(&self) -> Result<Option<U256>> {
        self.posting_fee.as_deref().map(parse_ether).transpose()
    }

    /// Confirmation policy derived from the `[confirmation]` table.
    #[must_use]
    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy {
            poll_interval: Duration::from_millis(self.confirmation.poll_interval_ms),
            timeout: Duration::from_secs(self.confirmation.timeout_secs),
        }
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| Error::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.confirmation_policy(), ConfirmationPolicy::default());
        assert!(config.contract_address().is_err());
        assert_eq!(config.posting_fee().unwrap(), None);
    }

    #[test]
    fn reads_file_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
rpc_url = "http://node:8545"
contract_address = "0x5fbdb2315678afecb367f032d93f642f64180aa3"
posting_fee = "0.0002"

[confirmation]
poll_interval_ms = 10
"#,
        )
        .unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(
            config.contract_address().unwrap().to_string(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(config.posting_fee().unwrap(), Some(U256::from(200_000_000_000_000u64)));
        assert_eq!(
            config.confirmation_policy().poll_interval,
            Duration::from_millis(10)
        );
        // unspecified keys in a table keep their defaults
        assert_eq!(config.confirmation.timeout_secs, 120);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let err = Config::discover(Some(&dir.path().join("missing.toml")), dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "rpc = \"typo\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn renders_back_to_toml() {
        let config = Config {
            contract_address: Some("0x5fbdb2315678afecb367f032d93f642f64180aa3".to_string()),
            ..Config::default()
        };
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("rpc_url = \"http://127.0.0.1:8545\""));
        assert!(rendered.contains("[confirmation]"));
        assert!(!rendered.contains("artifact"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
