// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::allowlist::tree::DuplicatePolicy;
use crate::common::Address;
use alloy::transports::http::reqwest;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// environment variable holding the HTTP RPC endpoint
pub const RPC_URL: &str = "RPC_URL";
/// environment variable holding the signing key for transactions
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
/// environment variable holding the deployed drop contract address
pub const CONTRACT_ADDRESS: &str = "CONTRACT_ADDRESS";
/// environment variable overriding the allowlist CSV path
pub const ALLOWLIST_CSV: &str = "ALLOWLIST_CSV";
/// environment variable overriding the allowlist record path
pub const ALLOWLIST_RECORD: &str = "ALLOWLIST_RECORD";
/// environment variable enabling address deduplication during tree builds
pub const ALLOWLIST_DEDUPE: &str = "ALLOWLIST_DEDUPE";
/// environment variable holding the compiled contract artifact path
pub const ARTIFACT_PATH: &str = "ARTIFACT_PATH";
/// environment variable holding the token base URI passed to the constructor
pub const NFT_BASE_URI: &str = "NFT_BASE_URI";
/// environment variable holding the gate token contract address passed to the constructor
pub const TOKEN_GATE_ADDRESS: &str = "TOKEN_GATE_ADDRESS";

const DEFAULT_ALLOWLIST_CSV: &str = "store/addresses.csv";
const DEFAULT_ALLOWLIST_RECORD: &str = "store/merkletree.json";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing env var, make sure to set {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid RPC URL in {RPC_URL}: {0}")]
    InvalidRpcUrl(String),
    #[error("Invalid address in {0}: {1}")]
    InvalidAddress(&'static str, String),
}

/// Everything needed to talk to the deployed drop contract.
///
/// Constructed explicitly and handed to whichever handler needs it; nothing in
/// this crate reads the environment behind the caller's back.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub rpc_url: reqwest::Url,
    pub signing_key: String,
    pub contract_address: Address,
}

impl ChainConfig {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            rpc_url: rpc_url_from_env()?,
            signing_key: require_env(PRIVATE_KEY)?,
            contract_address: address_from_env(CONTRACT_ADDRESS)?,
        })
    }
}

/// Inputs for deploying the drop contract from a compiled artifact.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub rpc_url: reqwest::Url,
    pub signing_key: String,
    pub artifact_path: PathBuf,
    pub base_uri: String,
    pub token_gate_address: Address,
}

impl DeployConfig {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            rpc_url: rpc_url_from_env()?,
            signing_key: require_env(PRIVATE_KEY)?,
            artifact_path: artifact_path_from_env()?,
            base_uri: require_env(NFT_BASE_URI)?,
            token_gate_address: address_from_env(TOKEN_GATE_ADDRESS)?,
        })
    }
}

/// Where the allowlist builder reads from and writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowlistPaths {
    pub csv: PathBuf,
    pub record: PathBuf,
}

impl AllowlistPaths {
    /// Paths from the environment, falling back to the `store/` layout.
    pub fn from_env() -> Self {
        let csv = env::var(ALLOWLIST_CSV).unwrap_or_else(|_| DEFAULT_ALLOWLIST_CSV.to_string());
        let record =
            env::var(ALLOWLIST_RECORD).unwrap_or_else(|_| DEFAULT_ALLOWLIST_RECORD.to_string());
        Self {
            csv: PathBuf::from(csv),
            record: PathBuf::from(record),
        }
    }
}

/// Duplicate handling for tree builds, from `ALLOWLIST_DEDUPE`.
pub fn duplicate_policy_from_env() -> DuplicatePolicy {
    match env::var(ALLOWLIST_DEDUPE) {
        Ok(value) if value == "1" || value.eq_ignore_ascii_case("true") => DuplicatePolicy::Dedupe,
        _ => DuplicatePolicy::Keep,
    }
}

pub fn artifact_path_from_env() -> Result<PathBuf, Error> {
    require_env(ARTIFACT_PATH).map(PathBuf::from)
}

fn require_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnvVar(name))
}

fn rpc_url_from_env() -> Result<reqwest::Url, Error> {
    let raw = require_env(RPC_URL)?;
    reqwest::Url::parse(&raw).map_err(|_| Error::InvalidRpcUrl(raw))
}

fn address_from_env(name: &'static str) -> Result<Address, Error> {
    let raw = require_env(name)?;
    Address::from_str(&raw).map_err(|_| Error::InvalidAddress(name, raw))
}
