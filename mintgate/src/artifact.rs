// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Calldata;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse artifact: {0}")]
    Json(#[from] serde_json::Error),
}

/// A compiled contract artifact as the Solidity toolchain emits it.
///
/// Only the fields the deployment flow needs are read; the ABI itself is
/// baked into the `sol!` bindings.
#[derive(Clone, Debug, Deserialize)]
pub struct ContractArtifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: Option<String>,
    pub bytecode: Calldata,
}

impl ContractArtifact {
    /// Load an artifact JSON file from disk.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = std::fs::read_to_string(path)?;
        let artifact = serde_json::from_str(&json)?;
        Ok(artifact)
    }

    /// Creation bytecode size in KiB.
    ///
    /// Chains cap deployed code size (EIP-170: 24 KiB of runtime code), so
    /// this is worth a look before paying for a deployment.
    pub fn size_kib(&self) -> f64 {
        self.bytecode.len() as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT_JSON: &str = r#"{
        "contractName": "NftDrop",
        "abi": [],
        "bytecode": "0x60806040526000805534801561001457600080fd5b50",
        "deployedBytecode": "0x60806040526000805534"
    }"#;

    #[test]
    fn parses_the_fields_the_deploy_flow_needs() {
        let artifact: ContractArtifact =
            serde_json::from_str(ARTIFACT_JSON).expect("artifact parses");

        assert_eq!(artifact.contract_name.as_deref(), Some("NftDrop"));
        assert_eq!(artifact.bytecode.len(), 22);
        assert!(artifact.size_kib() > 0.0);
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("NftDrop.json");
        std::fs::write(&path, ARTIFACT_JSON).expect("write artifact");

        let artifact = ContractArtifact::load(&path).expect("artifact loads");
        assert_eq!(artifact.contract_name.as_deref(), Some("NftDrop"));
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let result = ContractArtifact::load(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ArtifactError::Io(_))));
    }
}
