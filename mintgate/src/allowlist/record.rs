// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::tree::{leaf_hash, verify_proof, AllowlistTree, AllowlistTreeError};
use crate::common::{Address, Hash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tree(#[from] AllowlistTreeError),
}

/// The persisted allowlist: the published root plus one proof per leaf.
///
/// This file is the whole contract between the builder and everything that
/// verifies or mints later. Hashes serialize as lowercase `0x` hex, the same
/// convention the drop contract's stored root uses, so records written by the
/// previous tooling remain readable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowlistRecord {
    pub root: Hash,
    pub proofs: BTreeMap<Hash, Vec<Hash>>,
}

impl AllowlistRecord {
    /// Snapshot a built tree into its persistable form.
    pub fn from_tree(tree: &AllowlistTree) -> Result<Self, RecordError> {
        Ok(Self {
            root: tree.root(),
            proofs: tree.proofs()?,
        })
    }

    /// Load a previously saved record.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let json = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&json)?;
        Ok(record)
    }

    /// Write the record to `path`, replacing any previous one wholesale.
    ///
    /// Parent directories are created as needed. Nothing is written until the
    /// whole record has been serialized.
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!("Allowlist record saved to {}", path.display());
        Ok(())
    }

    /// Look up the stored proof for a leaf hash.
    pub fn proof_for(&self, leaf: &Hash) -> Option<&[Hash]> {
        self.proofs.get(leaf).map(Vec::as_slice)
    }

    /// Look up the stored proof for a wallet address.
    pub fn proof_for_address(&self, address: &Address) -> Option<Vec<Hash>> {
        self.proofs.get(&leaf_hash(address)).cloned()
    }

    /// Check whether `address` is a member of the allowlist.
    ///
    /// Recomputes the leaf, looks up its proof and re-derives the root. An
    /// absent proof is an ordinary `false`, not a fault.
    pub fn verify_address(&self, address: &Address) -> bool {
        let leaf = leaf_hash(address);
        match self.proofs.get(&leaf) {
            Some(proof) => verify_proof(&leaf, proof, &self.root),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::tree::DuplicatePolicy;

    fn make_addresses(count: usize) -> Vec<Address> {
        (0..count)
            .map(|i| {
                let mut bytes = [0u8; 20];
                bytes[0] = 0x10;
                bytes[19] = i as u8;
                Address::from(bytes)
            })
            .collect()
    }

    fn make_record(addresses: &[Address]) -> AllowlistRecord {
        let tree = AllowlistTree::from_addresses(addresses, DuplicatePolicy::Keep)
            .expect("tree should build");
        AllowlistRecord::from_tree(&tree).expect("record should build")
    }

    #[test]
    fn members_verify_and_outsiders_do_not() {
        let addresses = make_addresses(7);
        let record = make_record(&addresses);

        for address in &addresses {
            assert!(record.verify_address(address));
        }

        let outsider = Address::repeat_byte(0xcc);
        assert!(record.proof_for(&leaf_hash(&outsider)).is_none());
        assert!(!record.verify_address(&outsider));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store").join("merkletree.json");

        let record = make_record(&make_addresses(5));
        record.save(&path).expect("save should succeed");

        let loaded = AllowlistRecord::load(&path).expect("load should succeed");
        assert_eq!(record, loaded);
    }

    #[test]
    fn persisted_shape_matches_the_wire_contract() {
        let record = make_record(&make_addresses(3));
        let value = serde_json::to_value(&record).expect("serializes");

        let root = value["root"].as_str().expect("root is a string");
        assert!(root.starts_with("0x"));
        assert_eq!(root.len(), 66);
        assert_eq!(root, root.to_lowercase());

        let proofs = value["proofs"].as_object().expect("proofs is an object");
        assert_eq!(proofs.len(), 3);
        for (leaf, proof) in proofs {
            assert!(leaf.starts_with("0x"));
            assert_eq!(leaf.len(), 66);
            for sibling in proof.as_array().expect("proof is an array") {
                let sibling = sibling.as_str().expect("sibling is a string");
                assert!(sibling.starts_with("0x"));
                assert_eq!(sibling, sibling.to_lowercase());
            }
        }
    }

    #[test]
    fn tampered_stored_proof_fails_verification() {
        let addresses = make_addresses(6);
        let mut record = make_record(&addresses);

        let leaf = leaf_hash(&addresses[2]);
        let proof = record.proofs.get_mut(&leaf).expect("proof exists");
        proof[0].0[0] ^= 0x01;

        assert!(!record.verify_address(&addresses[2]));
        // The other members are untouched.
        assert!(record.verify_address(&addresses[0]));
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("merkletree.json");

        make_record(&make_addresses(4)).save(&path).expect("save");
        let replacement = make_record(&make_addresses(2));
        replacement.save(&path).expect("overwrite");

        let loaded = AllowlistRecord::load(&path).expect("load");
        assert_eq!(loaded, replacement);
        assert_eq!(loaded.proofs.len(), 2);
    }
}
