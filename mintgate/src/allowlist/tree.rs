// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Hash};
use alloy::primitives::keccak256;
use rs_merkle::Hasher;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Errors that can occur when building an allowlist tree
#[derive(Debug, Error)]
pub enum AllowlistTreeError {
    #[error("Cannot build a Merkle tree from an empty address set")]
    EmptyAddressSet,
    #[error("Invalid leaf index: {index} (tree has {leaf_count} leaves)")]
    InvalidLeafIndex { index: usize, leaf_count: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AllowlistTreeError>;

/// How repeated input addresses are treated during a build.
///
/// The on-chain gate only checks proof validity, so a duplicated address does
/// not mint twice either way; this merely controls how many leaves commit to
/// it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// One leaf per input row, duplicates included.
    #[default]
    Keep,
    /// Collapse repeats onto their first occurrence.
    Dedupe,
}

/// Hash a wallet address into its allowlist leaf.
pub fn leaf_hash(address: &Address) -> Hash {
    keccak256(address.as_slice())
}

/// Keccak256 hasher with position-independent pair combination.
///
/// Siblings are sorted bytewise before concatenation, so a proof carries no
/// left/right information and verifies the same way the drop contract does.
/// An odd node at any level is promoted unchanged.
#[derive(Clone)]
pub struct SortedKeccak256;

impl Hasher for SortedKeccak256 {
    type Hash = [u8; 32];

    fn hash(data: &[u8]) -> Self::Hash {
        keccak256(data).0
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right) => {
                let mut data = [0u8; 64];
                let (first, second) = if left <= right {
                    (left, right)
                } else {
                    (right, left)
                };
                data[..32].copy_from_slice(first);
                data[32..].copy_from_slice(second);
                keccak256(data).0
            }
            None => *left,
        }
    }

    fn hash_size() -> usize {
        32
    }
}

/// A Merkle tree committing to an ordered set of allowlisted addresses.
///
/// The root is what gets published on-chain; per-leaf proofs are what wallets
/// present to the membership-gated mint. Given the same ordered input, every
/// rebuild reproduces the root and all proofs bit for bit.
pub struct AllowlistTree {
    /// The underlying rs_merkle tree
    inner: rs_merkle::MerkleTree<SortedKeccak256>,

    /// Leaf hashes in input order
    leaves: Vec<Hash>,

    /// The root hash of the tree
    root: Hash,
}

impl AllowlistTree {
    /// Build a tree over the given addresses, in order.
    ///
    /// # Errors
    ///
    /// `EmptyAddressSet` if no addresses remain after applying `policy`; an
    /// empty tree has no root worth committing to.
    pub fn from_addresses(addresses: &[Address], policy: DuplicatePolicy) -> Result<Self> {
        let leaves: Vec<Hash> = match policy {
            DuplicatePolicy::Keep => addresses.iter().map(leaf_hash).collect(),
            DuplicatePolicy::Dedupe => {
                let mut seen = HashSet::new();
                addresses
                    .iter()
                    .filter(|address| seen.insert(**address))
                    .map(leaf_hash)
                    .collect()
            }
        };

        if leaves.is_empty() {
            return Err(AllowlistTreeError::EmptyAddressSet);
        }

        let leaf_bytes: Vec<[u8; 32]> = leaves.iter().map(|leaf| leaf.0).collect();
        let inner = rs_merkle::MerkleTree::<SortedKeccak256>::from_leaves(&leaf_bytes);

        let root = inner.root().ok_or_else(|| {
            AllowlistTreeError::Internal("Tree must have root after construction".to_string())
        })?;

        Ok(Self {
            inner,
            leaves,
            root: Hash::from(root),
        })
    }

    /// The root hash committed on-chain.
    pub fn root(&self) -> Hash {
        self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf hashes in input order.
    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    /// Generate the sibling-hash proof for the leaf at `index`.
    ///
    /// # Errors
    ///
    /// `InvalidLeafIndex` if `index >= leaf_count`.
    pub fn proof(&self, index: usize) -> Result<Vec<Hash>> {
        if index >= self.leaves.len() {
            return Err(AllowlistTreeError::InvalidLeafIndex {
                index,
                leaf_count: self.leaves.len(),
            });
        }

        let proof = self.inner.proof(&[index]);
        Ok(proof.proof_hashes().iter().map(|h| Hash::from(*h)).collect())
    }

    /// Proofs for every leaf, keyed by leaf hash.
    ///
    /// A repeated leaf keeps the proof of its last occurrence; with sorted
    /// pairs any occurrence's proof verifies.
    pub fn proofs(&self) -> Result<BTreeMap<Hash, Vec<Hash>>> {
        let mut proofs = BTreeMap::new();
        for (index, leaf) in self.leaves.iter().enumerate() {
            proofs.insert(*leaf, self.proof(index)?);
        }
        Ok(proofs)
    }
}

/// Recompute a candidate root from `leaf` and `proof` and compare it to
/// `root`.
///
/// This is the position-free fold the drop contract performs on-chain; it
/// must stay in lockstep with [`SortedKeccak256`].
pub fn verify_proof(leaf: &Hash, proof: &[Hash], root: &Hash) -> bool {
    let computed = proof.iter().fold(leaf.0, |node, sibling| {
        SortedKeccak256::concat_and_hash(&node, Some(&sibling.0))
    });
    Hash::from(computed) == *root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_addresses(count: usize) -> Vec<Address> {
        (0..count)
            .map(|i| {
                let mut bytes = [0u8; 20];
                bytes[12..].copy_from_slice(&(i as u64 + 1).to_be_bytes());
                Address::from(bytes)
            })
            .collect()
    }

    #[test]
    fn rebuilds_are_bit_identical() {
        let addresses = make_addresses(25);

        let tree1 = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();
        let tree2 = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();

        assert_eq!(tree1.root(), tree2.root());
        assert_eq!(tree1.proofs().unwrap(), tree2.proofs().unwrap());
    }

    #[test]
    fn two_leaf_tree_has_expected_shape() {
        let addresses = make_addresses(2);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();

        let leaf_a = leaf_hash(&addresses[0]);
        let leaf_b = leaf_hash(&addresses[1]);

        // Each leaf's proof is just the other leaf.
        assert_eq!(tree.proof(0).unwrap(), vec![leaf_b]);
        assert_eq!(tree.proof(1).unwrap(), vec![leaf_a]);

        // Root is the sorted-pair hash of the two leaves, whichever way round.
        let expected = SortedKeccak256::concat_and_hash(&leaf_a.0, Some(&leaf_b.0));
        let flipped = SortedKeccak256::concat_and_hash(&leaf_b.0, Some(&leaf_a.0));
        assert_eq!(expected, flipped);
        assert_eq!(tree.root(), Hash::from(expected));
    }

    #[test]
    fn every_leaf_proof_verifies() {
        let addresses = make_addresses(100);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();
        let root = tree.root();

        for (index, leaf) in tree.leaves().iter().enumerate() {
            let proof = tree.proof(index).unwrap();
            assert!(verify_proof(leaf, &proof, &root), "leaf {index} must verify");
        }
    }

    #[test]
    fn odd_leaf_is_carried_up_unchanged() {
        let addresses = make_addresses(3);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();

        // Leaves 0 and 1 pair up, leaf 2 rides along to the next level: its
        // proof is the single hash of the (0, 1) pair.
        let pair = SortedKeccak256::concat_and_hash(
            &leaf_hash(&addresses[0]).0,
            Some(&leaf_hash(&addresses[1]).0),
        );
        assert_eq!(tree.proof(2).unwrap(), vec![Hash::from(pair)]);
        assert_eq!(tree.proof(0).unwrap().len(), 2);

        let root = tree.root();
        for (index, leaf) in tree.leaves().iter().enumerate() {
            assert!(verify_proof(leaf, &tree.proof(index).unwrap(), &root));
        }
    }

    #[test]
    fn tampered_proof_fails_verification() {
        let addresses = make_addresses(10);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();
        let root = tree.root();

        let leaf = tree.leaves()[4];
        let mut proof = tree.proof(4).unwrap();
        proof[0].0[7] ^= 0x01;

        assert!(!verify_proof(&leaf, &proof, &root));
    }

    #[test]
    fn non_member_leaf_fails_verification() {
        let addresses = make_addresses(10);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();

        let outsider = leaf_hash(&Address::repeat_byte(0xee));
        let proof = tree.proof(0).unwrap();

        assert!(!verify_proof(&outsider, &proof, &tree.root()));
    }

    #[test]
    fn single_leaf_root_is_the_leaf() {
        let addresses = make_addresses(1);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();

        let leaf = leaf_hash(&addresses[0]);
        assert_eq!(tree.root(), leaf);

        let proof = tree.proof(0).unwrap();
        assert!(proof.is_empty());
        assert!(verify_proof(&leaf, &proof, &tree.root()));
    }

    #[test]
    fn empty_address_set_is_rejected() {
        let result = AllowlistTree::from_addresses(&[], DuplicatePolicy::Keep);
        assert!(matches!(result, Err(AllowlistTreeError::EmptyAddressSet)));
    }

    #[test]
    fn duplicate_policy_controls_leaf_count() {
        let mut addresses = make_addresses(2);
        addresses.push(addresses[0]);

        let kept = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();
        assert_eq!(kept.leaf_count(), 3);
        // The proofs map collapses the repeated leaf either way.
        assert_eq!(kept.proofs().unwrap().len(), 2);

        let deduped = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Dedupe).unwrap();
        assert_eq!(deduped.leaf_count(), 2);
    }

    #[test]
    fn duplicate_leaf_proof_still_verifies() {
        let mut addresses = make_addresses(4);
        addresses.push(addresses[1]);

        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();
        let root = tree.root();
        let proofs = tree.proofs().unwrap();

        let leaf = leaf_hash(&addresses[1]);
        let proof = proofs.get(&leaf).expect("duplicate leaf must have a proof");
        assert!(verify_proof(&leaf, proof, &root));
    }

    #[test]
    fn proof_index_out_of_bounds() {
        let addresses = make_addresses(4);
        let tree = AllowlistTree::from_addresses(&addresses, DuplicatePolicy::Keep).unwrap();

        let result = tree.proof(4);
        assert!(matches!(
            result,
            Err(AllowlistTreeError::InvalidLeafIndex { .. })
        ));
    }
}
