// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

pub mod ingest;
pub mod record;
pub mod tree;

pub use ingest::{
    import_addresses, parse_address, read_addresses_csv, ImportedAddresses, IngestError,
    SkippedRow,
};
pub use record::{AllowlistRecord, RecordError};
pub use tree::{leaf_hash, verify_proof, AllowlistTree, AllowlistTreeError, DuplicatePolicy};
