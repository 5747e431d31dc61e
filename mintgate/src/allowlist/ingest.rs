// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read address source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse address source: {0}")]
    Csv(#[from] csv::Error),
}

/// A row that failed address validation and was left out of the leaf set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based row number in the source
    pub line: usize,
    pub value: String,
}

/// The outcome of ingesting an address source.
///
/// Malformed rows are dropped rather than raised, but they are reported here
/// so an operator can tell a clean import from a lossy one.
#[derive(Debug, Default)]
pub struct ImportedAddresses {
    /// Valid addresses in source order, not deduplicated
    pub addresses: Vec<Address>,
    pub skipped: Vec<SkippedRow>,
}

/// Read and validate the allowlist CSV at `path`.
///
/// The address is the first field of each row; surrounding whitespace and
/// single quotes are stripped before validation. A missing or unreadable file
/// is an error; an empty file is an empty import.
pub fn read_addresses_csv(path: &Path) -> Result<ImportedAddresses, IngestError> {
    debug!("Parsing addresses from {}", path.display());
    let file = File::open(path)?;
    import_addresses(file)
}

/// Ingest addresses from any reader. See [`read_addresses_csv`].
pub fn import_addresses<R: Read>(input: R) -> Result<ImportedAddresses, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut imported = ImportedAddresses::default();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let raw = record.get(0).unwrap_or("").replace('\'', "");
        let value = raw.trim();

        match parse_address(value) {
            Some(address) => imported.addresses.push(address),
            None => {
                warn!("Skipping malformed address row {}: {value:?}", index + 1);
                imported.skipped.push(SkippedRow {
                    line: index + 1,
                    value: value.to_string(),
                });
            }
        }
    }

    debug!(
        "Parsed {} addresses ({} rows skipped)",
        imported.addresses.len(),
        imported.skipped.len()
    );

    Ok(imported)
}

/// Parse a wallet address, applying the same validity rule the drop tooling
/// has always used: `0x` plus 40 hex characters, and when the hex part mixes
/// case it must be a correct EIP-55 checksum. Uniform-case input is accepted
/// without a checksum.
pub fn parse_address(raw: &str) -> Option<Address> {
    let value = raw.trim();
    let hex_part = value.strip_prefix("0x")?;
    if hex_part.len() != 40 {
        return None;
    }

    let address = Address::from_str(value).ok()?;

    let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower && address.to_checksum(None) != value {
        return None;
    }

    Some(address)
}
