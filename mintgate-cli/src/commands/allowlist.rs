// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::exit_code::{
    ingest_exit_code, record_exit_code, ExitCodeError, INVALID_INPUT_EXIT_CODE,
};
use color_eyre::eyre::eyre;
use mintgate::allowlist::{parse_address, read_addresses_csv, AllowlistRecord, AllowlistTree};
use mintgate::config::{duplicate_policy_from_env, AllowlistPaths};

pub fn generate() -> Result<(), ExitCodeError> {
    let paths = AllowlistPaths::from_env();
    let policy = duplicate_policy_from_env();

    println!("Parsing addresses from {}...", paths.csv.display());
    let imported = read_addresses_csv(&paths.csv).map_err(|err| {
        let code = ingest_exit_code(&err);
        (err.into(), code)
    })?;

    println!(
        "Parsed {} addresses ({} rows skipped)",
        imported.addresses.len(),
        imported.skipped.len()
    );
    for row in &imported.skipped {
        println!("  skipped row {}: {:?}", row.line, row.value);
    }

    println!("Generating merkle tree...");
    let tree = AllowlistTree::from_addresses(&imported.addresses, policy)
        .map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    info!("Built allowlist tree with {} leaves", tree.leaf_count());

    let record = AllowlistRecord::from_tree(&tree).map_err(|err| {
        let code = record_exit_code(&err);
        (err.into(), code)
    })?;
    record.save(&paths.record).map_err(|err| {
        let code = record_exit_code(&err);
        (err.into(), code)
    })?;

    println!("Merkle root: {}", record.root);
    println!("✅ Allowlist record saved to {}", paths.record.display());
    Ok(())
}

pub fn check(address: &str) -> Result<(), ExitCodeError> {
    let paths = AllowlistPaths::from_env();
    let record = AllowlistRecord::load(&paths.record).map_err(|err| {
        let code = record_exit_code(&err);
        (err.into(), code)
    })?;

    let address = parse_address(address)
        .ok_or_else(|| (eyre!("Invalid address: {address}"), INVALID_INPUT_EXIT_CODE))?;

    if record.verify_address(&address) {
        println!("✅ {address} is allowlisted");
    } else {
        println!("{address} is not allowlisted");
    }
    Ok(())
}
