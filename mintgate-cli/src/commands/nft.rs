// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::exit_code::{
    artifact_exit_code, contract_exit_code, record_exit_code, ExitCodeError,
    INVALID_INPUT_EXIT_CODE,
};
use mintgate::allowlist::AllowlistRecord;
use mintgate::artifact::ContractArtifact;
use mintgate::config::{artifact_path_from_env, AllowlistPaths, ChainConfig, DeployConfig};
use mintgate::contract::nft_drop::NftDropHandler;
use mintgate::wallet::{
    http_provider, http_provider_with_wallet, wallet_address, wallet_from_private_key,
};

/// Push the persisted record's Merkle root to the drop contract.
pub async fn update_root() -> Result<(), ExitCodeError> {
    let config = ChainConfig::from_env().map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let paths = AllowlistPaths::from_env();
    let record = AllowlistRecord::load(&paths.record).map_err(|err| {
        let code = record_exit_code(&err);
        (err.into(), code)
    })?;

    let handler =
        NftDropHandler::connect(&config).map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;

    println!("Updating merkle root on {}...", config.contract_address);
    let tx_hash = handler.update_merkle_root(record.root).await.map_err(|err| {
        let code = contract_exit_code(&err);
        (err.into(), code)
    })?;

    println!("✅ Merkle root set to {} in {tx_hash}", record.root);
    Ok(())
}

/// Mint through the allowlist gate with the configured wallet's own proof.
pub async fn mint() -> Result<(), ExitCodeError> {
    let config = ChainConfig::from_env().map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let paths = AllowlistPaths::from_env();
    let record = AllowlistRecord::load(&paths.record).map_err(|err| {
        let code = record_exit_code(&err);
        (err.into(), code)
    })?;

    let wallet = wallet_from_private_key(&config.signing_key)
        .map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let minter = wallet_address(&wallet);

    // A missing proof is an answer, not a failure.
    let Some(proof) = record.proof_for_address(&minter) else {
        println!("{minter} is not allowlisted");
        return Ok(());
    };
    info!("Found proof of {} hashes for {minter}", proof.len());

    let provider = http_provider_with_wallet(config.rpc_url.clone(), wallet);
    let handler = NftDropHandler::new(config.contract_address, provider);

    println!("Minting with wallet {minter}...");
    let tx_hash = handler.mint(proof).await.map_err(|err| {
        let code = contract_exit_code(&err);
        (err.into(), code)
    })?;

    println!("✅ Minted successfully in {tx_hash}");
    Ok(())
}

/// Read-only look at the drop contract and the configured wallet.
pub async fn status() -> Result<(), ExitCodeError> {
    let config = ChainConfig::from_env().map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let wallet = wallet_from_private_key(&config.signing_key)
        .map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let minter = wallet_address(&wallet);

    let provider = http_provider(config.rpc_url.clone());
    let handler = NftDropHandler::new(config.contract_address, provider);

    let map_contract = |err: mintgate::contract::nft_drop::Error| {
        let code = contract_exit_code(&err);
        (err.into(), code)
    };

    let name = handler.name().await.map_err(map_contract)?;
    let owner = handler.owner().await.map_err(map_contract)?;
    let balance = handler.balance_of(minter).await.map_err(map_contract)?;

    println!("Contract name:  {name}");
    println!("Contract owner: {owner}");
    println!("Wallet address: {minter}");
    println!("Wallet balance: {balance}");
    Ok(())
}

/// Deploy the drop contract from a compiled artifact.
pub async fn deploy() -> Result<(), ExitCodeError> {
    let config = DeployConfig::from_env().map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let artifact = ContractArtifact::load(&config.artifact_path).map_err(|err| {
        let code = artifact_exit_code(&err);
        (err.into(), code)
    })?;

    let wallet = wallet_from_private_key(&config.signing_key)
        .map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let provider = http_provider_with_wallet(config.rpc_url.clone(), wallet);

    if let Some(contract_name) = &artifact.contract_name {
        println!("Deploying {contract_name}...");
    } else {
        println!("Deploying contract...");
    }
    let handler = NftDropHandler::deploy(
        provider,
        &artifact,
        config.base_uri.clone(),
        config.token_gate_address,
    )
    .await
    .map_err(|err| {
        let code = contract_exit_code(&err);
        (err.into(), code)
    })?;

    println!("✅ Contract deployed to: {}", handler.contract.address());
    Ok(())
}

/// Report an artifact's creation bytecode size.
pub fn size() -> Result<(), ExitCodeError> {
    let path = artifact_path_from_env().map_err(|err| (err.into(), INVALID_INPUT_EXIT_CODE))?;
    let artifact = ContractArtifact::load(&path).map_err(|err| {
        let code = artifact_exit_code(&err);
        (err.into(), code)
    })?;

    println!("Contract size: {:.2} KiB", artifact.size_kib());
    Ok(())
}
