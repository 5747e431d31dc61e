// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::artifact::ContractArtifact;
use crate::common::{Address, Calldata, Hash, TxHash, U256};
use crate::config::ChainConfig;
use crate::wallet::{self, http_provider_with_wallet, WalletHttpProvider};
use alloy::network::{Ethereum, Network, ReceiptResponse, TransactionBuilder};
use alloy::providers::Provider;
use alloy::sol;
use alloy::sol_types::SolConstructor;
use alloy::transports::{RpcError, TransportErrorKind};

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract NftDrop {
        constructor(string baseURI, address tokenGate);

        function mint(bytes32[] calldata proof) external;
        function updateMerkleRoot(bytes32 merkleRoot) external;

        function owner() external view returns (address);
        function name() external view returns (string memory);
        function balanceOf(address holder) external view returns (uint256);
    }
);

pub use NftDrop::NftDropInstance;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ContractError(#[from] alloy::contract::Error),
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    PendingTransactionError(#[from] alloy::providers::PendingTransactionError),
    #[error("Deployment receipt carries no contract address")]
    MissingContractAddress,
}

/// Handle on a deployed membership-gated drop contract.
///
/// Every state-changing call broadcasts a single transaction and waits for it
/// to be confirmed; failures surface as-is.
pub struct NftDropHandler<P: Provider<N>, N: Network> {
    pub contract: NftDropInstance<P, N>,
}

impl NftDropHandler<WalletHttpProvider, Ethereum> {
    /// Connect a signing handler from explicit configuration.
    ///
    /// The config is the only source of endpoint, key and contract address;
    /// there is no ambient client anywhere in this crate.
    pub fn connect(config: &ChainConfig) -> Result<Self, wallet::Error> {
        let signer = wallet::wallet_from_private_key(&config.signing_key)?;
        let provider = http_provider_with_wallet(config.rpc_url.clone(), signer);
        Ok(Self::new(config.contract_address, provider))
    }
}

impl<P, N> NftDropHandler<P, N>
where
    P: Provider<N>,
    N: Network,
{
    /// Create a new handler instance from the drop contract's address.
    pub fn new(contract_address: Address, provider: P) -> Self {
        let contract = NftDrop::new(contract_address, provider);
        Self { contract }
    }

    /// Set the provider
    pub fn set_provider(&mut self, provider: P) {
        let address = *self.contract.address();
        self.contract = NftDrop::new(address, provider);
    }

    /// Deploy the drop contract from a compiled artifact.
    ///
    /// Appends the ABI-encoded constructor arguments to the artifact's
    /// creation bytecode and waits for the deployment receipt.
    pub async fn deploy(
        provider: P,
        artifact: &ContractArtifact,
        base_uri: String,
        token_gate: Address,
    ) -> Result<Self, Error> {
        let constructor = NftDrop::constructorCall {
            baseURI: base_uri,
            tokenGate: token_gate,
        };
        let mut code = artifact.bytecode.to_vec();
        code.extend_from_slice(&constructor.abi_encode());

        let transaction_request = provider.transaction_request().with_deploy_code(code);

        let receipt = provider
            .send_transaction(transaction_request)
            .await
            .inspect_err(|err| error!("Error sending deployment transaction: {err:?}"))?
            .get_receipt()
            .await
            .inspect_err(|err| error!("Error awaiting deployment receipt: {err:?}"))?;

        let contract_address = receipt
            .contract_address()
            .ok_or(Error::MissingContractAddress)?;
        info!("Drop contract deployed at {contract_address}");

        Ok(Self::new(contract_address, provider))
    }

    /// Call the membership-gated mint with the sender's inclusion proof.
    pub async fn mint(&self, proof: Vec<Hash>) -> Result<TxHash, Error> {
        let (calldata, to) = self.mint_calldata(proof);
        self.send_transaction(calldata, to, "mint").await
    }

    /// Returns the mint transaction calldata.
    pub fn mint_calldata(&self, proof: Vec<Hash>) -> (Calldata, Address) {
        let calldata = self.contract.mint(proof).calldata().to_owned();
        (calldata, *self.contract.address())
    }

    /// Replace the contract's stored Merkle root.
    pub async fn update_merkle_root(&self, root: Hash) -> Result<TxHash, Error> {
        let (calldata, to) = self.update_merkle_root_calldata(root);
        self.send_transaction(calldata, to, "updateMerkleRoot").await
    }

    /// Returns the root-update transaction calldata.
    pub fn update_merkle_root_calldata(&self, root: Hash) -> (Calldata, Address) {
        let calldata = self
            .contract
            .updateMerkleRoot(root)
            .calldata()
            .to_owned();
        (calldata, *self.contract.address())
    }

    /// Get the contract owner.
    pub async fn owner(&self) -> Result<Address, Error> {
        let owner = self.contract.owner().call().await?;
        Ok(owner)
    }

    /// Get the collection name.
    pub async fn name(&self) -> Result<String, Error> {
        let name = self.contract.name().call().await?;
        Ok(name)
    }

    /// Get the number of tokens held by `holder`.
    pub async fn balance_of(&self, holder: Address) -> Result<U256, Error> {
        debug!("Getting balance of holder: {holder}");
        let balance = self.contract.balanceOf(holder).call().await?;
        Ok(balance)
    }

    async fn send_transaction(
        &self,
        calldata: Calldata,
        to: Address,
        tx_identifier: &str,
    ) -> Result<TxHash, Error> {
        let transaction_request = self
            .contract
            .provider()
            .transaction_request()
            .with_to(to)
            .with_input(calldata);

        let pending_tx_builder = self
            .contract
            .provider()
            .send_transaction(transaction_request)
            .await
            .inspect_err(|err| error!("Error sending {tx_identifier} transaction: {err:?}"))?;

        let pending_tx_hash = *pending_tx_builder.tx_hash();
        debug!("{tx_identifier} transaction is pending with hash: {pending_tx_hash}");

        let tx_hash = pending_tx_builder
            .watch()
            .await
            .inspect_err(|err| error!("Error watching {tx_identifier} transaction: {err:?}"))?;

        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{http_provider, HttpProvider};
    use alloy::sol_types::SolCall;

    fn offline_handler() -> NftDropHandler<HttpProvider, Ethereum> {
        let rpc_url = "http://localhost:8545".parse().expect("valid URL");
        NftDropHandler::new(Address::repeat_byte(0x42), http_provider(rpc_url))
    }

    #[test]
    fn mint_calldata_targets_the_contract_with_the_right_selector() {
        let handler = offline_handler();
        let proof = vec![Hash::repeat_byte(0x01), Hash::repeat_byte(0x02)];

        let (calldata, to) = handler.mint_calldata(proof);

        assert_eq!(to, Address::repeat_byte(0x42));
        assert_eq!(calldata[..4], NftDrop::mintCall::SELECTOR[..]);
        // selector + offset + length + 2 proof words
        assert_eq!(calldata.len(), 4 + 32 * 4);
    }

    #[test]
    fn update_root_calldata_encodes_the_root() {
        let handler = offline_handler();
        let root = Hash::repeat_byte(0xaa);

        let (calldata, _) = handler.update_merkle_root_calldata(root);

        assert_eq!(calldata[..4], NftDrop::updateMerkleRootCall::SELECTOR[..]);
        assert_eq!(calldata[4..], root.as_slice()[..]);
    }
}
