// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use alloy::network::{Ethereum, EthereumWallet, NetworkWallet};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
    SimpleNonceManager, WalletFiller,
};
use alloy::providers::{Identity, ProviderBuilder, RootProvider};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Private key is invalid")]
    PrivateKeyInvalid,
}

/// Construct a signing wallet from a raw private key, with or without the
/// `0x` prefix.
pub fn wallet_from_private_key(private_key: &str) -> Result<EthereumWallet, Error> {
    let private_key = private_key.trim().trim_start_matches("0x");
    let signer: PrivateKeySigner = private_key.parse().map_err(|err| {
        error!("Could not parse private key: {err}");
        Error::PrivateKeyInvalid
    })?;
    Ok(EthereumWallet::from(signer))
}

/// The address transactions will be sent from.
pub fn wallet_address(wallet: &EthereumWallet) -> Address {
    NetworkWallet::<Ethereum>::default_signer_address(wallet)
}

/// Read-only HTTP provider stack.
pub type HttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        NonceFiller<SimpleNonceManager>,
    >,
    RootProvider,
    Ethereum,
>;

/// HTTP provider stack with a local signing wallet attached.
pub type WalletHttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            JoinFill<
                Identity,
                JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
            >,
            NonceFiller<SimpleNonceManager>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider,
    Ethereum,
>;

pub fn http_provider(rpc_url: reqwest::Url) -> HttpProvider {
    ProviderBuilder::new()
        .with_simple_nonce_management()
        .connect_http(rpc_url)
}

pub fn http_provider_with_wallet(
    rpc_url: reqwest::Url,
    wallet: EthereumWallet,
) -> WalletHttpProvider {
    ProviderBuilder::new()
        .with_simple_nonce_management()
        .wallet(wallet)
        .connect_http(rpc_url)
}
