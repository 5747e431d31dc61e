// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod allowlist;
mod nft;

use crate::exit_code::ExitCodeError;
use crate::opt::Opt;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum SubCmd {
    /// Build the Merkle allowlist record from the address CSV.
    ///
    /// Reads `ALLOWLIST_CSV` (default store/addresses.csv) and writes
    /// `ALLOWLIST_RECORD` (default store/merkletree.json).
    Generate,

    /// Check whether an address holds a valid proof in the allowlist record.
    Check {
        /// The wallet address to check.
        address: String,
    },

    /// Push the allowlist record's Merkle root to the drop contract.
    UpdateRoot,

    /// Mint through the allowlist gate with the configured wallet.
    Mint,

    /// Show the drop contract's name, owner and the configured wallet's balance.
    Status,

    /// Deploy the drop contract from a compiled artifact.
    Deploy,

    /// Print the creation bytecode size of a compiled artifact.
    Size,
}

pub async fn handle_subcommand(opt: Opt) -> Result<(), ExitCodeError> {
    match opt.command {
        SubCmd::Generate => allowlist::generate(),
        SubCmd::Check { address } => allowlist::check(&address),
        SubCmd::UpdateRoot => nft::update_root().await,
        SubCmd::Mint => nft::mint().await,
        SubCmd::Status => nft::status().await,
        SubCmd::Deploy => nft::deploy().await,
        SubCmd::Size => nft::size(),
    }
}
