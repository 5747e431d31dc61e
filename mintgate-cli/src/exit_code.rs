// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use color_eyre::eyre::Report;
use mintgate::allowlist::{ingest::IngestError, RecordError};
use mintgate::artifact::ArtifactError;
use mintgate::contract::nft_drop;

pub(crate) const INVALID_INPUT_EXIT_CODE: i32 = 6;
pub(crate) const SERIALIZATION_ERROR: i32 = 11;
pub(crate) const IO_ERROR: i32 = 12;
pub(crate) const NETWORK_ERROR: i32 = 13;

pub(crate) type ExitCodeError = (Report, i32);

pub(crate) fn ingest_exit_code(err: &IngestError) -> i32 {
    match err {
        IngestError::Io(_) => IO_ERROR,
        IngestError::Csv(_) => SERIALIZATION_ERROR,
    }
}

pub(crate) fn record_exit_code(err: &RecordError) -> i32 {
    match err {
        RecordError::Io(_) => IO_ERROR,
        RecordError::Json(_) => SERIALIZATION_ERROR,
        RecordError::Tree(_) => INVALID_INPUT_EXIT_CODE,
    }
}

pub(crate) fn artifact_exit_code(err: &ArtifactError) -> i32 {
    match err {
        ArtifactError::Io(_) => IO_ERROR,
        ArtifactError::Json(_) => SERIALIZATION_ERROR,
    }
}

pub(crate) fn contract_exit_code(err: &nft_drop::Error) -> i32 {
    match err {
        nft_drop::Error::ContractError(_)
        | nft_drop::Error::RpcError(_)
        | nft_drop::Error::PendingTransactionError(_)
        | nft_drop::Error::MissingContractAddress => NETWORK_ERROR,
    }
}
