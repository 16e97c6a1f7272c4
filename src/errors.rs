// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors which may occur when parsing keys and/or signatures to or from wire formats.

use thiserror::Error;

/// Represents an error in the multi-signature aggregation protocol.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum MuSigError {
    /// A revealed commit point does not hash to the commitment published in round 1.
    #[error("revealed commit point does not match its commitment hash")]
    MismatchedCommitment,

    /// An aggregation step was handed an empty signer set.
    #[error("the signer set is empty")]
    NotEnoughParticipants,

    /// The challenge reduced to zero mod the group order.
    #[error("challenge scalar is zero")]
    ZeroChallenge,

    /// A signer's response reduced to zero mod the group order.
    #[error("response scalar is zero")]
    ZeroResponse,
}

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchnorrError {
    /// A byte slice had the wrong length for the object being parsed.
    #[error("cannot parse {name} from a slice that is not {length} bytes")]
    BytesLengthError {
        /// The name of the object being parsed.
        name: &'static str,
        /// The expected wire length in bytes.
        length: usize,
    },

    /// An integer's significant bytes do not fit the requested wire width.
    #[error("integer does not fit into {width} wire bytes")]
    IntegerTooLarge {
        /// The requested fixed width in bytes.
        width: usize,
    },

    /// A deserialize read past the end of the source buffer.
    #[error("read past the end of the source buffer")]
    ReadOverflow,

    /// Scalar was zero or not below the group order.
    #[error("scalar must be in [1, n-1]")]
    ScalarOutOfRange,

    /// Invalid point encoding: bad prefix byte or x not on the curve.
    #[error("cannot decode compressed secp256k1 point")]
    PointDecompressionError,

    /// The point at infinity appeared where a proper point is required.
    #[error("point at infinity is not allowed here")]
    IdentityPoint,

    /// A hex string was malformed or of the wrong length.
    #[error("malformed hex string")]
    InvalidHex,

    /// This error occurs when a function is called with bad arguments,
    /// e.g. an empty message or an offset/size window outside the buffer.
    #[error("function called with bad arguments")]
    BadArguments,

    /// The arithmetic backend failed unexpectedly; fatal for the current call.
    #[error("curve arithmetic operation failed")]
    PointOperationFailed,

    /// Multi-signature protocol violation.
    #[error("{kind} violated the multi-signature protocol")]
    MuSig {
        /// The protocol stage that failed.
        kind: MuSigError,
    },
}

/// Helper function to convert a musig error into a schnorr error.
pub fn from_musig(err: MuSigError) -> SchnorrError {
    SchnorrError::MuSig { kind: err }
}

pub(crate) fn serde_error_from_schnorr_error<E>(err: SchnorrError) -> E
where
    E: serde::de::Error,
{
    E::custom(err)
}
