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

//! The round-3 challenge of the aggregation protocol.

use crate::errors::{from_musig, MuSigError, SchnorrError};
use crate::keys::PublicKey;
use crate::musig::CommitPoint;
use crate::ser::{self, SerializableCrypto, SCALAR_LENGTH};
use crate::signature::{challenge_scalar, message_window};
use crate::tools::canonical_nonzero_scalar;
use core::fmt::Debug;
use k256::elliptic_curve::Field;
use k256::Scalar;

/// The length of a serialized `Challenge`, in bytes.
pub const CHALLENGE_LENGTH: usize = SCALAR_LENGTH;

/// The challenge scalar distributed by the aggregator:
/// `r = H(compress(Q_agg) || compress(P_agg) || m) mod n`.
///
/// The hash layout is identical to the single-signer one, which is what
/// makes the final aggregate signature verify through the ordinary
/// single-signer path.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Challenge(pub(crate) Scalar);

impl Debug for Challenge {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Challenge( {} )", hex::encode(self.to_bytes()))
    }
}

impl Challenge {
    const DESCRIPTION: &'static str = "A multi-signature challenge as 32 bytes";

    /// Build the challenge for a message, an aggregated commit point, and
    /// an aggregated public key.
    pub fn new(
        aggregated_commit: &CommitPoint,
        aggregated_pubkey: &PublicKey,
        message: &[u8],
    ) -> Result<Challenge, SchnorrError> {
        Challenge::new_range(
            aggregated_commit,
            aggregated_pubkey,
            message,
            0,
            message.len(),
        )
    }

    /// Build the challenge over the `message[offset..offset + size]` window.
    pub fn new_range(
        aggregated_commit: &CommitPoint,
        aggregated_pubkey: &PublicKey,
        message: &[u8],
        offset: usize,
        size: usize,
    ) -> Result<Challenge, SchnorrError> {
        let window = message_window(message, offset, size)?;

        let r = challenge_scalar(&aggregated_commit.0, aggregated_pubkey, window);
        if bool::from(r.is_zero()) {
            return Err(from_musig(MuSigError::ZeroChallenge));
        }

        Ok(Challenge(r))
    }

    /// Convert this challenge to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; CHALLENGE_LENGTH] {
        self.0.to_bytes().into()
    }

    /// Construct a `Challenge` from a 32-byte big-endian slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Challenge, SchnorrError> {
        if bytes.len() != CHALLENGE_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "Challenge",
                length: CHALLENGE_LENGTH,
            });
        }
        let mut bits = [0u8; 32];
        bits.copy_from_slice(bytes);

        Ok(Challenge(canonical_nonzero_scalar(bits)?))
    }
}

impl SerializableCrypto for Challenge {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_bytes(dst, offset, &self.to_bytes());
        CHALLENGE_LENGTH
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<Challenge, SchnorrError> {
        let bytes = ser::get_fixed(src, offset, CHALLENGE_LENGTH)?;
        Challenge::from_bytes(bytes)
    }
}

serde_boilerplate!(Challenge);
