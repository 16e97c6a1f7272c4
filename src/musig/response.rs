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

//! The round-4 per-signer response of the aggregation protocol.

use crate::errors::{from_musig, MuSigError, SchnorrError};
use crate::keys::SecretKey;
use crate::musig::{Challenge, CommitSecret};
use crate::ser::{self, SerializableCrypto, SCALAR_LENGTH};
use crate::tools::canonical_nonzero_scalar;
use core::fmt::Debug;
use k256::elliptic_curve::Field;
use k256::Scalar;

/// The length of a serialized `Response`, in bytes.
pub const RESPONSE_LENGTH: usize = SCALAR_LENGTH;

/// A signer's contribution to the aggregate response:
/// `s_i = (k_i - r * d_i) mod n`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Response(pub(crate) Scalar);

impl Debug for Response {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Response( {} )", hex::encode(self.to_bytes()))
    }
}

impl Response {
    const DESCRIPTION: &'static str = "A multi-signature response as 32 bytes";

    /// Compute this signer's response.
    ///
    /// The `CommitSecret` is taken by value: it is single-use, and it is
    /// wiped when this call returns.  A zero response restarts the whole
    /// protocol from the commit round.
    pub fn new(
        commit_secret: CommitSecret,
        challenge: &Challenge,
        secret_key: &SecretKey,
    ) -> Result<Response, SchnorrError> {
        let s = commit_secret.0 - challenge.0 * secret_key.0;
        drop(commit_secret);

        if bool::from(s.is_zero()) {
            return Err(from_musig(MuSigError::ZeroResponse));
        }

        Ok(Response(s))
    }

    /// Sum the responses of every signer: `s = sum(s_i) mod n`.
    pub fn aggregate(responses: &[Response]) -> Result<Response, SchnorrError> {
        if responses.is_empty() {
            return Err(from_musig(MuSigError::NotEnoughParticipants));
        }
        let s: Scalar = responses.iter().map(|r| r.0).sum();

        if bool::from(s.is_zero()) {
            return Err(from_musig(MuSigError::ZeroResponse));
        }

        Ok(Response(s))
    }

    /// Convert this response to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; RESPONSE_LENGTH] {
        self.0.to_bytes().into()
    }

    /// Construct a `Response` from a 32-byte big-endian slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Response, SchnorrError> {
        if bytes.len() != RESPONSE_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "Response",
                length: RESPONSE_LENGTH,
            });
        }
        let mut bits = [0u8; 32];
        bits.copy_from_slice(bytes);

        Ok(Response(canonical_nonzero_scalar(bits)?))
    }
}

impl SerializableCrypto for Response {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_bytes(dst, offset, &self.to_bytes());
        RESPONSE_LENGTH
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<Response, SchnorrError> {
        let bytes = ser::get_fixed(src, offset, RESPONSE_LENGTH)?;
        Response::from_bytes(bytes)
    }
}

serde_boilerplate!(Response);
