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

//! Schnorr Public Key generation

use crate::context;
use crate::errors::SchnorrError;
use crate::keys::SecretKey;
use crate::ser::{self, SerializableCrypto};
use crate::tools::{PointBoth, POINT_LENGTH};
use core::fmt::{Debug, Display};
use k256::ProjectivePoint;

/// The length of a secp256k1 Schnorr `PublicKey`, in bytes (SEC1 compressed).
pub const PUBLIC_KEY_LENGTH: usize = POINT_LENGTH;

/// An EC-Schnorr public key: the point `P = d * G`, never the identity.
///
/// The total order on public keys is the big-endian integer order of the
/// compressed encoding, which fixes the canonical signer ordering for
/// multi-signature rosters.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct PublicKey(pub(crate) PointBoth);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PublicKey( {:?} )", self.0)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}

impl PublicKey {
    const DESCRIPTION: &'static str = "An EC-Schnorr public key as a 33-byte compressed point";

    /// Derive this public key from its corresponding `SecretKey`.
    ///
    /// Fails only if the derived point is the identity, which cannot
    /// happen for a key in `[1, n-1]`.
    pub fn from_secret(secret_key: &SecretKey) -> Result<PublicKey, SchnorrError> {
        let point = context::curve().base_mul(secret_key.as_scalar());
        Ok(PublicKey(PointBoth::from_point(point)?))
    }

    /// Construct a `PublicKey` from a 33-byte compressed encoding.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `PublicKey`, or a `SchnorrError`
    /// if the slice has the wrong length, carries an invalid prefix byte,
    /// or does not name a point on the curve.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SchnorrError> {
        Ok(PublicKey(PointBoth::from_bytes_ser("PublicKey", bytes)?))
    }

    /// Construct a `PublicKey` from a 66-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<PublicKey, SchnorrError> {
        let bytes = hex::decode(hex_str).map_err(|_| SchnorrError::InvalidHex)?;
        PublicKey::from_bytes(&bytes)
    }

    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Access the point form.
    #[inline]
    pub fn as_point(&self) -> &ProjectivePoint {
        self.0.as_point()
    }
}

impl SerializableCrypto for PublicKey {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_point(dst, offset, &self.0)
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<PublicKey, SchnorrError> {
        Ok(PublicKey(ser::get_point(src, offset)?))
    }
}

serde_boilerplate!(PublicKey);
