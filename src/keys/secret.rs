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

//! Schnorr Secret Key generation

use crate::errors::SchnorrError;
use crate::ser::{self, SerializableCrypto, SCALAR_LENGTH};
use core::fmt::Debug;
use k256::elliptic_curve::{Field, PrimeField};
use k256::Scalar;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// The length of a secp256k1 Schnorr `SecretKey`, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// An EC-Schnorr secret key: a scalar `d` with `1 <= d <= n-1`.
#[derive(Clone)]
pub struct SecretKey(pub(crate) Scalar);

impl Debug for SecretKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        // key material stays out of logs
        write!(f, "SecretKey(..)")
    }
}

impl Eq for SecretKey {}
impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}
impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.0 = Scalar::ZERO;
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    const DESCRIPTION: &'static str = "An EC-Schnorr secret key as 32 bytes";

    /// Generate a `SecretKey` from a `csprng`, rejection-sampling away
    /// the zero scalar.
    pub fn generate<R>(csprng: &mut R) -> SecretKey
    where
        R: CryptoRng + RngCore,
    {
        loop {
            let d = Scalar::random(&mut *csprng);
            if !bool::from(d.is_zero()) {
                return SecretKey(d);
            }
        }
    }

    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0.to_bytes().into()
    }

    /// Construct a `SecretKey` from a 32-byte big-endian slice.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `SecretKey`, or a `SchnorrError`
    /// if the slice has the wrong length or encodes a scalar outside
    /// `[1, n-1]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, SchnorrError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "SecretKey",
                length: SECRET_KEY_LENGTH,
            });
        }

        let mut bits = [0u8; 32];
        bits.copy_from_slice(bytes);

        let d = Option::<Scalar>::from(Scalar::from_repr(bits.into()))
            .ok_or(SchnorrError::ScalarOutOfRange)?;
        if bool::from(d.is_zero()) {
            return Err(SchnorrError::ScalarOutOfRange);
        }

        Ok(SecretKey(d))
    }

    /// Construct a `SecretKey` from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<SecretKey, SchnorrError> {
        let bytes = hex::decode(hex_str).map_err(|_| SchnorrError::InvalidHex)?;
        SecretKey::from_bytes(&bytes)
    }

    /// Helper method to view this key as a scalar.
    #[inline]
    pub(crate) fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

impl SerializableCrypto for SecretKey {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_bytes(dst, offset, &self.to_bytes());
        SCALAR_LENGTH
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<SecretKey, SchnorrError> {
        let bytes = ser::get_fixed(src, offset, SCALAR_LENGTH)?;
        SecretKey::from_bytes(bytes)
    }
}

serde_boilerplate!(SecretKey);
