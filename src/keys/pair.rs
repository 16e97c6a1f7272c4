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

//! A Rust implementation of Schnorr key generation

use crate::errors::SchnorrError;
use crate::keys::{PublicKey, SecretKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// The length of a secp256k1 Schnorr `Keypair`, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// An EC-Schnorr keypair.
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The secret half of this keypair.
    pub secret: SecretKey,
    /// The public half of this keypair.
    pub public: PublicKey,
}

impl Zeroize for Keypair {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Keypair {
    /// Generate a Schnorr keypair.
    ///
    /// # Input
    ///
    /// A CSPRNG with a `fill_bytes()` method, e.g. `rand::rngs::OsRng`.
    pub fn generate<R>(csprng: &mut R) -> Keypair
    where
        R: CryptoRng + RngCore,
    {
        // deriving the public half only fails on an identity point,
        // which a fresh key in [1, n-1] can never produce
        loop {
            let secret = SecretKey::generate(csprng);
            if let Ok(public) = PublicKey::from_secret(&secret) {
                return Keypair { secret, public };
            }
        }
    }

    /// Build the `Keypair` holding this `SecretKey` and the `PublicKey`
    /// derived from it.
    pub fn from_secret(secret: &SecretKey) -> Result<Keypair, SchnorrError> {
        Ok(Keypair {
            secret: secret.clone(),
            public: PublicKey::from_secret(secret)?,
        })
    }

    /// Convert this keypair to bytes.
    ///
    /// # Returns
    ///
    /// An array of bytes, `[u8; KEYPAIR_LENGTH]`.  The first
    /// `SECRET_KEY_LENGTH` bytes are the `SecretKey`, and the next
    /// `PUBLIC_KEY_LENGTH` bytes are the `PublicKey`.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes = [0u8; KEYPAIR_LENGTH];

        bytes[..SECRET_KEY_LENGTH].copy_from_slice(&self.secret.to_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        bytes
    }

    /// Construct a `Keypair` from the bytes of a `SecretKey` and `PublicKey`.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `Keypair`, or a `SchnorrError`
    /// describing the half that failed to parse.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, SchnorrError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "Keypair",
                length: KEYPAIR_LENGTH,
            });
        }
        let secret = SecretKey::from_bytes(&bytes[..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;

        Ok(Keypair { secret, public })
    }
}
