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

//! A Rust implementation of EC-Schnorr signing and verification,
//! following BSI TR-03111 section 4.2.3.

use crate::context;
use crate::errors::SchnorrError;
use crate::keys::{Keypair, PublicKey, SecretKey};
use crate::ser::{self, SerializableCrypto, SCALAR_LENGTH};
use crate::tools::{canonical_nonzero_scalar, PointBoth};
use core::fmt::{Debug, Display};
use hmac::{Hmac, Mac};
use k256::elliptic_curve::Field;
use k256::Scalar;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// The length of a secp256k1 Schnorr `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An EC-Schnorr signature.
///
/// # Note
///
/// These signatures are "detached"—that is, they do **not** include a copy
/// of the message which has been signed.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// The challenge scalar `r = H(Q || P || m) mod n`, where `Q` is the
    /// commitment to the per-signature nonce.
    pub(crate) r: Scalar,

    /// The response scalar `s = k - r * d mod n`, with `k` the nonce and
    /// `d` the signing key.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Signature( {} )", hex::encode(self.to_bytes()))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl Signature {
    const DESCRIPTION: &'static str = "An EC-Schnorr signature as two 32-byte scalars";

    /// Convert this `Signature` to a byte array, `r` then `s`.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..SCALAR_LENGTH].copy_from_slice(&self.r.to_bytes());
        signature_bytes[SCALAR_LENGTH..].copy_from_slice(&self.s.to_bytes());
        signature_bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// Both scalars must lie in `[1, n-1]`.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SchnorrError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            });
        }
        let mut lower = [0u8; 32];
        let mut upper = [0u8; 32];

        lower.copy_from_slice(&bytes[..SCALAR_LENGTH]);
        upper.copy_from_slice(&bytes[SCALAR_LENGTH..]);

        Ok(Signature {
            r: canonical_nonzero_scalar(lower)?,
            s: canonical_nonzero_scalar(upper)?,
        })
    }
}

impl SerializableCrypto for Signature {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_bytes(dst, offset, &self.to_bytes());
        SIGNATURE_LENGTH
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<Signature, SchnorrError> {
        let bytes = ser::get_fixed(src, offset, SIGNATURE_LENGTH)?;
        Signature::from_bytes(bytes)
    }
}

serde_boilerplate!(Signature);

/// Validate a message window and return the bytes it selects.
///
/// An empty message, a zero-sized window, and a window reaching past the
/// end of the message are all rejected.
pub(crate) fn message_window(
    message: &[u8],
    offset: usize,
    size: usize,
) -> Result<&[u8], SchnorrError> {
    if message.is_empty() || size == 0 {
        return Err(SchnorrError::BadArguments);
    }
    let end = offset.checked_add(size).ok_or(SchnorrError::BadArguments)?;
    if end > message.len() {
        return Err(SchnorrError::BadArguments);
    }
    Ok(&message[offset..end])
}

/// The challenge hash: `SHA-256(compress(Q) || compress(P) || m) mod n`.
/// The concatenation order is fixed by the wire contract.
pub(crate) fn challenge_scalar(commit: &PointBoth, public_key: &PublicKey, window: &[u8]) -> Scalar {
    let mut h = Sha256::new();
    h.update(commit.as_bytes());
    h.update(public_key.as_bytes());
    h.update(window);

    context::curve().reduce_digest(h.finalize().into())
}

/// Derive the per-signature nonce as a function of the signing key and
/// the signed bytes, so a fixed `(d, m)` pair always produces the same
/// signature.  The counter starts at zero and is bumped only when the
/// rejection loop discards an iteration.
fn derive_nonce(secret: &SecretKey, window: &[u8], counter: u32) -> Result<Scalar, SchnorrError> {
    let mut key_bytes = secret.to_bytes();
    let mac = Hmac::<Sha256>::new_from_slice(&key_bytes)
        .map_err(|_| SchnorrError::PointOperationFailed);
    key_bytes.zeroize();

    let mut mac = mac?;
    mac.update(&counter.to_be_bytes());
    mac.update(window);
    let digest: [u8; 32] = mac.finalize().into_bytes().into();

    Ok(context::curve().reduce_digest(digest))
}

// === Implement signing and verification operations on key types === //

impl SecretKey {
    /// Sign a message with this `SecretKey`.
    ///
    /// # Example
    ///
    /// ```
    /// use ecschnorr::Keypair;
    ///
    /// let mut csprng = rand::rngs::OsRng;
    /// let keypair = Keypair::generate(&mut csprng);
    ///
    /// let sig = keypair.secret.sign(b"hello world", &keypair.public).unwrap();
    /// assert!(keypair.public.verify(b"hello world", &sig));
    /// ```
    pub fn sign(&self, message: &[u8], public_key: &PublicKey) -> Result<Signature, SchnorrError> {
        self.sign_range(message, 0, message.len(), public_key)
    }

    /// Sign the `message[offset..offset + size]` window with this `SecretKey`.
    ///
    /// The algorithm is the TR-03111 rejection loop:
    ///
    /// 1. derive the nonce `k` from `(d, m)`; a zero draw re-derives,
    /// 2. commit `Q = k * G`,
    /// 3. hash `r = H(compress(Q) || compress(P) || m) mod n`,
    /// 4. respond `s = (k - r * d) mod n`,
    /// 5. restart with a perturbed nonce if `r = 0` or `s = 0`.
    pub fn sign_range(
        &self,
        message: &[u8],
        offset: usize,
        size: usize,
        public_key: &PublicKey,
    ) -> Result<Signature, SchnorrError> {
        let window = message_window(message, offset, size)?;

        let mut counter: u32 = 0;
        loop {
            let k = derive_nonce(self, window, counter)?;
            counter = counter.wrapping_add(1);
            if bool::from(k.is_zero()) {
                continue;
            }

            let commit = PointBoth::from_point(context::curve().base_mul(&k))?;

            let r = challenge_scalar(&commit, public_key, window);
            let s = k - r * self.0;

            if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
                continue;
            }

            return Ok(Signature { r, s });
        }
    }
}

impl PublicKey {
    /// Verify a signature on a message with this public key.
    ///
    /// # Return
    ///
    /// `true` if and only if the signature is valid.  Every failure,
    /// including malformed inputs, is reported as a plain `false`; no
    /// diagnostic distinguishes which check failed.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.verify_range(message, 0, message.len(), signature)
    }

    /// Verify a signature over the `message[offset..offset + size]` window.
    pub fn verify_range(
        &self,
        message: &[u8],
        offset: usize,
        size: usize,
        signature: &Signature,
    ) -> bool {
        let window = match message_window(message, offset, size) {
            Ok(window) => window,
            Err(_) => return false,
        };

        // scalars are canonical by construction; zero is still ruled out
        if bool::from(signature.r.is_zero()) || bool::from(signature.s.is_zero()) {
            return false;
        }

        // Q = s * G + r * P, rejected if it lands on the identity
        let q = context::curve().base_mul(&signature.s) + self.as_point() * &signature.r;
        let commit = match PointBoth::from_point(q) {
            Ok(commit) => commit,
            Err(_) => return false,
        };

        challenge_scalar(&commit, self, window) == signature.r
    }
}

impl Keypair {
    /// Sign a message with this keypair's secret key.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, SchnorrError> {
        self.secret.sign(message, &self.public)
    }

    /// Sign a message window with this keypair's secret key.
    pub fn sign_range(
        &self,
        message: &[u8],
        offset: usize,
        size: usize,
    ) -> Result<Signature, SchnorrError> {
        self.secret.sign_range(message, offset, size, &self.public)
    }

    /// Verify a signature on a message with this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public.verify(message, signature)
    }

    /// Verify a signature over a message window with this keypair's public key.
    pub fn verify_range(
        &self,
        message: &[u8],
        offset: usize,
        size: usize,
        signature: &Signature,
    ) -> bool {
        self.public.verify_range(message, offset, size, signature)
    }
}
