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

//! Commitments used in the first two rounds of the aggregation protocol.

use crate::context;
use crate::errors::{from_musig, MuSigError, SchnorrError};
use crate::ser::{self, SerializableCrypto, SCALAR_LENGTH};
use crate::tools::{canonical_nonzero_scalar, PointBoth, POINT_LENGTH};
use core::fmt::Debug;
use k256::elliptic_curve::Field;
use k256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// The length of a serialized `CommitSecret`, in bytes.
pub const COMMIT_SECRET_LENGTH: usize = SCALAR_LENGTH;

/// The length of a serialized `CommitPoint`, in bytes.
pub const COMMIT_POINT_LENGTH: usize = POINT_LENGTH;

/// The length of a serialized `CommitPointHash`, in bytes.
pub const COMMIT_POINT_HASH_LENGTH: usize = 32;

/// A signer's one-time nonce `k` for a single aggregation run.
///
/// Single-use: producing a `Response` consumes it, and reuse across runs
/// surrenders the signing key.  The scalar is wiped on drop.
pub struct CommitSecret(pub(crate) Scalar);

impl Debug for CommitSecret {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "CommitSecret(..)")
    }
}

impl Eq for CommitSecret {}
impl PartialEq for CommitSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}
impl ConstantTimeEq for CommitSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for CommitSecret {
    fn zeroize(&mut self) {
        self.0 = Scalar::ZERO;
    }
}

impl Drop for CommitSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl CommitSecret {
    const DESCRIPTION: &'static str = "A multi-signature commit secret as 32 bytes";

    /// Draw a fresh commit secret, rejection-sampling away zero.
    pub fn generate<R>(csprng: &mut R) -> CommitSecret
    where
        R: CryptoRng + RngCore,
    {
        loop {
            let k = Scalar::random(&mut *csprng);
            if !bool::from(k.is_zero()) {
                return CommitSecret(k);
            }
        }
    }

    /// Convert this commit secret to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; COMMIT_SECRET_LENGTH] {
        self.0.to_bytes().into()
    }

    /// Construct a `CommitSecret` from a 32-byte big-endian slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<CommitSecret, SchnorrError> {
        if bytes.len() != COMMIT_SECRET_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "CommitSecret",
                length: COMMIT_SECRET_LENGTH,
            });
        }
        let mut bits = [0u8; 32];
        bits.copy_from_slice(bytes);

        Ok(CommitSecret(canonical_nonzero_scalar(bits)?))
    }
}

impl SerializableCrypto for CommitSecret {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_bytes(dst, offset, &self.to_bytes());
        COMMIT_SECRET_LENGTH
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<CommitSecret, SchnorrError> {
        let bytes = ser::get_fixed(src, offset, COMMIT_SECRET_LENGTH)?;
        CommitSecret::from_bytes(bytes)
    }
}

serde_boilerplate!(CommitSecret);

/// The public half of a commit secret: `Q = k * G`, never the identity.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct CommitPoint(pub(crate) PointBoth);

impl Debug for CommitPoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "CommitPoint( {:?} )", self.0)
    }
}

impl CommitPoint {
    const DESCRIPTION: &'static str =
        "A multi-signature commit point as a 33-byte compressed point";

    /// Compute the commit point of a `CommitSecret`.
    pub fn new(secret: &CommitSecret) -> Result<CommitPoint, SchnorrError> {
        let point = context::curve().base_mul(&secret.0);
        Ok(CommitPoint(PointBoth::from_point(point)?))
    }

    /// Construct a `CommitPoint` from a 33-byte compressed encoding.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<CommitPoint, SchnorrError> {
        Ok(CommitPoint(PointBoth::from_bytes_ser("CommitPoint", bytes)?))
    }

    /// Convert this commit point to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; COMMIT_POINT_LENGTH] {
        self.0.to_bytes()
    }

    /// View this commit point as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; COMMIT_POINT_LENGTH] {
        self.0.as_bytes()
    }

    /// Access the point form.
    #[inline]
    pub fn as_point(&self) -> &ProjectivePoint {
        self.0.as_point()
    }

    /// Hash this commit point for the round-1 publication.
    pub fn precommit(&self) -> CommitPointHash {
        let mut h = Sha256::new();
        h.update(self.as_bytes());
        CommitPointHash(h.finalize().into())
    }

    /// Sum the commit points of every signer: `Q_agg = sum(Q_i)`.
    ///
    /// An empty signer set and an identity sum both abort the protocol.
    pub fn aggregate(commits: &[CommitPoint]) -> Result<CommitPoint, SchnorrError> {
        if commits.is_empty() {
            return Err(from_musig(MuSigError::NotEnoughParticipants));
        }
        let sum: ProjectivePoint = commits.iter().map(|c| *c.as_point()).sum();

        Ok(CommitPoint(PointBoth::from_point(sum)?))
    }
}

impl SerializableCrypto for CommitPoint {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_point(dst, offset, &self.0)
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<CommitPoint, SchnorrError> {
        Ok(CommitPoint(ser::get_point(src, offset)?))
    }
}

serde_boilerplate!(CommitPoint);

/// SHA-256 over the compressed commit point, published in round 1 to bind
/// each signer to a single `Q` before any other `Q` is revealed.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CommitPointHash(pub(crate) [u8; COMMIT_POINT_HASH_LENGTH]);

impl Debug for CommitPointHash {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "CommitPointHash( {} )", hex::encode(self.0))
    }
}

impl CommitPointHash {
    const DESCRIPTION: &'static str = "A multi-signature commit point hash as 32 bytes";

    /// Check a round-2 reveal against this round-1 hash.
    ///
    /// A mismatch aborts the signing attempt for the whole group.
    pub fn verify_reveal(&self, reveal: &CommitPoint) -> Result<(), SchnorrError> {
        let expected = reveal.precommit();
        if self.0[..].ct_eq(&expected.0[..]).unwrap_u8() == 1u8 {
            Ok(())
        } else {
            Err(from_musig(MuSigError::MismatchedCommitment))
        }
    }

    /// Convert this hash to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; COMMIT_POINT_HASH_LENGTH] {
        self.0
    }

    /// Construct a `CommitPointHash` from a 32-byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<CommitPointHash, SchnorrError> {
        if bytes.len() != COMMIT_POINT_HASH_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "CommitPointHash",
                length: COMMIT_POINT_HASH_LENGTH,
            });
        }
        let mut digest = [0u8; COMMIT_POINT_HASH_LENGTH];
        digest.copy_from_slice(bytes);

        Ok(CommitPointHash(digest))
    }
}

impl SerializableCrypto for CommitPointHash {
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize {
        ser::put_bytes(dst, offset, &self.0);
        COMMIT_POINT_HASH_LENGTH
    }

    fn deserialize(src: &[u8], offset: usize) -> Result<CommitPointHash, SchnorrError> {
        let bytes = ser::get_fixed(src, offset, COMMIT_POINT_HASH_LENGTH)?;
        CommitPointHash::from_bytes(bytes)
    }
}

serde_boilerplate!(CommitPointHash);

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn reveal_matches_its_own_hash() {
        let mut csprng = ChaCha20Rng::from_seed([40u8; 32]);
        let secret = CommitSecret::generate(&mut csprng);
        let point = CommitPoint::new(&secret).unwrap();

        assert!(point.precommit().verify_reveal(&point).is_ok());
    }

    #[test]
    fn reveal_of_a_different_point_is_rejected() {
        let mut csprng = ChaCha20Rng::from_seed([41u8; 32]);
        let honest = CommitPoint::new(&CommitSecret::generate(&mut csprng)).unwrap();
        let forged = CommitPoint::new(&CommitSecret::generate(&mut csprng)).unwrap();

        assert_eq!(
            honest.precommit().verify_reveal(&forged),
            Err(from_musig(MuSigError::MismatchedCommitment))
        );
    }

    #[test]
    fn aggregation_rejects_an_empty_set() {
        assert_eq!(
            CommitPoint::aggregate(&[]),
            Err(from_musig(MuSigError::NotEnoughParticipants))
        );
    }

    #[test]
    fn aggregation_sums_points() {
        let mut csprng = ChaCha20Rng::from_seed([42u8; 32]);
        let a_secret = CommitSecret::generate(&mut csprng);
        let b_secret = CommitSecret::generate(&mut csprng);
        let a = CommitPoint::new(&a_secret).unwrap();
        let b = CommitPoint::new(&b_secret).unwrap();

        let agg = CommitPoint::aggregate(&[a, b]).unwrap();
        assert_eq!(*agg.as_point(), a.as_point() + b.as_point());
    }

    #[test]
    fn round_trips_through_the_wire() {
        let mut csprng = ChaCha20Rng::from_seed([43u8; 32]);
        let secret = CommitSecret::generate(&mut csprng);
        let point = CommitPoint::new(&secret).unwrap();
        let hash = point.precommit();

        let mut buf = Vec::new();
        let mut offset = 0;
        offset += secret.serialize(&mut buf, offset);
        offset += point.serialize(&mut buf, offset);
        offset += hash.serialize(&mut buf, offset);
        assert_eq!(
            offset,
            COMMIT_SECRET_LENGTH + COMMIT_POINT_LENGTH + COMMIT_POINT_HASH_LENGTH
        );

        assert_eq!(secret, CommitSecret::deserialize(&buf, 0).unwrap());
        assert_eq!(
            point,
            CommitPoint::deserialize(&buf, COMMIT_SECRET_LENGTH).unwrap()
        );
        assert_eq!(
            hash,
            CommitPointHash::deserialize(&buf, COMMIT_SECRET_LENGTH + COMMIT_POINT_LENGTH)
                .unwrap()
        );
    }

    #[test]
    fn commit_secret_range_rules() {
        assert!(CommitSecret::from_bytes(&[0u8; 32]).is_err());
        let mut one = [0u8; 32];
        one[31] = 0x01;
        assert!(CommitSecret::from_bytes(&one).is_ok());
    }
}
