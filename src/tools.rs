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

//! The Extra Sauce
//!
//! We provide a `PointBoth` type that contains a secp256k1 point along
//! side its matching SEC1 compressed encoding, which helps the protocols
//! here avoid duplicate point compressions and/or decompressions.

use crate::errors::SchnorrError;
use core::fmt::Debug;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};

/// Compressed secp256k1 point length: one prefix byte for the parity of
/// `y`, then the 32-byte big-endian `x` coordinate.
pub const POINT_LENGTH: usize = 33;

/// Decode a 32-byte big-endian scalar, requiring it to lie in `[1, n-1]`.
pub(crate) fn canonical_nonzero_scalar(bits: [u8; 32]) -> Result<Scalar, SchnorrError> {
    let scalar = Option::<Scalar>::from(Scalar::from_repr(bits.into()))
        .ok_or(SchnorrError::ScalarOutOfRange)?;
    if bool::from(scalar.is_zero()) {
        return Err(SchnorrError::ScalarOutOfRange);
    }
    Ok(scalar)
}

/// A `PointBoth` contains a `ProjectivePoint` as well as the
/// corresponding 33-byte compressed encoding.  It provides a convenient
/// middle ground for protocols that hash compressed points to derive
/// scalars for use with uncompressed points.
///
/// The held point is never the identity; both constructors reject it.
#[derive(Copy, Clone)] // PartialEq optimized below
pub struct PointBoth {
    compressed: [u8; POINT_LENGTH],
    point: ProjectivePoint,
}

impl Debug for PointBoth {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "PointBoth( {} )", hex::encode(self.compressed))
    }
}

impl PointBoth {
    const DESCRIPTION: &'static str = "A secp256k1 point as 33 compressed bytes";

    /// Access the compressed form.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; POINT_LENGTH] {
        &self.compressed
    }

    /// Convert this point to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; POINT_LENGTH] {
        self.compressed
    }

    /// Access the point form.
    #[inline]
    pub fn as_point(&self) -> &ProjectivePoint {
        &self.point
    }

    /// Extract the point form.
    #[inline]
    pub fn into_point(self) -> ProjectivePoint {
        self.point
    }

    /// Compress into the `PointBoth` format that also retains the
    /// uncompressed form.  The identity has no compressed encoding and
    /// is rejected.
    pub fn from_point(point: ProjectivePoint) -> Result<PointBoth, SchnorrError> {
        if bool::from(point.is_identity()) {
            return Err(SchnorrError::IdentityPoint);
        }

        let encoded = point.to_affine().to_encoded_point(true);
        let compressed: [u8; POINT_LENGTH] = encoded
            .as_bytes()
            .try_into()
            .map_err(|_| SchnorrError::PointOperationFailed)?;

        Ok(PointBoth { compressed, point })
    }

    /// Construct a `PointBoth` from a slice of bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<PointBoth, SchnorrError> {
        PointBoth::from_bytes_ser("PointBoth", bytes)
    }

    /// Variant of `PointBoth::from_bytes` that propagates more informative errors.
    pub fn from_bytes_ser(name: &'static str, bytes: &[u8]) -> Result<PointBoth, SchnorrError> {
        if bytes.len() != POINT_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name,
                length: POINT_LENGTH,
            });
        }

        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|_| SchnorrError::PointDecompressionError)?;
        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(SchnorrError::PointDecompressionError)?;

        let mut compressed = [0u8; POINT_LENGTH];
        compressed.copy_from_slice(bytes);

        Ok(PointBoth {
            compressed,
            point: ProjectivePoint::from(affine),
        })
    }
}

serde_boilerplate!(PointBoth);

/// We hide fields largely so that only comparing the compressed forms works.
impl PartialEq<Self> for PointBoth {
    fn eq(&self, other: &Self) -> bool {
        let r = self.compressed.eq(&other.compressed);
        debug_assert_eq!(r, self.point.eq(&other.point));
        r
    }
}

impl Eq for PointBoth {}

impl PartialOrd<PointBoth> for PointBoth {
    fn partial_cmp(&self, other: &PointBoth) -> Option<::core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Big-endian integer ordering of the compressed encoding; the fixed
/// width makes this the byte-wise ordering.
impl Ord for PointBoth {
    fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
        self.compressed.cmp(&other.compressed)
    }
}

impl ::core::hash::Hash for PointBoth {
    fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
        self.compressed.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context;

    #[test]
    fn generator_round_trips() {
        let g = PointBoth::from_point(*context::curve().generator()).unwrap();
        let decoded = PointBoth::from_bytes(g.as_bytes()).unwrap();
        assert_eq!(g, decoded);
        assert_eq!(g.as_bytes()[0] & 0xFE, 0x02);
    }

    #[test]
    fn rejects_identity() {
        assert_eq!(
            PointBoth::from_point(ProjectivePoint::IDENTITY),
            Err(SchnorrError::IdentityPoint)
        );
    }

    #[test]
    fn rejects_bad_prefix() {
        let g = PointBoth::from_point(*context::curve().generator()).unwrap();
        let mut bytes = g.to_bytes();
        bytes[0] = 0x00;
        assert!(PointBoth::from_bytes(&bytes).is_err());
        bytes[0] = 0x05;
        assert!(PointBoth::from_bytes(&bytes).is_err());
    }

    #[test]
    fn rejects_invalid_x() {
        // x of all ones is past the field modulus
        let mut bytes = [0xFFu8; POINT_LENGTH];
        bytes[0] = 0x02;
        assert_eq!(
            PointBoth::from_bytes(&bytes),
            Err(SchnorrError::PointDecompressionError)
        );
    }
}
