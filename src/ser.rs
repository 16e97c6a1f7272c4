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

//! The byte-level wire contracts: fixed-width big-endian scalars and
//! SEC1 compressed points, written into a caller-supplied buffer at a
//! caller-supplied offset.  Range checks against the group order are not
//! imposed here; the entity constructors own those.

use crate::errors::SchnorrError;
use crate::tools::{PointBoth, POINT_LENGTH};

/// The wire width of a serialized scalar, in bytes.
pub const SCALAR_LENGTH: usize = 32;

/// Objects with a canonical, fixed-width wire encoding.
///
/// `serialize` appends into `dst` at `offset`, growing the buffer as
/// needed, and returns the number of bytes written.  `deserialize` reads
/// from `src` at `offset`; out-of-range reads fail.
pub trait SerializableCrypto: Sized {
    /// Serialize internal state into `dst` starting at `offset`.
    fn serialize(&self, dst: &mut Vec<u8>, offset: usize) -> usize;

    /// Deserialize from `src` starting at `offset`.
    fn deserialize(src: &[u8], offset: usize) -> Result<Self, SchnorrError>;
}

/// Copy `bytes` into `dst` at `offset`, zero-filling any gap between the
/// current end of `dst` and `offset`.
pub(crate) fn put_bytes(dst: &mut Vec<u8>, offset: usize, bytes: &[u8]) {
    let end = offset + bytes.len();
    if dst.len() < end {
        dst.resize(end, 0x00);
    }
    dst[offset..end].copy_from_slice(bytes);
}

/// Write a big-endian magnitude left-zero-padded to exactly `width` bytes.
///
/// Fails rather than truncate when the significant bytes of `magnitude`
/// exceed `width`.
pub fn put_fixed(
    dst: &mut Vec<u8>,
    offset: usize,
    width: usize,
    magnitude: &[u8],
) -> Result<(), SchnorrError> {
    let significant = strip_leading_zeros(magnitude);
    if significant.len() > width {
        return Err(SchnorrError::IntegerTooLarge { width });
    }

    let end = offset + width;
    if dst.len() < end {
        dst.resize(end, 0x00);
    }
    let pad = width - significant.len();
    dst[offset..offset + pad].fill(0x00);
    dst[offset + pad..end].copy_from_slice(significant);

    Ok(())
}

/// Read exactly `width` bytes from `src` at `offset`.
pub fn get_fixed(src: &[u8], offset: usize, width: usize) -> Result<&[u8], SchnorrError> {
    let end = offset.checked_add(width).ok_or(SchnorrError::ReadOverflow)?;
    if end > src.len() {
        return Err(SchnorrError::ReadOverflow);
    }
    Ok(&src[offset..end])
}

/// Write a curve point in its 33-byte SEC1 compressed form.
pub fn put_point(dst: &mut Vec<u8>, offset: usize, point: &PointBoth) -> usize {
    put_bytes(dst, offset, point.as_bytes());
    POINT_LENGTH
}

/// Read a curve point from its 33-byte SEC1 compressed form.
///
/// Rejects invalid prefix bytes, x-coordinates not on the curve, and the
/// point at infinity.
pub fn get_point(src: &[u8], offset: usize) -> Result<PointBoth, SchnorrError> {
    let bytes = get_fixed(src, offset, POINT_LENGTH)?;
    PointBoth::from_bytes(bytes)
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0x00).unwrap_or(bytes.len());
    &bytes[start..]
}

macro_rules! serde_boilerplate {
    ($t:ty) => {
        impl ::serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_bytes(&self.to_bytes()[..])
            }
        }

        impl<'d> ::serde::Deserialize<'d> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'d>,
            {
                struct MyVisitor;

                impl<'d> ::serde::de::Visitor<'d> for MyVisitor {
                    type Value = $t;

                    fn expecting(
                        &self,
                        formatter: &mut ::core::fmt::Formatter<'_>,
                    ) -> ::core::fmt::Result {
                        formatter.write_str(Self::Value::DESCRIPTION)
                    }

                    fn visit_bytes<E>(self, bytes: &[u8]) -> Result<$t, E>
                    where
                        E: ::serde::de::Error,
                    {
                        Self::Value::from_bytes(bytes)
                            .map_err(crate::errors::serde_error_from_schnorr_error)
                    }
                }
                deserializer.deserialize_bytes(MyVisitor)
            }
        }
    };
} // macro_rules! serde_boilerplate
