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

//! Process-wide secp256k1 context.
//!
//! The group parameters are constructed once, on first access, and are
//! read-only afterwards; any number of threads may hold the `'static`
//! reference concurrently.

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::Curve;
use k256::{ProjectivePoint, Scalar, Secp256k1};
use once_cell::sync::Lazy;

static CURVE: Lazy<CurveContext> = Lazy::new(|| CurveContext {
    order: Secp256k1::ORDER,
    generator: ProjectivePoint::GENERATOR,
});

/// The secp256k1 group parameters used by every operation in this crate.
pub struct CurveContext {
    order: U256,
    generator: ProjectivePoint,
}

/// Access the process-wide curve context.
pub fn curve() -> &'static CurveContext {
    &CURVE
}

impl CurveContext {
    /// The prime order `n` of the group generated by the base point.
    pub fn order(&self) -> &U256 {
        &self.order
    }

    /// The base point `G`.
    pub fn generator(&self) -> &ProjectivePoint {
        &self.generator
    }

    /// Compute `k * G`.
    pub fn base_mul(&self, k: &Scalar) -> ProjectivePoint {
        self.generator * k
    }

    /// Interpret a 32-byte digest as a big-endian integer reduced mod `n`.
    pub fn reduce_digest(&self, digest: [u8; 32]) -> Scalar {
        <Scalar as Reduce<U256>>::reduce_bytes(&digest.into())
    }
}
