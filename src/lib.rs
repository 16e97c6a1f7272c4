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

//
// Schnorr via secp256k1
//

//! EC-Schnorr signatures over secp256k1 as specified by BSI TR-03111
//! section 4.2.3, plus an aggregated multi-signature extension whose
//! output verifies through the ordinary single-signer path.
//!
//! Useful links:
//! <https://www.bsi.bund.de/EN/Themen/Unternehmen-und-Organisationen/Standards-und-Zertifizierung/Technische-Richtlinien/TR-nach-Thema-sortiert/tr03111/tr-03111.html>
//! <https://www.secg.org/sec1-v2.pdf>
//!
//! Signing is deterministic: the per-signature nonce is derived from the
//! secret key and the signed bytes, so a fixed `(key, message)` pair
//! always yields the same signature.  All objects use fixed-width wire
//! encodings: 32-byte big-endian scalars and 33-byte SEC1 compressed
//! points.

#[macro_use]
pub mod ser;

pub mod context;
pub mod errors;
pub mod musig;
pub mod tools;

mod keys;
mod signature;

// Export everything public in keys and signature.
pub use errors::*;
pub use keys::*;
pub use signature::*;
