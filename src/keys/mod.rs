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

//! Keys to the kingdom
//!
//! EC-Schnorr keys over secp256k1 per BSI TR-03111: a secret scalar in
//! `[1, n-1]` and its compressed public point.

mod public;
pub use public::{PublicKey, PUBLIC_KEY_LENGTH};

mod secret;
pub use secret::{SecretKey, SECRET_KEY_LENGTH};

mod pair;
pub use pair::{Keypair, KEYPAIR_LENGTH};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn distinct_draws_yield_distinct_keys() {
        let mut csprng = ChaCha20Rng::from_seed([10u8; 32]);
        let a = SecretKey::generate(&mut csprng);
        let b = SecretKey::generate(&mut csprng);

        assert_ne!(a, b);
        assert_ne!(
            PublicKey::from_secret(&a).unwrap(),
            PublicKey::from_secret(&b).unwrap()
        );
    }
}
