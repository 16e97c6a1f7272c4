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

//! A Rust implementation of Schnorr multi-signatures with commit-reveal
//! nonce aggregation.
//!
//! The signer set is agreed up front (canonically ordered by the
//! `PublicKey` total order) and all signers must be present.  A signing
//! run then takes four rounds:
//!
//! 1. **Commit** — every signer draws a [`CommitSecret`], computes its
//!    [`CommitPoint`], and publishes only the [`CommitPointHash`].
//! 2. **Reveal** — every signer publishes its `CommitPoint`; everyone
//!    checks each reveal against the round-1 hash with
//!    [`CommitPointHash::verify_reveal`] and aborts on a mismatch.
//!    The aggregator sums the reveals with [`aggregate_commits`].
//! 3. **Challenge** — the aggregator sums the public keys with
//!    [`aggregate_pubkeys`] and distributes the [`Challenge`].
//! 4. **Response** — every signer answers with a [`Response`], consuming
//!    its commit secret; [`aggregate_signature`] sums the responses into
//!    a [`Signature`](crate::Signature) that verifies under the
//!    aggregated public key through the ordinary single-signer path.
//!
//! Any deviation aborts the run without emitting a partial signature;
//! the caller decides whether to restart from round 1.

use crate::context;
use crate::errors::{from_musig, MuSigError, SchnorrError};
use crate::keys::PublicKey;
use crate::signature::Signature;
use crate::tools::PointBoth;
use k256::ProjectivePoint;

mod commitment;
pub use commitment::{
    CommitPoint, CommitPointHash, CommitSecret, COMMIT_POINT_HASH_LENGTH, COMMIT_POINT_LENGTH,
    COMMIT_SECRET_LENGTH,
};

mod challenge;
pub use challenge::{Challenge, CHALLENGE_LENGTH};

mod response;
pub use response::{Response, RESPONSE_LENGTH};

/// Sum the public keys of every signer: `P_agg = sum(P_i)`.
///
/// The aggregate key is what verifiers use; a correctly aggregated
/// signature is indistinguishable from a single-signer signature under it.
pub fn aggregate_pubkeys(keys: &[PublicKey]) -> Result<PublicKey, SchnorrError> {
    if keys.is_empty() {
        return Err(from_musig(MuSigError::NotEnoughParticipants));
    }
    let sum: ProjectivePoint = keys.iter().map(|k| *k.as_point()).sum();

    Ok(PublicKey(PointBoth::from_point(sum)?))
}

/// Sum the commit points of every signer: `Q_agg = sum(Q_i)`.
pub fn aggregate_commits(commits: &[CommitPoint]) -> Result<CommitPoint, SchnorrError> {
    CommitPoint::aggregate(commits)
}

/// Sum the responses into the final signature `(r, sum(s_i))`.
pub fn aggregate_signature(
    challenge: &Challenge,
    responses: &[Response],
) -> Result<Signature, SchnorrError> {
    let s = Response::aggregate(responses)?;

    Ok(Signature {
        r: challenge.0,
        s: s.0,
    })
}

/// Check one signer's response before summing:
/// `s_i * G + r * P_i == Q_i`.
///
/// Lets an aggregator attribute a bad share to its signer instead of
/// discovering the failure only when the combined signature rejects.
pub fn verify_response(
    response: &Response,
    challenge: &Challenge,
    public_key: &PublicKey,
    commit_point: &CommitPoint,
) -> bool {
    let q = context::curve().base_mul(&response.0) + public_key.as_point() * &challenge.0;

    q == *commit_point.as_point()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys::Keypair;
    use crate::ser::SerializableCrypto;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    struct Signer {
        keypair: Keypair,
        secret: Option<CommitSecret>,
        point: CommitPoint,
        hash: CommitPointHash,
    }

    impl Signer {
        fn commit(keypair: Keypair, csprng: &mut ChaCha20Rng) -> Signer {
            let secret = CommitSecret::generate(csprng);
            let point = CommitPoint::new(&secret).unwrap();
            let hash = point.precommit();
            Signer {
                keypair,
                secret: Some(secret),
                point,
                hash,
            }
        }
    }

    fn run_protocol(message: &[u8], count: usize, seed: u8) -> (Signature, PublicKey) {
        let mut csprng = ChaCha20Rng::from_seed([seed; 32]);

        // round 0: roster in canonical key order
        let mut keypairs: Vec<Keypair> =
            (0..count).map(|_| Keypair::generate(&mut csprng)).collect();
        keypairs.sort_by_key(|kp| kp.public);

        // round 1: commit
        let mut signers: Vec<Signer> = keypairs
            .into_iter()
            .map(|kp| Signer::commit(kp, &mut csprng))
            .collect();

        // round 2: reveal, check every reveal against its hash
        for signer in &signers {
            signer.hash.verify_reveal(&signer.point).unwrap();
        }
        let commits: Vec<CommitPoint> = signers.iter().map(|s| s.point).collect();
        let aggregated_commit = aggregate_commits(&commits).unwrap();

        // round 3: challenge
        let pubkeys: Vec<PublicKey> = signers.iter().map(|s| s.keypair.public).collect();
        let aggregated_pubkey = aggregate_pubkeys(&pubkeys).unwrap();
        let challenge = Challenge::new(&aggregated_commit, &aggregated_pubkey, message).unwrap();

        // round 4: respond and aggregate
        let responses: Vec<Response> = signers
            .iter_mut()
            .map(|s| {
                let response =
                    Response::new(s.secret.take().unwrap(), &challenge, &s.keypair.secret)
                        .unwrap();
                assert!(verify_response(
                    &response,
                    &challenge,
                    &s.keypair.public,
                    &s.point
                ));
                response
            })
            .collect();

        let signature = aggregate_signature(&challenge, &responses).unwrap();
        (signature, aggregated_pubkey)
    }

    #[test]
    fn two_signers_produce_one_verifiable_signature() {
        let message = [0xDE, 0xAD, 0xBE, 0xEF];
        let (signature, aggregated_pubkey) = run_protocol(&message, 2, 70);

        assert!(aggregated_pubkey.verify(&message, &signature));

        // the aggregate does not verify under either signer alone
        let mut csprng = ChaCha20Rng::from_seed([70u8; 32]);
        let solo = Keypair::generate(&mut csprng);
        assert!(!solo.public.verify(&message, &signature));
    }

    #[test]
    fn three_signers_also_aggregate() {
        let message = b"three-of-three signing";
        let (signature, aggregated_pubkey) = run_protocol(message, 3, 71);
        assert!(aggregated_pubkey.verify(message, &signature));
    }

    #[test]
    fn lone_signer_degenerates_to_a_plain_signature() {
        let message = b"group of one";
        let (signature, aggregated_pubkey) = run_protocol(message, 1, 72);
        assert!(aggregated_pubkey.verify(message, &signature));
    }

    #[test]
    fn forged_reveal_aborts_the_round() {
        let mut csprng = ChaCha20Rng::from_seed([73u8; 32]);
        let honest = CommitPoint::new(&CommitSecret::generate(&mut csprng)).unwrap();
        let hash = honest.precommit();

        let forged = CommitPoint::new(&CommitSecret::generate(&mut csprng)).unwrap();
        assert_eq!(
            hash.verify_reveal(&forged),
            Err(from_musig(MuSigError::MismatchedCommitment))
        );
    }

    #[test]
    fn bad_response_is_attributable() {
        let mut csprng = ChaCha20Rng::from_seed([74u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let liar = Keypair::generate(&mut csprng);

        let secret = CommitSecret::generate(&mut csprng);
        let commit = CommitPoint::new(&secret).unwrap();
        let challenge = Challenge::new(&commit, &keypair.public, b"attribution").unwrap();

        // response computed with the wrong secret key fails the share check
        let response = Response::new(secret, &challenge, &liar.secret).unwrap();
        assert!(!verify_response(
            &response,
            &challenge,
            &keypair.public,
            &commit
        ));
    }

    #[test]
    fn empty_roster_is_rejected_everywhere() {
        assert_eq!(
            aggregate_pubkeys(&[]),
            Err(from_musig(MuSigError::NotEnoughParticipants))
        );
        assert_eq!(
            aggregate_commits(&[]),
            Err(from_musig(MuSigError::NotEnoughParticipants))
        );

        let mut csprng = ChaCha20Rng::from_seed([75u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let commit = CommitPoint::new(&CommitSecret::generate(&mut csprng)).unwrap();
        let challenge = Challenge::new(&commit, &keypair.public, b"empty roster").unwrap();
        assert_eq!(
            aggregate_signature(&challenge, &[]),
            Err(from_musig(MuSigError::NotEnoughParticipants))
        );
    }

    #[test]
    fn aggregate_signature_survives_the_wire() {
        let message = b"serialize the aggregate";
        let (signature, aggregated_pubkey) = run_protocol(message, 2, 76);

        let mut buf = Vec::new();
        signature.serialize(&mut buf, 0);
        let decoded = Signature::deserialize(&buf, 0).unwrap();
        assert!(aggregated_pubkey.verify(message, &decoded));
    }
}
