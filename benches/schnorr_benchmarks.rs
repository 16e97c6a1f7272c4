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

#[macro_use]
extern crate criterion;

mod schnorr_benches {
    use criterion::Criterion;
    use ecschnorr::musig::{
        aggregate_commits, aggregate_pubkeys, aggregate_signature, Challenge, CommitPoint,
        CommitSecret, Response,
    };
    use ecschnorr::*;
    use rand::rngs::OsRng;

    pub fn sign(c: &mut Criterion) {
        let keypair = Keypair::generate(&mut OsRng);

        c.bench_function("Schnorr signing", move |b| {
            b.iter(|| keypair.sign(b"yummy").unwrap())
        });
    }

    pub fn verify(c: &mut Criterion) {
        let keypair = Keypair::generate(&mut OsRng);
        let sig = keypair.sign(b"yummy").unwrap();

        c.bench_function("Schnorr signature verification", move |b| {
            b.iter(|| keypair.verify(b"yummy", &sig))
        });
    }

    pub fn aggregate_two_signers(c: &mut Criterion) {
        let keypairs: Vec<Keypair> = (0..2).map(|_| Keypair::generate(&mut OsRng)).collect();
        let pubkeys: Vec<PublicKey> = keypairs.iter().map(|kp| kp.public).collect();
        let message = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

        c.bench_function("Schnorr two-signer aggregation", move |b| {
            b.iter(|| {
                let secrets: Vec<CommitSecret> =
                    keypairs.iter().map(|_| CommitSecret::generate(&mut OsRng)).collect();
                let commits: Vec<CommitPoint> = secrets
                    .iter()
                    .map(|k| CommitPoint::new(k).unwrap())
                    .collect();

                let aggregated_commit = aggregate_commits(&commits).unwrap();
                let aggregated_pubkey = aggregate_pubkeys(&pubkeys).unwrap();
                let challenge =
                    Challenge::new(&aggregated_commit, &aggregated_pubkey, message).unwrap();

                let responses: Vec<Response> = secrets
                    .into_iter()
                    .zip(keypairs.iter())
                    .map(|(k, kp)| Response::new(k, &challenge, &kp.secret).unwrap())
                    .collect();

                aggregate_signature(&challenge, &responses).unwrap()
            })
        });
    }

    criterion_group! {
        name = schnorr_benches;
        config = Criterion::default();
        targets =
            sign,
            verify,
            aggregate_two_signers,
    }
}

criterion_main!(schnorr_benches::schnorr_benches);
