//! End-to-end pipeline: length oracle, initial fetch, backfill, verification.

mod common;

use std::num::NonZeroU64;

use common::{Request, ScriptedClient, payload};
use refill_fetch::{
    ByteRange, ExpectedDigest, FetchError, FetchOptions, Fetcher, VerificationOutcome,
};
use sha2::{Digest, Sha256};

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn reference_hex(data: &[u8]) -> String { hex::encode(Sha256::digest(data)) }

fn fetcher(client: ScriptedClient) -> Fetcher<ScriptedClient> {
    Fetcher::new(client, "http://glitchy.test/")
        .with_options(FetchOptions::default().chunk_size(NonZeroU64::new(1024).unwrap()))
}

#[tokio::test]
async fn test_digest_matches_independent_reference() {
    let data = payload(10_000);
    let expected = ExpectedDigest::from_hex(&reference_hex(&data)).unwrap();
    let fetcher = fetcher(ScriptedClient::new(data.clone(), 1234));

    let verified = fetcher.download_verified(Some(&expected)).await.unwrap();

    assert_eq!(verified.verification.outcome, VerificationOutcome::Match);
    assert_eq!(verified.verification.digest.to_hex(), reference_hex(&data));
    assert_eq!(verified.download.payload, data);
}

#[tokio::test]
async fn test_reference_is_case_insensitive() {
    let data = payload(300);
    let expected = ExpectedDigest::from_hex(&reference_hex(&data).to_uppercase()).unwrap();
    let fetcher = fetcher(ScriptedClient::new(data, 100));

    let verified = fetcher.download_verified(Some(&expected)).await.unwrap();

    assert_eq!(verified.verification.outcome, VerificationOutcome::Match);
}

#[tokio::test]
async fn test_without_reference_outcome_is_not_an_error() {
    let data = payload(2048);
    let fetcher = fetcher(ScriptedClient::new(data.clone(), 2048));

    let verified = fetcher.download_verified(None).await.unwrap();

    assert_eq!(
        verified.verification.outcome,
        VerificationOutcome::NoReferenceProvided
    );
    assert_eq!(verified.verification.digest.to_hex(), reference_hex(&data));
}

#[tokio::test]
async fn test_empty_payload_digest() {
    let fetcher = fetcher(ScriptedClient::new(payload(0), 0));

    let verified = fetcher.download_verified(None).await.unwrap();

    assert_eq!(verified.verification.digest.to_hex(), EMPTY_SHA256);
}

#[tokio::test]
async fn test_mismatch_is_surfaced() {
    let data = payload(5000);
    let wrong = ExpectedDigest::from_hex(EMPTY_SHA256).unwrap();
    let fetcher = fetcher(ScriptedClient::new(data.clone(), 17));

    let err = fetcher.download_verified(Some(&wrong)).await.unwrap_err();

    match err {
        FetchError::HashMismatch { expected, actual } => {
            assert_eq!(expected, EMPTY_SHA256);
            assert_eq!(actual, reference_hex(&data));
        }
        other => panic!("expected HashMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exchanges_run_in_pipeline_order() {
    let fetcher = fetcher(ScriptedClient::new(payload(2500), 1000));

    fetcher.download_verified(None).await.unwrap();

    assert_eq!(
        fetcher.client().requests(),
        vec![
            Request::Probe,
            Request::Initial,
            Request::Range(ByteRange::new(1000, 2023).unwrap()),
            Request::Range(ByteRange::new(2024, 2499).unwrap()),
        ]
    );
}

#[tokio::test]
async fn test_initial_transport_failure_aborts() {
    let fetcher = fetcher(ScriptedClient::new(payload(100), 10).fail_initial());

    let err = fetcher.download_verified(None).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(
        fetcher.client().requests(),
        vec![Request::Probe, Request::Initial]
    );
}
