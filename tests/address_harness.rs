#![allow(unused)]
//! Address resolution integration harness.
//!
//! # What this covers
//!
//! - **Request shape**: `q`, `format=json`, `limit=1`, and `countrycodes` are
//!   sent on every lookup.
//! - **Found**: string coordinates in the first hit are parsed.
//! - **Not found**: an empty result array is `Ok(None)`.
//! - **Failures**: non-2xx status, malformed body, unparsable coordinates,
//!   and a refused connection are all `AddressLookupFailed`, and all read
//!   the same to the user as a miss.
//! - **Blank query**: answered locally without a request.
//!
//! Uses a fake Nominatim server (see `common::fake_nominatim`).
//!
//! # What this does NOT cover
//!
//! - The live Nominatim service
//! - Rate limiting or retries (there are none)
//!
//! # Running
//!
//! ```sh
//! cargo test --test address_harness
//! ```

mod common;
use common::fake_nominatim::{unreachable_geocoder, FakeNominatim, Reply};
use common::*;

use mof_core::{Coordinates, Error};
use mof_sources::{AddressResolver, NominatimResolver};
use pretty_assertions::assert_eq;

const MISS_MESSAGE: &str = "Address not found. Try another search.";

async fn resolver_for(reply: Reply) -> (FakeNominatim, NominatimResolver) {
    let api = FakeNominatim::start(reply).await.unwrap();
    let resolver = NominatimResolver::new(&api.geocoder_config()).unwrap();
    (api, resolver)
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn found_address_parses_string_coordinates() {
    let (_api, resolver) = resolver_for(Reply::Found(48.8606, 2.3376)).await;
    let hit = resolver.resolve("Musée du Louvre, Paris").await.unwrap();
    assert_eq!(hit, Some(Coordinates::new(48.8606, 2.3376)));
}

#[tokio::test]
async fn request_carries_query_and_constraints() {
    let (api, resolver) = resolver_for(Reply::Found(45.764, 4.8357)).await;
    resolver.resolve("  place Bellecour, Lyon  ").await.unwrap();

    let requests = api.requests().await;
    assert_eq!(requests.len(), 1);
    let params = &requests[0];
    assert_eq!(params["q"], "place Bellecour, Lyon");
    assert_eq!(params["format"], "json");
    assert_eq!(params["limit"], "1");
    assert_eq!(params["countrycodes"], "fr");
}

#[tokio::test]
async fn empty_result_is_not_found() {
    let (_api, resolver) = resolver_for(Reply::Empty).await;
    assert_eq!(resolver.resolve("zzzz qqqq").await.unwrap(), None);
}

#[tokio::test]
async fn blank_query_sends_nothing() {
    let (api, resolver) = resolver_for(Reply::Found(0.0, 0.0)).await;
    assert_eq!(resolver.resolve("   ").await.unwrap(), None);
    assert!(api.requests().await.is_empty());
}

#[tokio::test]
async fn reply_can_change_between_lookups() {
    let (api, resolver) = resolver_for(Reply::Empty).await;
    assert_eq!(resolver.resolve("Lyon").await.unwrap(), None);

    api.set_reply(Reply::Found(LYON.lat, LYON.lon)).await;
    assert_eq!(resolver.resolve("Lyon").await.unwrap(), Some(LYON));
    assert_eq!(api.requests().await.len(), 2);
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

async fn assert_lookup_failed(reply: Reply) {
    let (_api, resolver) = resolver_for(reply.clone()).await;
    let err = resolver.resolve("Paris").await.unwrap_err();
    assert!(
        matches!(err, Error::AddressLookupFailed(_)),
        "{reply:?} gave {err:?}"
    );
    assert!(err.is_recoverable());
    assert_eq!(err.user_message(), MISS_MESSAGE);
}

#[tokio::test]
async fn server_error_is_lookup_failure() {
    assert_lookup_failed(Reply::Status(500)).await;
}

#[tokio::test]
async fn rate_limit_is_lookup_failure() {
    assert_lookup_failed(Reply::Status(429)).await;
}

#[tokio::test]
async fn malformed_body_is_lookup_failure() {
    assert_lookup_failed(Reply::Malformed).await;
}

#[tokio::test]
async fn bad_coordinates_are_lookup_failure() {
    assert_lookup_failed(Reply::BadCoordinates).await;
}

#[tokio::test]
async fn refused_connection_is_lookup_failure() {
    let resolver = NominatimResolver::new(&unreachable_geocoder()).unwrap();
    let err = resolver.resolve("Paris").await.unwrap_err();
    assert!(matches!(err, Error::AddressLookupFailed(_)));
    assert_eq!(err.user_message(), MISS_MESSAGE);
}

#[test]
fn not_found_and_failure_read_the_same() {
    assert_eq!(
        Error::AddressNotFound("x".into()).user_message(),
        Error::AddressLookupFailed("y".into()).user_message()
    );
}
