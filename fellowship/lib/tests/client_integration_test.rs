//! End-to-end tests for the Fellowship client against a mock API.
//!
//! These tests drive the public surface only: configuration, typed filters,
//! page requests and the bundled resource clients.

use std::time::Duration;

use fellowship::model::{FieldSelector, Movie, MovieField, Quote, QuoteField};
use fellowship::{
    CancellationToken, FellowshipClient, FellowshipConfig, FellowshipError, Filter, FilterError,
    FilterOperator, PageRequest,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FellowshipClient {
    let config = FellowshipConfig::new("integration-key").with_base_url(format!("{}/v2", server.uri()));
    FellowshipClient::from_config(&config).expect("client should build")
}

fn movies_body() -> serde_json::Value {
    json!({
        "docs": [
            {
                "_id": "5cd95395de30eff6ebccde5c",
                "name": "The Fellowship of the Ring",
                "runtimeInMinutes": 178,
                "budgetInMillions": 93,
                "boxOfficeRevenueInMillions": 871.5,
                "academyAwardNominations": 13,
                "academyAwardWins": 4,
                "rottenTomatoesScore": 91
            },
            {
                "_id": "5cd95395de30eff6ebccde5d",
                "name": "The Return of the King",
                "runtimeInMinutes": 201,
                "budgetInMillions": 94,
                "boxOfficeRevenueInMillions": 1120,
                "academyAwardNominations": 11,
                "academyAwardWins": 11,
                "rottenTomatoesScore": 95
            }
        ],
        "total": 2,
        "limit": 1000,
        "offset": 0,
        "page": 1,
        "pages": 1
    })
}

#[tokio::test]
async fn test_filtered_movie_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/movie"))
        .and(header("authorization", "Bearer integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = PageRequest::new().filter(
        Filter::<Movie>::new(MovieField::RuntimeInMinutes, FilterOperator::GreaterThanOrEqual, Some("160"))
            .expect("valid filter"),
    );

    let movies = client_for(&server).movies().get_all(&request).await.unwrap();

    assert_eq!(movies.len(), 2);
    assert!(movies.iter().all(|m| m.runtime_in_minutes >= 160));
    assert_eq!(movies[1].box_office_revenue_in_millions, 1120.0);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = PageRequest::<Movie>::new().limit(10);

    let first = client.movies().get_all_page(&request).await.unwrap();
    let second = client.movies().get_all_page(&request).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_quotes_for_movie_with_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/movie/5cd95395de30eff6ebccde5d/quote"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{
                "_id": "5cd96e05de30eff6ebcce7e9",
                "dialog": "Deagol!",
                "movie": "5cd95395de30eff6ebccde5d",
                "character": "5cd99d4bde30eff6ebccfe9e"
            }],
            "total": 872, "limit": 1, "offset": 0, "page": 1, "pages": 872
        })))
        .mount(&server)
        .await;

    let quotes = client_for(&server)
        .movies()
        .get_quotes("5cd95395de30eff6ebccde5d", &PageRequest::new().limit(1))
        .await
        .unwrap();

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].dialog, "Deagol!");
}

#[tokio::test]
async fn test_quote_lookup_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/quote/does-not-exist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [], "total": 0, "limit": 1000, "offset": 0, "page": 1, "pages": 1
        })))
        .mount(&server)
        .await;

    let quote = client_for(&server).quotes().get_by_id("does-not-exist").await.unwrap();
    assert!(quote.is_none());
}

#[tokio::test]
async fn test_api_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/quote"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests, please try again later."))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .quotes()
        .get_all(&PageRequest::new())
        .await
        .unwrap_err();

    match err {
        FellowshipError::Api(api) => {
            assert_eq!(api.status_code, 429);
            assert_eq!(api.message, "Too many requests, please try again later.");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancellation_through_bundled_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(movies_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = client_for(&server).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let result = client.movies().get_by_id("5cd95395de30eff6ebccde5d").await;
    canceller.await.unwrap();

    assert!(matches!(result, Err(FellowshipError::Cancelled)));
}

#[test]
fn test_filter_construction_errors_are_immediate() {
    let bad_field = Filter::<Quote>::new(FieldSelector::name("dialog.text"), FilterOperator::Match, Some("x"));
    assert!(matches!(bad_field, Err(FilterError::InvalidFieldSelector { .. })));

    let bad_regex = Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("[invalid"));
    match bad_regex {
        Err(err @ FilterError::InvalidRegexPattern { .. }) => assert!(err.to_string().contains("[invalid")),
        other => panic!("Expected InvalidRegexPattern, got {other:?}"),
    }
}
