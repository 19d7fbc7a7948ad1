//! HTTP client behavior against a mock Census Reporter server.

use civiq::error::ApiError;
use civiq::{CensusApi, CensusApiConfig, CiviqError, HttpCensusClient};

fn client_for(server: &mockito::ServerGuard) -> HttpCensusClient {
    let config = CensusApiConfig {
        base_url: server.url(),
        release: "acs2011_5yr".to_string(),
        timeout_secs: 5,
    };
    HttpCensusClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn find_places_parses_the_search_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/geo/search")
        .match_query(mockito::Matcher::UrlEncoded(
            "prefix".into(),
            "springfield".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results":[
                {"full_geoid":"16000US1772000","display_name":"Springfield, IL","sumlevel":160},
                {"full_geoid":"16000US2967000","display_name":"Springfield, MO","sumlevel":160}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let places = client.find_places("springfield").await.unwrap();

    mock.assert_async().await;
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].full_geoid, "16000US1772000");
    assert_eq!(places[1].display_name, "Springfield, MO");
}

#[tokio::test]
async fn fetch_table_parses_rows_by_geoid() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/acs2011_5yr/B03001")
        .match_query(mockito::Matcher::UrlEncoded(
            "geoids".into(),
            "16000US1772000".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"16000US1772000":{"b03001001":"116250","b03001007":"150"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let data = client
        .fetch_table("B03001", &["16000US1772000"])
        .await
        .unwrap();

    mock.assert_async().await;
    let row = data.get("16000US1772000").unwrap();
    assert_eq!(row.get("b03001007").unwrap(), "150");
}

#[tokio::test]
async fn elapsed_timeout_is_a_distinct_failure() {
    // A socket that accepts connections but never answers.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let config = CensusApiConfig {
        base_url: format!("http://{addr}"),
        release: "acs2011_5yr".to_string(),
        timeout_secs: 1,
    };
    let client = HttpCensusClient::from_config(&config).unwrap();

    let err = client.find_places("springfield").await.unwrap_err();
    assert!(matches!(err, CiviqError::Api(ApiError::Timeout { .. })));
}

#[tokio::test]
async fn non_success_status_is_a_distinct_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/geo/search")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.find_places("springfield").await.unwrap_err();
    assert!(matches!(err, CiviqError::Api(ApiError::Status { .. })));
}

#[tokio::test]
async fn undecodable_body_is_a_malformed_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/geo/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.find_places("springfield").await.unwrap_err();
    assert!(matches!(
        err,
        CiviqError::Api(ApiError::MalformedPayload { .. })
    ));
}
