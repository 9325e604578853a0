//! Integration tests for the PTV client (wiremock-based)

use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ptv_client::{
    Credentials, DeparturesRequest, DisruptionsRequest, Expand, PatternRequest, PtvClient,
    PtvConfig, PtvError, QueryParams, RequestSigner, ResponseStatus, RouteType,
    RouteTypesRequest, SearchRequest, StopsForLocationRequest, TimetableApi,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config_for_mock(base_url: &str) -> PtvConfig {
    PtvConfig {
        base_url: base_url.to_string(),
        ..PtvConfig::for_testing()
    }
}

/// Signature the server should expect for `path` and `params` with the test credentials
fn expected_signature(path: &str, params: &QueryParams) -> String {
    let signer = RequestSigner::new("http://unused", Credentials::new("1", "secret").unwrap());
    signer
        .build_request(path, params)
        .unwrap()
        .signature()
        .to_string()
}

const fn sample_departures_json() -> &'static str {
    r#"{
        "departures": [{
            "stop_id": 1071,
            "route_id": 1,
            "run_id": 951234,
            "direction_id": 1,
            "scheduled_departure_utc": "2026-10-18T09:30:00Z",
            "platform_number": "5"
        }],
        "stops": {},
        "routes": {},
        "runs": {},
        "directions": {},
        "disruptions": {},
        "status": { "version": "3.0", "health": 1 }
    }"#
}

const fn sample_route_types_json() -> &'static str {
    r#"{
        "route_types": [
            { "route_type_name": "Train", "route_type": 0 },
            { "route_type_name": "Tram", "route_type": 1 }
        ],
        "status": { "version": "3.0", "health": 1 }
    }"#
}

#[tokio::test]
async fn test_departures_success() {
    init_tracing();
    let server = MockServer::start().await;
    let signature =
        expected_signature("/v3/departures/route_type/0/stop/1071", &QueryParams::new());

    Mock::given(method("GET"))
        .and(path("/v3/departures/route_type/0/stop/1071"))
        .and(query_param("devid", "1"))
        .and(query_param("signature", signature.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let response = client
        .fetch(&DeparturesRequest::new(RouteType::Train, 1071))
        .await
        .unwrap();

    for key in ["departures", "stops", "routes", "runs", "directions", "disruptions", "status"] {
        assert!(response.contains_key(key), "missing key {key}");
    }
    let status = ResponseStatus::from_response(&response).unwrap();
    assert!(status.is_healthy());
}

#[tokio::test]
async fn test_query_order_is_preserved_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/departures/route_type/0/stop/1071"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    client
        .fetch(
            &DeparturesRequest::new(RouteType::Train, 1071)
                .with_max_results(3)
                .with_expand([Expand::Stop, Expand::Direction]),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let params = QueryParams::new()
        .with("max_results", 3_u32)
        .with("expand", "stop")
        .with("expand", "direction");
    let signature = expected_signature("/v3/departures/route_type/0/stop/1071", &params);
    let expected =
        format!("max_results=3&expand=stop&expand=direction&devid=1&signature={signature}");
    assert_eq!(requests[0].url.query(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_invalid_stop_id_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .fetch(&DeparturesRequest::new(RouteType::Train, "flinders-street"))
        .await;

    assert!(matches!(
        result,
        Err(PtvError::InvalidParameter { name: "stop_id", .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_forbidden_carries_api_message() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/route_types"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"{"message": "Forbidden (403): Invalid signature", "status": {"version": "3.0", "health": 1}}"#,
        ))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.fetch(&RouteTypesRequest).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("Invalid signature"));
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.fetch(&DisruptionsRequest::new()).await.unwrap_err();

    assert!(matches!(err, PtvError::Transport { status: Some(500), .. }));
}

#[tokio::test]
async fn test_invalid_json_is_response_format_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/route_types"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.fetch(&RouteTypesRequest).await.unwrap_err();

    assert!(matches!(err, PtvError::ResponseFormat(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // nothing listens on the discard port
    let client = PtvClient::new(&config_for_mock("http://127.0.0.1:9")).unwrap();
    let err = client.fetch(&RouteTypesRequest).await.unwrap_err();

    assert!(matches!(err, PtvError::Transport { status: None, .. }));
}

#[tokio::test]
async fn test_search_term_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v3/search/Flinders(%20| )St$"))
        .and(query_param("include_outlets", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"stops": [], "routes": [], "outlets": [], "status": {"version": "3.0", "health": 1}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let response = client
        .fetch(&SearchRequest::new("Flinders St").with_include_outlets(true))
        .await
        .unwrap();

    assert!(response.contains_key("outlets"));
}

#[tokio::test]
async fn test_pattern_and_stops_for_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/pattern/run/1/route_type/0"))
        .and(query_param("expand", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"departures": [], "disruptions": {}, "status": {"version": "3.0", "health": 1}}"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/stops/location/-37.8182711,144.9648731"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"stops": [], "status": {"version": "3.0", "health": 1}}"#,
        ))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();

    let pattern = client
        .fetch(&PatternRequest::new(1, RouteType::Train, [Expand::All]))
        .await
        .unwrap();
    assert!(pattern.contains_key("departures"));

    let stops = client
        .fetch(&StopsForLocationRequest::new(-37.818_271_1, 144.964_873_1))
        .await
        .unwrap();
    assert!(stops.contains_key("stops"));
}

#[tokio::test]
async fn test_clients_with_different_credentials_coexist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/route_types"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_types_json()))
        .mount(&server)
        .await;

    let first = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    let second = PtvClient::new(&PtvConfig {
        developer_id: Some("2".to_string()),
        api_key: Some("other-secret".to_string().into()),
        ..config_for_mock(&server.uri())
    })
    .unwrap();

    first.fetch(&RouteTypesRequest).await.unwrap();
    second.fetch(&RouteTypesRequest).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let devids: Vec<_> = requests
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "devid")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(devids, vec!["1".to_string(), "2".to_string()]);
    assert_ne!(requests[0].url.query(), requests[1].url.query());
}

#[tokio::test]
async fn test_is_healthy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/route_types"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_types_json()))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn test_is_unhealthy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/route_types"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"route_types": [], "status": {"version": "3.0", "health": 0}}"#,
        ))
        .mount(&server)
        .await;

    let client = PtvClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(!client.is_healthy().await);

    let down = PtvClient::new(&config_for_mock("http://127.0.0.1:9")).unwrap();
    assert!(!down.is_healthy().await);
}
