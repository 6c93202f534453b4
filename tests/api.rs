mod common;

use common::{PRACTICUM_TOKEN, STATUSES_PATH, client_config, closed_address};
use homework_bot::{client::HomeworkApi, domain::check_response, result::BotError};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

#[tokio::test]
async fn sends_oauth_header_and_from_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .and(header("Authorization", format!("OAuth {PRACTICUM_TOKEN}").as_str()))
        .and(query_param("from_date", "1700000000"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"homeworks": [], "current_date": 1700000600})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = HomeworkApi::new(&client_config(&server.uri())).unwrap();
    let answer = api.get_api_answer(1_700_000_000).await.unwrap();

    assert!(check_response(&answer).unwrap().is_empty());
    assert_eq!(answer["current_date"], 1700000600);
}

#[tokio::test]
async fn non_ok_status_is_endpoint_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = HomeworkApi::new(&client_config(&server.uri())).unwrap();

    assert_eq!(
        api.get_api_answer(0).await.unwrap_err(),
        BotError::EndpointUnavailable { status: 404 }
    );
}

#[tokio::test]
async fn other_success_codes_are_not_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = HomeworkApi::new(&client_config(&server.uri())).unwrap();

    assert_eq!(
        api.get_api_answer(0).await.unwrap_err(),
        BotError::EndpointUnavailable { status: 204 }
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let api = HomeworkApi::new(&client_config(&server.uri())).unwrap();

    assert!(matches!(api.get_api_answer(0).await, Err(BotError::MalformedBody(_))));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let api = HomeworkApi::new(&client_config(&closed_address())).unwrap();

    assert!(matches!(api.get_api_answer(0).await, Err(BotError::Transport(_))));
}
