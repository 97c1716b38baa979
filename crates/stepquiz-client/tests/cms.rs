use http::{Method, StatusCode};
use stepquiz_client::content::cms::parse_entries;
use stepquiz_client::{CmsConfig, CmsContentSource};
use stepquiz_core::source::{ContentSource, SourceError};
use stepquiz_model::quiz::step::sort_steps;
use stepquiz_test_helpers::FakeHttpClient;
use stepquiz_test_helpers::fixtures::capitals_quiz;
use test_log::test;
use url::Url;

const ENTRIES: &str = include_str!("../test_data/entries.json");

fn cms_config() -> CmsConfig {
    CmsConfig {
        base_url: Url::parse("https://cdn.example.com/").unwrap(),
        space: "space1".to_owned(),
        environment: "master".to_owned(),
        token: "token1".to_owned(),
    }
}

#[test]
fn test_entries_match_fixture() {
    let mut content = parse_entries(ENTRIES).unwrap();
    sort_steps(&mut content.steps);

    let mut expected = capitals_quiz();
    if let Some(italy) = expected.questions.get_mut("italy") {
        italy.explanation = Some("Rome has been the capital of Italy since 1871.".to_owned());
    }
    assert_eq!(content.steps, expected.steps);
    assert_eq!(content.questions, expected.questions);
}

#[test(tokio::test)]
async fn test_fetch_sends_authorized_request() {
    let http = FakeHttpClient::new().respond(StatusCode::OK, ENTRIES);
    let source = CmsContentSource::new(cms_config(), http.clone());

    let content = source.fetch().await.unwrap();
    assert_eq!(content.steps.len(), 4);

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].uri,
        "https://cdn.example.com/spaces/space1/environments/master/entries?content_type=step&order=fields.stepOrder"
    );
    assert_eq!(requests[0].header("authorization"), Some("Bearer token1"));
}

#[test(tokio::test)]
async fn test_fetch_failures() {
    let http = FakeHttpClient::new()
        .respond(StatusCode::UNAUTHORIZED, r#"{"message": "The access token you sent could not be found"}"#)
        .respond(StatusCode::OK, r#"{"items": [{"fields": {"stepOrder": 1}}]}"#)
        .time_out();
    let source = CmsContentSource::new(cms_config(), http);

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Fetch(_)));
    assert!(err.to_string().contains("401"), "{err}");

    assert!(matches!(source.fetch().await, Err(SourceError::Invalid(_))));
    assert!(matches!(source.fetch().await, Err(SourceError::Fetch(_))));
}
