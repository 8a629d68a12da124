use std::time::Duration;

use jobhub_client::{
    ApiConfig, ClientSettings, FailureKind, JobsApi, ReqwestJobsApi, ScrapeReceipt,
};
use jobhub_core::JobStatus;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestJobsApi {
    ReqwestJobsApi::new(
        ApiConfig::with_base_url(format!("{}/api/v1/", server.uri())),
        &ClientSettings::default(),
    )
    .expect("client")
}

#[tokio::test]
async fn list_jobs_normalizes_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/job-postings/"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "company": "Acme Corp", "status": "Applied", "score": 72 },
            { "_id": "b2", "employer": "Globex", "title": "Full Stack Developer" }
        ])))
        .mount(&server)
        .await;

    let jobs = client_for(&server).list_jobs().await.expect("list ok");
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].id, "1");
    assert_eq!(jobs[0].status, JobStatus::Applied);
    assert_eq!(jobs[0].score, Some(72.0));
    assert_eq!(jobs[1].id, "b2");
    assert_eq!(jobs[1].company, "Globex");
    assert_eq!(jobs[1].position, "Full Stack Developer");
}

#[tokio::test]
async fn list_jobs_accepts_data_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/job-postings/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": "x" }] })),
        )
        .mount(&server)
        .await;

    let jobs = client_for(&server).list_jobs().await.expect("list ok");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "x");
}

#[tokio::test]
async fn list_jobs_fails_with_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/job-postings/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.to_string(), "Failed to fetch jobs: 503");
}

#[tokio::test]
async fn list_jobs_rejects_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/job-postings/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn list_jobs_without_configuration_fails_immediately() {
    let api = ReqwestJobsApi::new(ApiConfig::default(), &ClientSettings::default()).unwrap();
    let err = api.list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Config);
}

#[tokio::test]
async fn jobs_override_url_is_used_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/custom/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let config = ApiConfig {
        jobs_url: Some(format!("{}/custom/jobs", server.uri())),
        ..ApiConfig::default()
    };
    let api = ReqwestJobsApi::new(config, &ClientSettings::default()).unwrap();
    assert!(api.list_jobs().await.expect("list ok").is_empty());
}

#[tokio::test]
async fn submit_url_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scrape/jobs"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "url": "https://jobs.example.com/1" })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "queued": true })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .submit_url(" https://jobs.example.com/1 ")
        .await
        .expect("submit ok");
    assert_eq!(receipt, ScrapeReceipt::Body(json!({ "queued": true })));
}

#[tokio::test]
async fn submit_url_tolerates_non_json_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scrape/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .submit_url("https://jobs.example.com/2")
        .await
        .expect("submit ok");
    assert_eq!(receipt, ScrapeReceipt::Acknowledged);
}

#[tokio::test]
async fn submit_url_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scrape/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_url("https://jobs.example.com/3")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.to_string(), "Scrape request failed: 500");
}

#[tokio::test]
async fn submit_url_requires_a_value() {
    let server = MockServer::start().await;
    let err = client_for(&server).submit_url("").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidArgument);
}

#[tokio::test]
async fn update_status_patches_job_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/job-postings/job-7/status"))
        .and(body_json(json!({ "status": "Interview" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job-7",
            "company": "Initech",
            "status": "Interview"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let job = client_for(&server)
        .update_status("job-7", JobStatus::Interview)
        .await
        .expect("patch ok")
        .expect("job echoed");
    assert_eq!(job.id, "job-7");
    assert_eq!(job.status, JobStatus::Interview);
}

#[tokio::test]
async fn update_status_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/job-postings/job-7/status"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_status("job-7", JobStatus::Offer)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn update_status_requires_job_id() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .update_status(" ", JobStatus::Offer)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidArgument);
}

#[tokio::test]
async fn request_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/job-postings/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    };
    let api = ReqwestJobsApi::new(
        ApiConfig::with_base_url(format!("{}/api/v1", server.uri())),
        &settings,
    )
    .unwrap();
    let err = api.list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
