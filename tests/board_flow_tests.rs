use std::time::Duration;

use job_board::app::{App, Command, Flow};
use job_board::views::render::{Header, JobsSection};
use job_board::views::{AlertKind, CandidateLookupView};
use job_board::SessionState;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "https://github.com/ada/engine";

fn app(server: &MockServer) -> App {
    let view = CandidateLookupView::new(Some(server.uri()), SessionState::new());
    App::new(view, None).unwrap()
}

async fn mount_jobs(server: &MockServer, jobs: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/jobs/get-list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_candidate(server: &MockServer, email: &str) {
    Mock::given(method("GET"))
        .and(path("/api/candidate/get-by-email"))
        .and(query_param("email", email))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "u-1",
            "candidateId": "c-1",
            "applicationId": "a-1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email
        })))
        .mount(server)
        .await;
}

async fn log_in(app: &mut App, email: &str) {
    app.apply(Command::Email(email.to_string())).unwrap();
    app.apply(Command::Lookup).unwrap();
    app.settle().await;
}

fn two_jobs() -> serde_json::Value {
    json!([
        { "id": "j-1", "title": "Backend Engineer" },
        { "id": "j-2", "title": "Frontend Engineer" }
    ])
}

#[tokio::test]
async fn rendered_list_matches_fetched_jobs() {
    let server = MockServer::start().await;
    mount_jobs(
        &server,
        json!([
            { "id": "a", "title": "Backend Engineer" },
            { "id": "b", "title": "SRE" },
            { "id": "c", "title": "Data Engineer" }
        ]),
    )
    .await;

    let mut app = app(&server);
    app.mount();
    assert_eq!(app.render().jobs, JobsSection::Loading);

    app.settle().await;
    let page = app.render();
    let titles: Vec<&str> = page.job_items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Backend Engineer", "SRE", "Data Engineer"]);
}

#[tokio::test]
async fn job_list_failure_is_shown_in_place_of_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/get-list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    app.settle().await;

    assert_eq!(
        app.render().jobs,
        JobsSection::Error("Request failed with status 500".to_string())
    );
}

#[tokio::test]
async fn unknown_candidate_shows_not_found() {
    let server = MockServer::start().await;
    mount_jobs(&server, two_jobs()).await;
    Mock::given(method("GET"))
        .and(path("/api/candidate/get-by-email"))
        .and(query_param("email", "a@b.com"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    log_in(&mut app, "a@b.com").await;

    let page = app.render();
    let alert = page.alert.as_ref().unwrap();
    assert!(alert.not_found);
    assert_eq!(alert.message, "No candidate found for \"a@b.com\".");
    assert!(app.view().user().is_none());
    assert!(page.to_string().contains("Candidate not found."));
}

#[tokio::test]
async fn login_greets_and_logout_restores_email_form() {
    let server = MockServer::start().await;
    mount_jobs(&server, two_jobs()).await;
    mount_candidate(&server, "ada@example.com").await;

    let mut app = app(&server);
    app.mount();
    log_in(&mut app, "  ada@example.com ").await;

    assert_eq!(app.render().greeting(), Some("Hi, Ada Lovelace"));
    assert!(app.view().session().is_logged_in());
    assert!(app.apply(Command::Lookup).is_err());

    app.apply(Command::Logout).unwrap();
    assert!(matches!(app.render().header, Header::EmailForm { .. }));
    assert!(!app.view().session().is_logged_in());
    assert_eq!(app.render().job_items().len(), 2);
}

#[tokio::test]
async fn submission_without_login_sends_nothing() {
    let server = MockServer::start().await;
    mount_jobs(&server, two_jobs()).await;
    Mock::given(method("POST"))
        .and(path("/api/candidate/apply-to-job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    app.settle().await;

    app.apply(Command::Url {
        job: "1".to_string(),
        value: REPO.to_string(),
    })
    .unwrap();
    app.apply(Command::Submit {
        job: "1".to_string(),
    })
    .unwrap();

    assert_eq!(app.in_flight(), 0);
    let alert = app.view().positions().alert("j-1").unwrap();
    assert_eq!(
        alert.message,
        "You are not logged in. Please login before applying."
    );
}

#[tokio::test]
async fn successful_application() {
    let server = MockServer::start().await;
    mount_jobs(&server, two_jobs()).await;
    mount_candidate(&server, "ada@example.com").await;
    Mock::given(method("POST"))
        .and(path("/api/candidate/apply-to-job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    log_in(&mut app, "ada@example.com").await;

    app.apply(Command::Url {
        job: "j-2".to_string(),
        value: REPO.to_string(),
    })
    .unwrap();
    app.apply(Command::Submit {
        job: "j-2".to_string(),
    })
    .unwrap();

    let page = app.render();
    assert_eq!(page.job_items()[1].submit.label, "Submitting...");
    assert!(page.job_items()[1].submit.disabled);

    app.settle().await;
    let positions = app.view().positions();
    let alert = positions.alert("j-2").unwrap();
    assert_eq!(alert.kind, AlertKind::Success);
    assert_eq!(alert.message, "Application submitted successfully.");
    assert!(!positions.is_submitting("j-2"));
}

#[tokio::test]
async fn application_failures_stay_on_their_job() {
    let server = MockServer::start().await;
    mount_jobs(&server, two_jobs()).await;
    mount_candidate(&server, "ada@example.com").await;
    Mock::given(method("POST"))
        .and(path("/api/candidate/apply-to-job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": false })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    log_in(&mut app, "ada@example.com").await;

    app.apply(Command::Url {
        job: "1".to_string(),
        value: REPO.to_string(),
    })
    .unwrap();
    app.apply(Command::Url {
        job: "2".to_string(),
        value: "https://github.com/ada".to_string(),
    })
    .unwrap();
    app.apply(Command::Submit {
        job: "1".to_string(),
    })
    .unwrap();
    app.settle().await;

    let positions = app.view().positions();
    assert_eq!(
        positions.alert("j-1").unwrap().message,
        "Unexpected API response"
    );
    assert!(positions.alert("j-2").is_none());
    assert_eq!(positions.github_url("j-2"), "https://github.com/ada");
    assert!(!positions.is_submitting("j-2"));

    let page = app.render();
    assert!(page.job_items()[0].alert.as_ref().unwrap().role_alert);
}

#[tokio::test]
async fn server_error_on_application() {
    let server = MockServer::start().await;
    mount_jobs(&server, two_jobs()).await;
    mount_candidate(&server, "ada@example.com").await;
    Mock::given(method("POST"))
        .and(path("/api/candidate/apply-to-job"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    log_in(&mut app, "ada@example.com").await;

    app.apply(Command::Url {
        job: "1".to_string(),
        value: REPO.to_string(),
    })
    .unwrap();
    app.apply(Command::Submit {
        job: "1".to_string(),
    })
    .unwrap();
    app.settle().await;

    assert_eq!(
        app.view().positions().alert("j-1").unwrap().message,
        "Request failed with status 500"
    );
}

#[tokio::test]
async fn jobs_arriving_after_unmount_are_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/get-list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(two_jobs())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.mount();
    app.unmount();
    app.settle().await;

    assert_eq!(app.in_flight(), 0);
    assert!(app.view().jobs().is_empty());
    assert_eq!(app.apply(Command::Quit), Ok(Flow::Quit));
}
