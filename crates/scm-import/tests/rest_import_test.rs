/// End-to-end tests of the import workflow against a mocked SCM server
///
/// Verifies:
/// 1. Importable types are read from `import/repositories.json`
/// 2. A checked list fans out one POST per type and presents once
/// 3. Server failures surface as notifications with the server's title/message
/// 4. A body that is not JSON is notified as an invalid response
/// 5. The wizard posts url parameters as JSON
use scm_core::{ClientConfig, Notification, Notifier, RestClient};
use scm_import::{
    ImportCoordinator, RepositoryListing, RestImportBackend, ResultPresenter, ResultView,
    WizardDirection, WizardStep,
};
use scm_import_types::{ImportSourceKind, ImportedRepository};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct SharedView(Arc<Mutex<Vec<Vec<ImportedRepository>>>>);

impl ResultView for SharedView {
    fn render(&mut self, repositories: &[ImportedRepository]) {
        self.0.lock().unwrap().push(repositories.to_vec());
    }
}

#[derive(Clone, Default)]
struct SharedListing(Arc<Mutex<usize>>);

impl RepositoryListing for SharedListing {
    fn refresh(&mut self) {
        *self.0.lock().unwrap() += 1;
    }
}

#[derive(Clone, Default)]
struct SharedNotifier(Arc<Mutex<Vec<Notification>>>);

impl Notifier for SharedNotifier {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

fn coordinator(server: &MockServer, notifier: SharedNotifier) -> ImportCoordinator {
    let config = ClientConfig::new(format!("{}/scm/api/rest", server.uri()));
    let client = RestClient::new(config).expect("client");
    ImportCoordinator::new(
        Arc::new(RestImportBackend::new(client)),
        Arc::new(notifier),
    )
}

async fn mount_types(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/scm/api/rest/import/repositories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "git", "displayName": "Git", "supportedCommands": ["PULL"] },
            { "name": "svn", "displayName": "Subversion", "supportedCommands": ["UNBUNDLE"] }
        ])))
        .mount(server)
        .await;
}

async fn mount_import(server: &MockServer, repository_type: &str, delay_ms: u64, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!(
            "/scm/api/rest/import/repositories/{}.json",
            repository_type
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_importable_types_are_loaded() {
    let server = MockServer::start().await;
    mount_types(&server).await;

    let types = coordinator(&server, SharedNotifier::default())
        .importable_types()
        .await
        .unwrap();

    assert_eq!(types.len(), 2);
    assert_eq!(types[1].display_name, "Subversion");
}

#[tokio::test]
async fn test_checked_types_import_in_either_order() {
    for (git_delay, svn_delay) in [(0, 150), (150, 0)] {
        let server = MockServer::start().await;
        mount_types(&server).await;
        mount_import(
            &server,
            "git",
            git_delay,
            serde_json::json!([{ "type": "git", "name": "a" }]),
        )
        .await;
        mount_import(
            &server,
            "svn",
            svn_delay,
            serde_json::json!([
                { "type": "svn", "name": "b" },
                { "type": "svn", "name": "c" }
            ]),
        )
        .await;

        let coordinator = coordinator(&server, SharedNotifier::default());
        let types = coordinator.importable_types().await.unwrap();

        let view = SharedView::default();
        let listing = SharedListing::default();
        let mut presenter =
            ResultPresenter::new(Box::new(view.clone())).with_listing(Box::new(listing.clone()));

        let session = coordinator.import_checked(&types, &mut presenter).await;

        assert_eq!(session.dispatched_job_count(), 2);
        assert_eq!(session.completed_job_count(), 2);

        let results = session.accumulated_results();
        assert_eq!(results.len(), 3);
        assert!(results.contains(&ImportedRepository::new("git", "a")));
        let svn: Vec<&str> = results
            .iter()
            .filter(|r| r.repository_type == "svn")
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(svn, vec!["b", "c"]);

        assert_eq!(view.0.lock().unwrap().len(), 1);
        assert_eq!(*listing.0.lock().unwrap(), 1);
    }
}

#[tokio::test]
async fn test_server_failure_is_notified_and_blocks_completion() {
    let server = MockServer::start().await;
    mount_types(&server).await;
    mount_import(
        &server,
        "git",
        0,
        serde_json::json!([{ "type": "git", "name": "a" }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/scm/api/rest/import/repositories/svn.json"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "title": "Import Error",
            "message": "could not read repository directory"
        })))
        .mount(&server)
        .await;

    let notifier = SharedNotifier::default();
    let coordinator = coordinator(&server, notifier.clone());
    let types = coordinator.importable_types().await.unwrap();
    let view = SharedView::default();
    let mut presenter = ResultPresenter::new(Box::new(view.clone()));

    let session = coordinator.import_checked(&types, &mut presenter).await;

    assert!(!session.is_complete());
    assert_eq!(session.completed_job_count(), 1);
    assert!(view.0.lock().unwrap().is_empty());

    let notifications = notifier.0.lock().unwrap().clone();
    assert_eq!(
        notifications,
        vec![Notification::new(
            "Import Error",
            "could not read repository directory"
        )]
    );
}

#[tokio::test]
async fn test_malformed_import_response_is_notified_and_blocks_completion() {
    let server = MockServer::start().await;
    mount_types(&server).await;
    mount_import(
        &server,
        "git",
        0,
        serde_json::json!([{ "type": "git", "name": "a" }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/scm/api/rest/import/repositories/svn.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = SharedNotifier::default();
    let coordinator = coordinator(&server, notifier.clone());
    let types = coordinator.importable_types().await.unwrap();
    let view = SharedView::default();
    let listing = SharedListing::default();
    let mut presenter =
        ResultPresenter::new(Box::new(view.clone())).with_listing(Box::new(listing.clone()));

    let session = coordinator.import_checked(&types, &mut presenter).await;

    assert_eq!(session.dispatched_job_count(), 2);
    assert_eq!(session.completed_job_count(), 1);
    assert_eq!(session.failed_job_count(), 1);
    assert!(!session.is_complete());
    assert!(view.0.lock().unwrap().is_empty());
    assert_eq!(*listing.0.lock().unwrap(), 0);

    let notifications = notifier.0.lock().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Invalid Response");
}

#[tokio::test]
async fn test_wizard_posts_url_parameters() {
    let server = MockServer::start().await;
    mount_types(&server).await;
    Mock::given(method("POST"))
        .and(path("/scm/api/rest/import/repositories/git/url.json"))
        .and(body_json(serde_json::json!({
            "name": "remote",
            "url": "https://example.com/remote.git"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "type": "git", "name": "remote" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = coordinator(&server, SharedNotifier::default());
    let view = SharedView::default();
    let mut wizard = coordinator
        .open_wizard(ResultPresenter::new(Box::new(view.clone())))
        .await
        .unwrap();

    wizard.select_repository_type("git").unwrap();
    wizard.advance(WizardDirection::Forward).await.unwrap();
    wizard.select_import_source(ImportSourceKind::Url).unwrap();
    wizard.advance(WizardDirection::Forward).await.unwrap();
    wizard.set_source_parameter("name", "remote").unwrap();
    wizard
        .set_source_parameter("url", "https://example.com/remote.git")
        .unwrap();

    let step = wizard.advance(WizardDirection::Forward).await.unwrap();
    assert_eq!(step, WizardStep::Finished);

    let imported = wizard.finish().unwrap();
    assert_eq!(imported, vec![ImportedRepository::new("git", "remote")]);
    assert_eq!(view.0.lock().unwrap().len(), 1);
}
