use common::{FormPayload, UiEvent};
use dispatcher::{DRAG_DROP_ZONE, FormKind, NoticeLevel, QueuedEvents, StaticPage};
use tokio::sync::mpsc;

use crate::support::{MockBackend, TestApp};

#[tokio::test]
async fn empty_page_binds_nothing() {
    let backend = MockBackend::spawn(200, "{}").await;
    let app = TestApp::new(backend.base_url());

    let bindings = app.dispatcher.init(&StaticPage::default());

    assert_eq!(bindings.form_count(), 0);
    assert!(!bindings.is_drop_zone_bound());
    assert!(!bindings.has_container("ai-feedback"));
}

#[tokio::test]
async fn complete_page_binds_everything() {
    let backend = MockBackend::spawn(200, "{}").await;
    let app = TestApp::new(backend.base_url());

    let bindings = app.dispatcher.init(&StaticPage::complete());

    assert_eq!(bindings.form_count(), 5);
    for kind in FormKind::ALL {
        assert!(bindings.is_form_bound(kind));
    }
    assert!(bindings.is_drop_zone_bound());
    assert!(bindings.has_container("ai-feedback"));
    assert!(bindings.has_container("processing-results"));
}

#[tokio::test]
async fn events_for_missing_elements_are_ignored() {
    let backend = MockBackend::spawn(200, "{}").await;
    let app = TestApp::new(backend.base_url());
    let page = StaticPage::new(["appealForm"]);

    let upload = UiEvent::submit("uploadForm", FormPayload::new().text("a", "b"));
    let upload_flag = upload.default_action();
    let summary = app
        .dispatcher
        .run(
            &page,
            QueuedEvents::new([
                upload,
                UiEvent::drag_over(DRAG_DROP_ZONE),
                UiEvent::submit("appealForm", FormPayload::new().text("reason", "x")),
            ]),
        )
        .await;

    assert_eq!(summary.dispatched, 1);
    assert_eq!(summary.ignored, 2);
    assert!(!upload_flag.is_prevented());
    assert!(app.surface.class_ops().is_empty());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/appeals");
}

#[tokio::test]
async fn concurrent_submissions_all_complete() {
    let backend = MockBackend::spawn(200, r#"{"ok":true}"#).await;
    let app = TestApp::new(backend.base_url());
    let (tx, rx) = mpsc::channel(16);

    for kind in FormKind::ALL {
        tx.send(UiEvent::submit(
            kind.element_id(),
            FormPayload::new().text("application_id", "APP-009"),
        ))
        .await
        .unwrap();
    }
    drop(tx);

    let summary = app.dispatcher.run(&StaticPage::complete(), rx).await;

    assert_eq!(summary.dispatched, 5);
    let mut paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/api/ai-process",
            "/api/ai-review",
            "/api/appeals",
            "/api/upload",
            "/api/verify",
        ]
    );
    assert_eq!(app.surface.notices_at(NoticeLevel::Success).len(), 3);
    assert_eq!(app.surface.renders().len(), 2);
}
