use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use dispatcher::config::{ApiAppConfig, DispatcherAppConfig, ErrorPolicyConfig, RawFormErrorPolicy};
use dispatcher::{Dispatcher, Notice, NoticeLevel, ResultBlock, UiSurface};

/// A request as the mock backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Request body should be JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Backend stand-in answering every request with one canned reply.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub async fn spawn(status: u16, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).expect("Invalid status code"),
            body: body.to_string(),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassOp {
    Add(String, String),
    Remove(String, String),
}

/// Surface that remembers everything shown to it.
#[derive(Default)]
pub struct RecordingSurface {
    renders: Mutex<Vec<(String, ResultBlock)>>,
    class_ops: Mutex<Vec<ClassOp>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingSurface {
    pub fn renders(&self) -> Vec<(String, ResultBlock)> {
        self.renders.lock().unwrap().clone()
    }

    pub fn class_ops(&self) -> Vec<ClassOp> {
        self.class_ops.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn notices_at(&self, level: NoticeLevel) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .collect()
    }
}

impl UiSurface for RecordingSurface {
    fn render(&self, container_id: &str, block: ResultBlock) {
        self.renders
            .lock()
            .unwrap()
            .push((container_id.to_string(), block));
    }

    fn add_class(&self, element_id: &str, class: &str) {
        self.class_ops
            .lock()
            .unwrap()
            .push(ClassOp::Add(element_id.to_string(), class.to_string()));
    }

    fn remove_class(&self, element_id: &str, class: &str) {
        self.class_ops
            .lock()
            .unwrap()
            .push(ClassOp::Remove(element_id.to_string(), class.to_string()));
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// A dispatcher wired to a recording surface.
pub struct TestApp {
    pub dispatcher: Dispatcher,
    pub surface: Arc<RecordingSurface>,
}

impl TestApp {
    pub fn new(base_url: String) -> Self {
        Self::with_policy(base_url, RawFormErrorPolicy::Silent)
    }

    pub fn with_policy(base_url: String, raw_form: RawFormErrorPolicy) -> Self {
        let config = DispatcherAppConfig {
            api: ApiAppConfig {
                base_url,
                timeout_secs: Some(10),
            },
            errors: ErrorPolicyConfig { raw_form },
        };
        let surface = Arc::new(RecordingSurface::default());
        let dispatcher = Dispatcher::from_config(&config, surface.clone())
            .expect("Failed to build dispatcher");

        Self {
            dispatcher,
            surface,
        }
    }
}
