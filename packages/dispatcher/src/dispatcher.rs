use std::collections::HashSet;
use std::sync::Arc;

use common::{DropRecord, ErrorPolicyConfig, UiEvent, UiEventKind};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::client::ApiClient;
use crate::config::DispatcherAppConfig;
use crate::error::DispatchError;
use crate::forms::{DRAG_DROP_ZONE, FormKind, FormShape};
use crate::page::{EventSource, Page, UiSurface};

/// Binds UI events to backend requests.
///
/// Cloning is cheap; every clone shares the HTTP connection pool and surface.
#[derive(Clone)]
pub struct Dispatcher {
    pub(crate) client: ApiClient,
    pub(crate) surface: Arc<dyn UiSurface>,
    pub(crate) errors: ErrorPolicyConfig,
    /// Result containers known to exist. `None` until bound to a page.
    pub(crate) containers: Option<Arc<HashSet<&'static str>>>,
}

/// Which handlers [`Dispatcher::init`] attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    forms: HashSet<FormKind>,
    drop_zone: bool,
    containers: HashSet<&'static str>,
}

impl Bindings {
    pub fn is_form_bound(&self, kind: FormKind) -> bool {
        self.forms.contains(&kind)
    }

    pub fn is_drop_zone_bound(&self) -> bool {
        self.drop_zone
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains(id)
    }

    /// Whether a handler exists for this event's target and type.
    pub fn accepts(&self, event: &UiEvent) -> bool {
        match event.kind {
            UiEventKind::Submit(_) => FormKind::from_element_id(&event.target)
                .is_some_and(|kind| self.is_form_bound(kind)),
            UiEventKind::DragOver | UiEventKind::Drop(_) => {
                self.drop_zone && event.target == DRAG_DROP_ZONE
            }
        }
    }
}

/// Outcome of [`Dispatcher::run`].
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Events that reached a handler.
    pub dispatched: usize,
    /// Events with no bound handler.
    pub ignored: usize,
    pub drops: Vec<DropRecord>,
}

impl Dispatcher {
    pub fn new(
        client: ApiClient,
        surface: Arc<dyn UiSurface>,
        errors: ErrorPolicyConfig,
    ) -> Self {
        Self {
            client,
            surface,
            errors,
            containers: None,
        }
    }

    pub fn from_config(
        config: &DispatcherAppConfig,
        surface: Arc<dyn UiSurface>,
    ) -> Result<Self, DispatchError> {
        let client = ApiClient::new(config.api.clone())?;
        Ok(Self::new(client, surface, config.errors.clone()))
    }

    /// A clone that renders only into containers present in `bindings`.
    ///
    /// An unbound dispatcher assumes every container exists.
    pub fn bound_to(&self, bindings: &Bindings) -> Self {
        Self {
            containers: Some(Arc::new(bindings.containers.clone())),
            ..self.clone()
        }
    }

    pub(crate) fn container_present(&self, id: &str) -> bool {
        self.containers
            .as_ref()
            .is_none_or(|containers| containers.contains(id))
    }

    /// Attach handlers for every known element present on `page`.
    ///
    /// Missing elements are skipped.
    pub fn init(&self, page: &dyn Page) -> Bindings {
        let mut bindings = Bindings::default();
        for kind in FormKind::ALL {
            if page.has_element(kind.element_id()) {
                bindings.forms.insert(kind);
            } else {
                debug!(form = kind.element_id(), "Form not on page, skipping");
            }
        }

        for kind in FormKind::ALL {
            if let FormShape::Raw { container_id, .. } = kind.shape() {
                if page.has_element(container_id) {
                    bindings.containers.insert(container_id);
                } else {
                    debug!(container = container_id, "Result container not on page");
                }
            }
        }

        bindings.drop_zone = page.has_element(DRAG_DROP_ZONE);
        if !bindings.drop_zone {
            debug!(zone = DRAG_DROP_ZONE, "Drop zone not on page, skipping");
        }

        info!(
            forms = bindings.form_count(),
            drop_zone = bindings.drop_zone,
            "Dispatcher initialized"
        );
        bindings
    }

    /// Route events from `source` until it is exhausted.
    ///
    /// Submissions run on their own tasks with no coordination between them.
    /// Drag events are handled inline, in arrival order. Returns once every
    /// in-flight submission has finished.
    pub async fn run<S: EventSource>(&self, page: &dyn Page, mut source: S) -> RunSummary {
        let bindings = self.init(page);
        let this = self.bound_to(&bindings);
        let mut summary = RunSummary::default();
        let mut tasks = JoinSet::new();

        while let Some(event) = source.next_event().await {
            if !bindings.accepts(&event) {
                debug!(target_id = %event.target, topic = event.topic(), "No handler bound, ignoring event");
                summary.ignored += 1;
                continue;
            }
            summary.dispatched += 1;

            match event.kind {
                UiEventKind::Submit(_) => {
                    let task = this.clone();
                    tasks.spawn(async move { task.dispatch_submit(event).await });
                }
                UiEventKind::DragOver => self.handle_drag_over(&event),
                UiEventKind::Drop(_) => summary.drops.push(self.handle_file_drop(&event)),
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Submission task failed");
            }
        }

        summary
    }

    async fn dispatch_submit(&self, event: UiEvent) {
        let Some(kind) = FormKind::from_element_id(&event.target) else {
            return;
        };
        match kind {
            FormKind::DocumentUpload => self.handle_document_upload(&event).await,
            FormKind::AiUpload => self.handle_ai_upload(&event).await,
            FormKind::Appeal => self.handle_appeal_submit(&event).await,
            FormKind::Verification => self.handle_verification(&event).await,
            FormKind::AiReview => self.handle_ai_review(&event).await,
        }
    }
}
