//! Per-event handlers. Each one is also callable directly.

use common::{DropRecord, FormPayload, RawFormErrorPolicy, UiEvent, UiEventKind};
use reqwest::Method;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::forms::{DRAG_OVER_CLASS, FormKind, FormShape};
use crate::page::{Notice, ResultBlock};

impl Dispatcher {
    /// Shared JSON request helper. `method` defaults to `GET`.
    pub async fn make_api_call(
        &self,
        endpoint: &str,
        method: Option<Method>,
        body: Option<&Value>,
    ) -> Result<Value, DispatchError> {
        self.client
            .call(endpoint, method.unwrap_or(Method::GET), body)
            .await
    }

    pub async fn handle_document_upload(&self, event: &UiEvent) {
        self.handle_submit(FormKind::DocumentUpload, event).await
    }

    pub async fn handle_ai_upload(&self, event: &UiEvent) {
        self.handle_submit(FormKind::AiUpload, event).await
    }

    pub async fn handle_appeal_submit(&self, event: &UiEvent) {
        self.handle_submit(FormKind::Appeal, event).await
    }

    pub async fn handle_verification(&self, event: &UiEvent) {
        self.handle_submit(FormKind::Verification, event).await
    }

    pub async fn handle_ai_review(&self, event: &UiEvent) {
        self.handle_submit(FormKind::AiReview, event).await
    }

    pub fn handle_drag_over(&self, event: &UiEvent) {
        event.prevent_default();
        self.surface.add_class(&event.target, DRAG_OVER_CLASS);
    }

    /// Clear the highlight and record what was dropped. Nothing is uploaded.
    pub fn handle_file_drop(&self, event: &UiEvent) -> DropRecord {
        event.prevent_default();
        self.surface.remove_class(&event.target, DRAG_OVER_CLASS);

        let files = match &event.kind {
            UiEventKind::Drop(files) => files.clone(),
            _ => Vec::new(),
        };
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        info!(zone = %event.target, count = files.len(), files = ?names, "Files dropped");

        DropRecord {
            zone_id: event.target.clone(),
            files,
        }
    }

    #[instrument(skip(self, event), fields(form = kind.element_id(), submission_id = %Uuid::now_v7()))]
    async fn handle_submit(&self, kind: FormKind, event: &UiEvent) {
        event.prevent_default();

        let UiEventKind::Submit(payload) = &event.kind else {
            warn!(topic = event.topic(), "Expected a submit event");
            return;
        };

        match kind.shape() {
            FormShape::Raw {
                container_id,
                container_class,
                error_message,
            } => {
                match self.submit_raw(kind, payload, container_id).await {
                    Ok(text) => self.surface.render(
                        container_id,
                        ResultBlock {
                            class: container_class.to_string(),
                            text,
                        },
                    ),
                    Err(e) => self.raw_failure(error_message, e),
                }
            }
            FormShape::FieldMap {
                success_message,
                error_message,
            } => {
                let body = Value::Object(payload.to_field_map());
                match self
                    .make_api_call(kind.endpoint(), Some(Method::POST), Some(&body))
                    .await
                {
                    Ok(_) => {
                        info!(endpoint = kind.endpoint(), "Submission accepted");
                        self.surface.notify(Notice::success(success_message));
                    }
                    Err(e) => self
                        .surface
                        .notify(Notice::error(error_message, e.kind(), e.to_string())),
                }
            }
        }
    }

    async fn submit_raw(
        &self,
        kind: FormKind,
        payload: &FormPayload,
        container_id: &str,
    ) -> Result<String, DispatchError> {
        let result = self.client.post_multipart(kind.endpoint(), payload).await?;
        let text = serde_json::to_string_pretty(&result)?;
        // The request still goes out when the container is missing.
        if !self.container_present(container_id) {
            return Err(DispatchError::MissingElement(container_id.to_string()));
        }
        Ok(text)
    }

    fn raw_failure(&self, message: &str, err: DispatchError) {
        error!(kind = err.kind(), error = %err, "{message}");
        if self.errors.raw_form == RawFormErrorPolicy::Notify {
            self.surface
                .notify(Notice::error(message, err.kind(), err.to_string()));
        }
    }
}
