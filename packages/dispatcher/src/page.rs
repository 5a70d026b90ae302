//! Abstract UI the dispatcher binds against.

use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use common::UiEvent;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::forms::{DRAG_DROP_ZONE, FormKind, FormShape};

/// Element lookup.
pub trait Page: Send + Sync {
    fn has_element(&self, id: &str) -> bool;
}

/// A page backed by a fixed set of element identifiers.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    elements: HashSet<String>,
}

impl StaticPage {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Every form, the drop zone and both result containers.
    pub fn complete() -> Self {
        let mut ids: Vec<&str> = FormKind::ALL.iter().map(|k| k.element_id()).collect();
        ids.push(DRAG_DROP_ZONE);
        for kind in FormKind::ALL {
            if let FormShape::Raw { container_id, .. } = kind.shape() {
                ids.push(container_id);
            }
        }
        Self::new(ids)
    }
}

impl Page for StaticPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Error kind and text, for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<NoticeDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeDetail {
    pub kind: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>, kind: &str, detail: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: Some(NoticeDetail {
                kind: kind.to_string(),
                message: detail.into(),
            }),
        }
    }
}

/// Rendered response text for a result container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBlock {
    pub class: String,
    pub text: String,
}

/// Sink for everything the dispatcher shows the user.
pub trait UiSurface: Send + Sync {
    /// Replace a result container's content.
    fn render(&self, container_id: &str, block: ResultBlock);
    fn add_class(&self, element_id: &str, class: &str);
    fn remove_class(&self, element_id: &str, class: &str);
    fn notify(&self, notice: Notice);
}

/// Producer of UI events. `None` ends the event loop.
#[async_trait]
pub trait EventSource: Send {
    async fn next_event(&mut self) -> Option<UiEvent>;
}

/// A fixed, pre-recorded sequence of events.
#[derive(Debug, Default)]
pub struct QueuedEvents {
    events: VecDeque<UiEvent>,
}

impl QueuedEvents {
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EventSource for QueuedEvents {
    async fn next_event(&mut self) -> Option<UiEvent> {
        self.events.pop_front()
    }
}

#[async_trait]
impl EventSource for mpsc::Receiver<UiEvent> {
    async fn next_event(&mut self) -> Option<UiEvent> {
        self.recv().await
    }
}
