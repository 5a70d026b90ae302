use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::form::FormPayload;

/// Shared "default action prevented" flag.
///
/// Clones observe the same flag, so an event source can keep a handle and
/// check it after the event has been handed to a handler task.
#[derive(Debug, Clone, Default)]
pub struct DefaultAction(Arc<AtomicBool>);

impl DefaultAction {
    pub fn prevent(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_prevented(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A file dropped onto a drop zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFile {
    pub name: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl DroppedFile {
    /// Describe a file on disk as if it had been dropped.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .map(str::to_string);
        Ok(Self {
            name,
            size: meta.len(),
            content_type,
        })
    }
}

/// What the drop handler saw. No upload is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRecord {
    pub zone_id: String,
    pub files: Vec<DroppedFile>,
}

#[derive(Debug, Clone)]
pub enum UiEventKind {
    Submit(FormPayload),
    DragOver,
    Drop(Vec<DroppedFile>),
}

/// An event raised by the UI against an element identifier.
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub target: String,
    pub kind: UiEventKind,
    default_action: DefaultAction,
}

impl UiEvent {
    fn new(target: impl Into<String>, kind: UiEventKind) -> Self {
        Self {
            target: target.into(),
            kind,
            default_action: DefaultAction::default(),
        }
    }

    pub fn submit(target: impl Into<String>, payload: FormPayload) -> Self {
        Self::new(target, UiEventKind::Submit(payload))
    }

    pub fn drag_over(target: impl Into<String>) -> Self {
        Self::new(target, UiEventKind::DragOver)
    }

    pub fn drop_files(target: impl Into<String>, files: Vec<DroppedFile>) -> Self {
        Self::new(target, UiEventKind::Drop(files))
    }

    /// Event topic, matching the DOM event names.
    pub fn topic(&self) -> &'static str {
        match self.kind {
            UiEventKind::Submit(_) => "submit",
            UiEventKind::DragOver => "dragover",
            UiEventKind::Drop(_) => "drop",
        }
    }

    pub fn prevent_default(&self) {
        self.default_action.prevent();
    }

    pub fn default_prevented(&self) -> bool {
        self.default_action.is_prevented()
    }

    /// Handle onto this event's prevented flag.
    pub fn default_action(&self) -> DefaultAction {
        self.default_action.clone()
    }
}
