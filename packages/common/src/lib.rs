pub mod config;
pub mod event;
pub mod form;

pub use config::{ApiAppConfig, ErrorPolicyConfig, RawFormErrorPolicy};
pub use event::{DefaultAction, DropRecord, DroppedFile, UiEvent, UiEventKind};
pub use form::{FieldValue, FilePart, FormPayload};
