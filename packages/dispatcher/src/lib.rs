pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod page;
pub mod payload;

pub use client::ApiClient;
pub use dispatcher::{Bindings, Dispatcher, RunSummary};
pub use error::DispatchError;
pub use forms::{DRAG_DROP_ZONE, DRAG_OVER_CLASS, FormKind, FormShape};
pub use page::{
    EventSource, Notice, NoticeDetail, NoticeLevel, Page, QueuedEvents, ResultBlock, StaticPage,
    UiSurface,
};
