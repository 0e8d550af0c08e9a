#![forbid(unsafe_code)]

//! Core of the FloatChat widget: a floating, draggable chat assistant for
//! static sites, expressed as a synchronous state machine.
//!
//! The widget owns no surfaces and spawns no tasks. Hosts feed it
//! [`WidgetEvent`]s (pointer input, submitted text, completed IO, clock
//! ticks) together with the current time and a [`ViewportProvider`]; it
//! answers with [`Effect`]s describing exactly what to change. The split
//! keeps every behavior testable without a browser, a timer or a server:
//!
//! - [`drag`] and [`resize`] recognize the two pointer gestures,
//! - [`coalesce`] collapses viewport resize bursts,
//! - [`monitor`] paces the health probe,
//! - [`session`] bounds and persists the conversation,
//! - [`transport`] speaks the chat wire protocol over `ureq`,
//! - [`storage`] abstracts the key/value persistence backend,
//! - [`widget`] ties them together.
//!
//! Geometry lives in `floatchat-geometry`, message rendering in
//! `floatchat-markdown`; both are pure and dependency-light.

pub mod coalesce;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod i18n;
pub mod monitor;
pub mod page;
pub mod resize;
pub mod session;
pub mod storage;
pub mod transport;
pub mod viewport;
pub mod widget;

pub use coalesce::ResizeCoalescer;
pub use config::{ContextType, ServerUrls, WidgetConfig};
pub use drag::{DragController, DragRelease, PressTarget};
pub use error::{ChatError, StorageError};
pub use event::{Effect, WidgetEvent, execute_io};
pub use i18n::Translator;
pub use monitor::ConnectionMonitor;
pub use page::PageInfo;
pub use resize::{ResizeController, ResizeLimits};
pub use session::{ChatSession, Role, StoredMessage};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{ChatRequest, ChatResponse, ChatTransport, HttpTransport};
pub use viewport::{FixedViewport, ViewportProvider};
pub use widget::ChatWidget;
