//! InkWheel Application
//!
//! The application shell: windowing, input routing, the egui toolbar and
//! color picker, and native file dialogs.

mod app;
mod event_handler;
mod file_ops;
mod session;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use session::{Deferred, Session};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{render_ui, UiAction, UiState};
