//! File dialog adapters

mod native;
mod terminal;

pub use native::NativeDialogs;
pub use terminal::TerminalDialogs;

use crate::application::ports::FileDialogs;
use crate::domain::config::DialogBackend;

/// Create the dialog adapter for a backend
pub fn create_dialogs(backend: DialogBackend) -> Box<dyn FileDialogs> {
    match backend {
        DialogBackend::Native => Box::new(NativeDialogs::new()),
        DialogBackend::Terminal => Box::new(TerminalDialogs::new()),
    }
}
