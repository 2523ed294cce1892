//! Worker domain module

mod duration;
mod operation;
mod path_arg;
mod platform;

pub use duration::Duration;
pub use operation::WorkerOperation;
pub use path_arg::{looks_like_path, normalize_arg, normalize_args};
pub use platform::Platform;
