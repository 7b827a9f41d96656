pub mod progress_sink;
pub mod upload_error;
pub mod upload_hooks_container;

pub use progress_sink::ProgressSink;
pub use upload_error::UploadError;
pub use upload_hooks_container::UploadHooksContainer;
