pub mod active_task;
pub mod file_upload_progress;
pub mod state_reader;
pub mod widget_config;
pub mod widget_error;
pub mod widget_view;

pub use active_task::TaskKind;
pub use file_upload_progress::{FileSelectCallback, FileUploadProgress, FileUploadProgressBuilder};
pub use state_reader::UploadStateReader;
pub use widget_config::WidgetConfig;
pub use widget_error::WidgetError;
pub use widget_view::WidgetView;
