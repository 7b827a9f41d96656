pub mod selected_file;
pub mod upload_state;
pub mod uploaded_file;

pub use selected_file::SelectedFile;
pub use upload_state::UploadState;
pub use uploaded_file::UploadedFile;
