pub mod presigned_config;
pub mod presigned_uploader;
pub mod progress_stream;
pub mod upload_destination;

pub use presigned_config::PresignedUploaderConfig;
pub use presigned_uploader::PresignedUploader;
pub use progress_stream::ProgressStream;
pub use upload_destination::{DestinationRequest, UploadDestination};
