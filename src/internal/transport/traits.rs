pub mod upload_hook;
pub mod upload_transport;
