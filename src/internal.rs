pub mod logging;
pub mod presigned;
pub mod segments;
pub mod simulator;
pub mod states;
pub mod transport;
pub mod upload_state;
pub mod widget;
