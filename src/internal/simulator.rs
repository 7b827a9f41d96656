//! 模拟进度源：没有真实传输时，按固定节拍推进上传进度。

pub mod constants;
pub mod structs;
