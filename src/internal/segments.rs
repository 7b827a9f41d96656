//! 分段映射：把上传百分比量化为点亮的分段数，并渲染为分段条。

pub mod functions;
pub mod structs;
