//! 上传状态领域模块：选中的文件、进度与上传标志，以及它们的纯状态转换。

pub mod enums;
pub mod structs;
