//! 传输适配层：真实上传的抽象接口、进度上报句柄、钩子与错误类型。
//!
//! 组件只要求适配器在 `[0, 100]` 内上报百分比，并以 `Result` 给出终态，其余细节不透明。

pub mod structs;
pub mod traits;
