//! 上传组件：持有上传状态与唯一的活动任务（模拟器或传输），负责选择、重置与拆除。

pub mod structs;
