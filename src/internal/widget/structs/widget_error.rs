//! 组件相关错误类型。

use std::path::PathBuf;

use thiserror::Error;

use crate::internal::states::reactive_core::ReactivePropertyError;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("分段数必须大于 0")]
    ZeroSegments,

    #[error("读取文件信息失败 {path}: {source}")]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("仅支持选择文件: {0}")]
    NotAFile(PathBuf),

    #[error("当前不在 tokio 运行时中，无法启动进度任务")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("获取任务锁失败")]
    TaskLockPoisoned,

    #[error("上传状态不可用: {0}")]
    State(#[from] ReactivePropertyError),
}
