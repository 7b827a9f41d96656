use std::path::{Path, PathBuf};

use crate::internal::widget::structs::widget_error::WidgetError;

/// 未知类型时使用的 MIME
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// 被选中的本地文件（组件的「文件句柄」）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,              // 文件名，用于展示和签发上传地址
    pub size: u64,                 // 文件大小（字节）
    pub mime_type: Option<String>, // 调用方提供的 MIME 类型
}

impl SelectedFile {
    /// 由路径和大小构建，文件名取路径最后一段。
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            path,
            name,
            size,
            mime_type: None,
        }
    }

    /// 读取磁盘元数据构建；目录或不存在的路径会被拒绝。
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, WidgetError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| WidgetError::ReadMetadata {
                path: path.to_path_buf(),
                source,
            })?;

        if !metadata.is_file() {
            return Err(WidgetError::NotAFile(path.to_path_buf()));
        }

        Ok(Self::new(path, metadata.len()))
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// MIME 类型，未设置时为 `application/octet-stream`
    pub fn mime_or_default(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }
}
