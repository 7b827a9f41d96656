//! 上传相关错误类型。

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("上传地址无效: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("获取上传地址失败: {0}")]
    DestinationRequest(reqwest::Error),

    #[error("获取上传地址失败，后端返回状态 {0}")]
    DestinationRejected(StatusCode),

    #[error("上传地址响应无法解析: {0}")]
    DestinationDecode(reqwest::Error),

    #[error("上传地址缺少字段: {0}")]
    MissingField(&'static str),

    #[error("读取本地文件失败: {0}")]
    ReadFile(std::io::Error),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("上传失败，状态码 {status}{}", storage_detail(.code, .message))]
    UnexpectedStatus {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("上传被钩子中止")]
    Aborted,
}

fn storage_detail(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) if !message.is_empty() => format!(" ({code}: {message})"),
        (Some(code), _) => format!(" ({code})"),
        _ => String::new(),
    }
}

impl UploadError {
    /// 存储端返回的错误码（如 S3 的 `AccessDenied`）
    pub fn storage_code(&self) -> Option<&str> {
        match self {
            UploadError::UnexpectedStatus { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UploadError::DestinationRejected(status) => Some(*status),
            UploadError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
