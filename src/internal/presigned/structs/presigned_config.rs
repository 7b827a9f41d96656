use std::time::Duration;

use reqwest::StatusCode;

/// 默认的签发上传地址接口路径
pub const DEFAULT_PRESIGN_PATH: &str = "/api/get-upload-url";

/// 文件在表单中的字段名
pub const DEFAULT_FILE_FIELD: &str = "file";

/// 读取文件时的缓冲区大小：64KB
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 64 * 1024;

/// 默认请求超时
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct PresignedUploaderConfig {
    /// 签发接口路径，相对后端根地址
    pub presign_path: String,
    /// 表单中文件字段名（总是最后一个字段）
    pub file_field: String,
    /// 视为成功的存储端状态码，S3 默认 204 No Content
    pub success_status: StatusCode,
    /// 读取文件的缓冲区大小，同时决定进度上报的粒度
    pub stream_buffer_size: usize,
    pub request_timeout: Duration,
}

impl Default for PresignedUploaderConfig {
    fn default() -> Self {
        Self {
            presign_path: DEFAULT_PRESIGN_PATH.to_string(),
            file_field: DEFAULT_FILE_FIELD.to_string(),
            success_status: StatusCode::NO_CONTENT,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
