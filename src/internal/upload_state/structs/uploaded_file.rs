use chrono::{DateTime, Utc};

/// 上传成功后的文件引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,       // 可访问的对象地址
    pub key: String,       // 存储端的对象 key
    pub name: String,      // 本地文件名
    pub size: u64,         // 上传的字节数
    pub uploaded_at: DateTime<Utc>,
}
