use quick_xml::de::from_str;
use serde::Deserialize;

/// 对应 S3 风格存储失败时返回的 `<Error>` 节点
///
/// ```xml
/// <Error>
///   <Code>AccessDenied</Code>
///   <Message>Invalid according to Policy</Message>
///   <RequestId>...</RequestId>
/// </Error>
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename = "Error")]
pub struct StorageErrorBody {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl StorageErrorBody {
    /// 尝试解析响应体；不是预期的 XML 时返回 `None`
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        from_str(body).ok()
    }
}
