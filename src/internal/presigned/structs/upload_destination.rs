use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// 签发接口的请求体：`{ "fileName": ..., "fileType": ... }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRequest<'a> {
    pub file_name: &'a str,
    pub file_type: &'a str,
}

/// 签发接口的响应：上传目标地址 + 必须原样提交的表单字段
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadDestination {
    pub url: String,
    /// 保持后端返回时的顺序
    #[serde(default, deserialize_with = "ordered_fields")]
    pub fields: Vec<(String, String)>,
}

impl UploadDestination {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 对象 key，用于拼出上传后的访问地址
    pub fn key(&self) -> Option<&str> {
        self.field("key")
    }
}

/// 把 JSON 对象按出现顺序读成键值对列表
fn ordered_fields<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedFieldsVisitor;

    impl<'de> Visitor<'de> for OrderedFieldsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of string form fields")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, String>()? {
                fields.push((key, value));
            }
            Ok(fields)
        }
    }

    deserializer.deserialize_map(OrderedFieldsVisitor)
}
