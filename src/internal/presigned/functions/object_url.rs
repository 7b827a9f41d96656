use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// key 中需要编码的字符；`/` 保留为路径分隔
const KEY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 上传成功后对象的访问地址：目标地址 + 编码后的 key。
///
/// 目标地址没有以 `/` 结尾时补上一个；key 开头的 `/` 会被去掉，避免出现 `//`。
pub fn object_url(destination_url: &str, key: &str) -> String {
    let encoded_key = utf8_percent_encode(key.trim_start_matches('/'), KEY_ENCODE_SET);
    if destination_url.ends_with('/') {
        format!("{destination_url}{encoded_key}")
    } else {
        format!("{destination_url}/{encoded_key}")
    }
}
