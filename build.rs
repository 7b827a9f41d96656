//! 构建时根据 src/tests/backends.toml 生成测试用预签名后端枚举与 env 变量名常量，供 tests 模块 include! 使用。

use std::env;
use std::fs;
use std::path::Path;

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut c = part.chars();
            match c.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(c.flat_map(|c| c.to_lowercase())).collect(),
            }
        })
        .collect()
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let backends_path = Path::new(&manifest_dir).join("src/tests/backends.toml");
    println!("cargo:rerun-if-changed=src/tests/backends.toml");
    println!("cargo:rerun-if-changed=src/tests/env/.env.example");
    // env 目录变化时也重新跑，以便从模板恢复缺失的 {id}.env
    println!("cargo:rerun-if-changed=src/tests/env");

    let backend_ids: Vec<String> = match fs::read_to_string(&backends_path) {
        Ok(content) if !content.trim().is_empty() => {
            parse_backends_toml(&content).unwrap_or_else(|| parse_line_per_backend(&content))
        }
        _ => vec![],
    };

    let mut enum_variants = String::new();
    let mut as_str_arms = String::new();
    let mut all_array = String::new();

    for id in backend_ids.iter().map(|s| s.trim()).filter(|s| is_valid_id(s)) {
        let variant = to_pascal_case(id);
        if variant.is_empty() {
            continue;
        }
        enum_variants.push_str(&format!("    {},\n", variant));
        as_str_arms.push_str(&format!("            TestBackend::{} => \"{}\",\n", variant, id));
        all_array.push_str(&format!("            TestBackend::{},\n", variant));
    }

    // 无任何后端时生成占位变体，避免空枚举无法编译
    let (enum_variants, as_str_arms, all_array) = if enum_variants.is_empty() {
        (
            "    #[allow(dead_code)]\n    __None,\n".to_string(),
            "            TestBackend::__None => \"\",\n".to_string(),
            String::new(),
        )
    } else {
        (enum_variants, as_str_arms, all_array)
    };

    let code = format!(
        r#"// 自动生成，请勿手改。后端列表来自 src/tests/backends.toml

/// 可选的预签名上传后端，测试时按 env 配置决定是否真实上传。
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestBackend {{
{variants}
}}

impl TestBackend {{
    /// 返回后端 id（与 env 文件名 {{id}}.env 对应）。
    pub fn as_str(&self) -> &'static str {{
        match self {{
{as_str}
        }}
    }}

    /// 返回所有已配置的后端，便于轮询测试。
    #[allow(dead_code)]
    pub fn all() -> &'static [TestBackend] {{
        static ALL: &[TestBackend] = &[
{array}
        ];
        ALL
    }}
}}

/// 测试 env 文件中所需的环境变量名。
#[allow(dead_code)]
pub mod env_var_names {{
    /// 签发上传地址的后端根 URL
    pub const PRESIGN_BACKEND_URL: &str = "PRESIGN_BACKEND_URL";
    /// 用于真实上传的本地文件路径
    pub const UPLOAD_TEST_FILE: &str = "UPLOAD_TEST_FILE";
}}
"#,
        variants = enum_variants,
        as_str = as_str_arms,
        array = all_array,
    );

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(Path::new(&out_dir).join("test_backends.rs"), code).expect("write test_backends.rs");

    // 根据后端列表从 .env.example 补齐缺失的 env 文件，用户只需填写内容
    let env_dir = Path::new(&manifest_dir).join("src/tests/env");
    let example_path = env_dir.join(".env.example");
    if let Ok(template) = fs::read_to_string(&example_path) {
        for id in backend_ids.iter().map(|s| s.trim()).filter(|s| is_valid_id(s)) {
            let env_file = env_dir.join(format!("{}.env", id));
            if !env_file.exists() {
                fs::write(&env_file, &template).expect("write env file");
            }
        }
    }
}

/// 解析 backends.toml：支持 backends = ["a","b"] 或多行写法
fn parse_backends_toml(content: &str) -> Option<Vec<String>> {
    const KEY: &str = "backends";
    let start = content.find(KEY)?;
    let after_key = &content[start + KEY.len()..];
    let open = after_key.find('[')?;
    let array_start = start + KEY.len() + open;
    let close = content[array_start..].find(']')? + array_start;
    let ids: Vec<String> = content[array_start + 1..close]
        .split(',')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if ids.is_empty() { None } else { Some(ids) }
}

fn parse_line_per_backend(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|s| !s.is_empty() && !s.starts_with('#') && !s.contains('='))
        .collect()
}
