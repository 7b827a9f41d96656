//! 上传钩子：在「开始前 / 进度 / 完成后」插入自定义逻辑。

use async_trait::async_trait;

use crate::internal::upload_state::structs::UploadedFile;

/// 钩子请求中止上传时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("上传被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 上传流程钩子。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：`with_before_start_hook` / `with_on_progress_hook` / `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过上传器的 `with_hook` 注册。
#[async_trait]
pub trait UploadHook: Send + Sync {
    /// 上传开始前调用。返回 `Err` 则中止本次上传。
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 请求体每发出一段数据调用一次（累计已发送字节、总字节）。
    fn on_progress(&mut self, _bytes_sent: u64, _total: u64) {}

    /// 存储端确认成功后调用。
    async fn after_complete(&mut self, _uploaded: &UploadedFile) {}
}
