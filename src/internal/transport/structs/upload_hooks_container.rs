use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex as TokioMutex;

use crate::internal::transport::traits::upload_hook::{HookAbort, UploadHook};
use crate::internal::upload_state::structs::UploadedFile;

type SharedHook = Arc<TokioMutex<Box<dyn UploadHook>>>;

/// 钩子容器：按注册顺序依次执行多个钩子。
///
/// 每个钩子各自持锁，Clone 只复制句柄。上传开始时取一份快照，
/// 同一钩子的调用互斥，不同钩子、不同上传之间互不阻塞。
#[derive(Default, Clone)]
pub struct UploadHooksContainer {
    hooks: Vec<SharedHook>,
}

impl UploadHooksContainer {
    /// 添加一个完整钩子；可多次调用。
    pub fn add(&mut self, hook: impl UploadHook + 'static) {
        self.hooks.push(Arc::new(TokioMutex::new(Box::new(hook))));
    }

    /// 以闭包注册「开始前」阶段
    pub fn add_before_start<F, Fut>(&mut self, f: F)
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.add(BeforeStartFn(f));
    }

    /// 以闭包注册「进度」阶段
    pub fn add_on_progress<F>(&mut self, f: F)
    where
        F: FnMut(u64, u64) + Send + Sync + 'static,
    {
        self.add(OnProgressFn(f));
    }

    /// 以闭包注册「完成后」阶段；闭包拿到上传结果的副本
    pub fn add_after_complete<F, Fut>(&mut self, f: F)
    where
        F: FnMut(UploadedFile) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.add(AfterCompleteFn(f));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// 任一钩子返回 `Err` 即停止，后面的钩子不再执行。
    pub async fn run_before_start(&self) -> Result<(), HookAbort> {
        for hook in &self.hooks {
            hook.lock().await.before_start().await?;
        }
        Ok(())
    }

    /// 在请求体流中同步调用；正被其它上传占用的钩子跳过这一次。
    pub fn run_on_progress(&self, bytes_sent: u64, total: u64) {
        for hook in &self.hooks {
            if let Ok(mut hook) = hook.try_lock() {
                hook.on_progress(bytes_sent, total);
            }
        }
    }

    pub async fn run_after_complete(&self, uploaded: &UploadedFile) {
        for hook in &self.hooks {
            hook.lock().await.after_complete(uploaded).await;
        }
    }
}

struct BeforeStartFn<F>(F);

#[async_trait]
impl<F, Fut> UploadHook for BeforeStartFn<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
{
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        (self.0)().await
    }
}

struct OnProgressFn<F>(F);

#[async_trait]
impl<F> UploadHook for OnProgressFn<F>
where
    F: FnMut(u64, u64) + Send + Sync + 'static,
{
    fn on_progress(&mut self, bytes_sent: u64, total: u64) {
        (self.0)(bytes_sent, total);
    }
}

struct AfterCompleteFn<F>(F);

#[async_trait]
impl<F, Fut> UploadHook for AfterCompleteFn<F>
where
    F: FnMut(UploadedFile) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn after_complete(&mut self, uploaded: &UploadedFile) {
        (self.0)(uploaded.clone()).await
    }
}
