//! 分段上传进度组件
//!
//! 一次只处理一个选择：选择新文件会先取消上一次的进度任务，再把进度归零、启动新任务。
//! 进度来源三选一：
//!
//! - **模拟**：`simulate_upload = true`，内置模拟器每 200ms 推进一次
//! - **传输**：`simulate_upload = false` 且配置了 [`UploadTransport`]，由适配器上报
//! - **外部驱动**：两者都没有时，调用方用 `report_progress` / `complete` / `fail` 推进
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use segmented_upload::FileUploadProgress;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let widget = FileUploadProgress::builder()
//!     .total_segments(20)
//!     .on_file_select(|file| println!("Selected file: {}", file.name))
//!     .build()?;
//!
//! widget.select_path("report.pdf").await?;
//! let mut watcher = widget.watch();
//! while let Ok(state) = watcher.changed().await {
//!     println!("{}", widget.render(&state));
//!     if state.is_settled() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{error, info};

use crate::internal::segments::structs::SegmentStyle;
use crate::internal::simulator::structs::ProgressSimulator;
use crate::internal::states::reactive_core::PropertyWatcher;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::transport::structs::ProgressSink;
use crate::internal::transport::traits::upload_transport::UploadTransport;
use crate::internal::upload_state::structs::{SelectedFile, UploadState, UploadedFile};

use super::active_task::{ActiveTask, TaskKind};
use super::state_reader::UploadStateReader;
use super::widget_config::WidgetConfig;
use super::widget_error::WidgetError;
use super::widget_view::WidgetView;

/// 每次选择文件时调用一次
pub type FileSelectCallback = Arc<dyn Fn(&SelectedFile) + Send + Sync>;

pub struct FileUploadProgress {
    config: WidgetConfig,
    state: UnlockReactiveProperty<UploadState>,
    simulator: ProgressSimulator,
    on_file_select: Option<FileSelectCallback>,
    transport: Option<Arc<dyn UploadTransport>>,
    active_task: Mutex<Option<ActiveTask>>,
}

impl FileUploadProgress {
    pub fn builder() -> FileUploadProgressBuilder {
        FileUploadProgressBuilder::default()
    }

    /// 使用默认配置（20 段、模拟上传）
    pub fn new() -> Self {
        Self::from_parts(WidgetConfig::default(), None, None)
    }

    fn from_parts(
        config: WidgetConfig,
        on_file_select: Option<FileSelectCallback>,
        transport: Option<Arc<dyn UploadTransport>>,
    ) -> Self {
        let simulator = ProgressSimulator::new(config.tick_interval).with_seed(config.seed);
        Self {
            config,
            state: UnlockReactiveProperty::new(UploadState::default()),
            simulator,
            on_file_select,
            transport,
            active_task: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}

/// 选择、重置与拆除
impl FileUploadProgress {
    /// 选中文件并启动进度任务，返回本次选择的 id。
    ///
    /// 模拟或传输模式需要在 tokio 运行时中调用。
    pub fn select_file(&self, file: SelectedFile) -> Result<u64, WidgetError> {
        let runtime = if self.needs_runtime() {
            Some(Handle::try_current()?)
        } else {
            None
        };

        let selection_id = {
            let mut slot = self.active_task.lock().map_err(|_| WidgetError::TaskLockPoisoned)?;
            if let Some(previous) = slot.take() {
                previous.cancel();
            }

            let awaits_result = self.uses_transport();
            let selection_id = self.state.update_field(|s| {
                if awaits_result {
                    s.select_awaiting_result(file.clone())
                } else {
                    s.select(file.clone())
                }
            })?;
            info!(
                target: "upload::widget",
                selection_id,
                file = %file.name,
                size = file.size,
                "file selected"
            );

            *slot = runtime.map(|runtime| self.start_task(&runtime, &file, selection_id));
            selection_id
        };

        // 回调在锁外执行，回调里可以安全地调用组件方法
        if let Some(callback) = &self.on_file_select {
            callback(&file);
        }

        Ok(selection_id)
    }

    /// 读取路径对应的文件信息后选择
    pub async fn select_path(&self, path: impl AsRef<Path>) -> Result<u64, WidgetError> {
        let file = SelectedFile::from_path(path).await?;
        self.select_file(file)
    }

    /// 取消进行中的任务并回到未选择状态
    pub fn reset(&self) -> Result<(), WidgetError> {
        let mut slot = self.active_task.lock().map_err(|_| WidgetError::TaskLockPoisoned)?;
        if let Some(task) = slot.take() {
            task.cancel();
        }
        self.state.update_field(|s| s.reset())?;
        info!(target: "upload::widget", "widget reset");
        Ok(())
    }

    /// 取消进行中的任务，保留当前显示
    pub fn teardown(&self) {
        if let Ok(mut slot) = self.active_task.lock() {
            if let Some(task) = slot.take() {
                task.cancel();
            }
        }
    }

    /// 当前是否有尚未结束的进度任务
    pub fn active_task(&self) -> Option<TaskKind> {
        self.active_task
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().filter(|t| !t.is_finished()).map(|t| t.kind()))
    }

    fn needs_runtime(&self) -> bool {
        self.config.simulate_upload || self.transport.is_some()
    }

    fn uses_transport(&self) -> bool {
        self.transport.is_some() && !self.config.simulate_upload
    }

    fn start_task(&self, runtime: &Handle, file: &SelectedFile, selection_id: u64) -> ActiveTask {
        match (&self.transport, self.config.simulate_upload) {
            (Some(transport), false) => ActiveTask::new(
                selection_id,
                TaskKind::Transport,
                self.spawn_transport(runtime, Arc::clone(transport), file.clone(), selection_id),
            ),
            _ => ActiveTask::new(
                selection_id,
                TaskKind::Simulation,
                self.simulator.spawn(runtime, self.state.clone(), selection_id),
            ),
        }
    }

    fn spawn_transport(
        &self,
        runtime: &Handle,
        transport: Arc<dyn UploadTransport>,
        file: SelectedFile,
        selection_id: u64,
    ) -> tokio::task::JoinHandle<()> {
        let state = self.state.clone();
        let sink = ProgressSink::for_selection(state.clone(), selection_id);

        runtime.spawn(async move {
            match transport.upload(&file, sink).await {
                Ok(uploaded) => {
                    info!(
                        target: "upload::widget",
                        selection_id,
                        url = %uploaded.url,
                        "upload finished"
                    );
                    state.update_if(|s| s.is_current(selection_id) && s.complete(uploaded));
                }
                Err(err) => {
                    error!(
                        target: "upload::widget",
                        selection_id,
                        file = %file.name,
                        error = %err,
                        "upload failed"
                    );
                    state.update_if(|s| s.is_current(selection_id) && s.fail(err.to_string()));
                }
            }
        })
    }
}

/// 外部驱动模式：作用于当前选择
impl FileUploadProgress {
    pub fn report_progress(&self, percent: f64) -> bool {
        self.state.update_if(|s| s.apply_progress(percent))
    }

    pub fn complete(&self, uploaded: UploadedFile) -> bool {
        self.state.update_if(|s| s.complete(uploaded))
    }

    pub fn fail(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        error!(target: "upload::widget", reason = %reason, "upload failed");
        self.state.update_if(|s| s.fail(reason))
    }
}

/// 读取与渲染
impl FileUploadProgress {
    /// 只读的状态句柄，可在组件之外读取与监听
    pub fn state(&self) -> UploadStateReader {
        UploadStateReader::new(self.state.clone())
    }

    pub fn watch(&self) -> PropertyWatcher<UploadState> {
        self.state.watch()
    }

    pub fn snapshot(&self) -> UploadState {
        self.state.get_or_default()
    }

    pub fn filled_segments(&self) -> usize {
        self.state
            .map(|s| s.filled_segments(self.config.total_segments))
            .unwrap_or(0)
    }

    pub fn view(&self) -> WidgetView {
        self.render(&self.snapshot())
    }

    /// 按本组件的分段数与样式渲染给定状态
    pub fn render(&self, state: &UploadState) -> WidgetView {
        WidgetView::from_state(state, self.config.total_segments, &self.config.style)
    }

    /// 等到当前选择结束（已完成、失败或被重置）
    ///
    /// 传输模式下字节发完时进度已到 100，还要等存储端确认或失败。
    pub async fn settled(&self) -> Result<UploadState, WidgetError> {
        let mut watcher = self.state.watch();
        Ok(watcher.wait_for(UploadState::is_settled).await?)
    }
}

impl Default for FileUploadProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FileUploadProgress {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// 组件构建器
#[derive(Default)]
pub struct FileUploadProgressBuilder {
    config: WidgetConfig,
    on_file_select: Option<FileSelectCallback>,
    transport: Option<Arc<dyn UploadTransport>>,
}

impl FileUploadProgressBuilder {
    pub fn config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn total_segments(mut self, total_segments: usize) -> Self {
        self.config.total_segments = total_segments;
        self
    }

    pub fn simulate_upload(mut self, simulate_upload: bool) -> Self {
        self.config.simulate_upload = simulate_upload;
        self
    }

    pub fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.config.tick_interval = tick_interval;
        self
    }

    pub fn style(mut self, style: SegmentStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn on_file_select<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SelectedFile) + Send + Sync + 'static,
    {
        self.on_file_select = Some(Arc::new(callback));
        self
    }

    /// 设置传输适配器；同时关闭模拟
    pub fn transport(mut self, transport: impl UploadTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self.config.simulate_upload = false;
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn UploadTransport>) -> Self {
        self.transport = Some(transport);
        self.config.simulate_upload = false;
        self
    }

    pub fn build(self) -> Result<FileUploadProgress, WidgetError> {
        self.config.validate()?;
        Ok(FileUploadProgress::from_parts(
            self.config,
            self.on_file_select,
            self.transport,
        ))
    }
}
