use std::fmt;
use std::sync::Arc;

use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::upload_state::structs::UploadState;

type ReportFn = dyn Fn(f64) + Send + Sync;

/// 进度上报句柄：传输适配器通过它上报 `[0, 100]` 内的百分比。
///
/// 可 Clone，内部是 `Arc`。组件创建的句柄绑定到某一次选择，选择失效后上报被忽略。
#[derive(Clone)]
pub struct ProgressSink {
    report: Arc<ReportFn>,
}

impl ProgressSink {
    pub fn new<F>(report: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        Self {
            report: Arc::new(report),
        }
    }

    /// 丢弃所有上报
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// 绑定到组件状态中的某一次选择
    pub(crate) fn for_selection(state: UnlockReactiveProperty<UploadState>, selection_id: u64) -> Self {
        Self::new(move |percent| {
            state.update_if(|s| s.is_current(selection_id) && s.apply_progress(percent));
        })
    }

    /// 上报百分比
    pub fn report(&self, percent: f64) {
        (self.report)(percent);
    }

    /// 按字节上报，换算为四舍五入后的整数百分比；总大小未知（0）时不上报。
    pub fn report_bytes(&self, bytes_sent: u64, total: u64) {
        if let Some(percent) = percent_of(bytes_sent, total) {
            self.report(percent);
        }
    }
}

/// `round(sent / total * 100)`，总大小为 0 时返回 `None`
pub fn percent_of(bytes_sent: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let ratio = bytes_sent.min(total) as f64 / total as f64;
    Some((ratio * 100.0).round())
}

impl fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressSink").finish_non_exhaustive()
    }
}
