use crate::internal::segments::functions::filled_segments::filled_segments;
use crate::internal::upload_state::enums::UploadPhase;

use super::selected_file::SelectedFile;
use super::uploaded_file::UploadedFile;

/// 进度终点
pub const COMPLETE_PERCENT: f64 = 100.0;

/// 上传状态：由组件独占持有，进度源只通过下面的转换函数修改它。
///
/// 不变式：`is_uploading` 只在存在选中文件且进度小于 100 时为 `true`，
/// 进度到达 100 时强制为 `false`。
///
/// `selection_id` 在每次选择和重置时递增，进度源带着启动时的 id，
/// 过期的 id 对状态不再有任何影响。
///
/// 由传输驱动的选择会标记 `awaiting_result`：字节发完、进度到 100 之后，
/// 在存储端给出结果前阶段仍是 [`UploadPhase::Uploading`]。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadState {
    pub selection_id: u64,
    pub selected_file: Option<SelectedFile>,
    pub progress_percent: f64,
    pub is_uploading: bool,
    pub uploaded_file: Option<UploadedFile>,
    pub failure: Option<String>,
    /// 需要等待传输给出成功或失败
    pub awaiting_result: bool,
}

impl UploadState {
    /// 选中新文件：进度归零并进入上传中，返回新的选择 id。
    pub fn select(&mut self, file: SelectedFile) -> u64 {
        self.selection_id += 1;
        self.selected_file = Some(file);
        self.progress_percent = 0.0;
        self.is_uploading = true;
        self.uploaded_file = None;
        self.failure = None;
        self.awaiting_result = false;
        self.selection_id
    }

    /// 选中文件，并在传输给出结果前保持上传中阶段
    pub fn select_awaiting_result(&mut self, file: SelectedFile) -> u64 {
        let selection_id = self.select(file);
        self.awaiting_result = true;
        selection_id
    }

    /// 回到未选择状态；id 同样递增，使仍在运行的进度源失效。
    pub fn reset(&mut self) {
        *self = Self {
            selection_id: self.selection_id + 1,
            ..Default::default()
        };
    }

    pub fn is_current(&self, selection_id: u64) -> bool {
        self.selection_id == selection_id
    }

    /// 模拟器的一次推进：累加增量，达到或超过 100 时钳到 100 并结束上传。
    ///
    /// 非上传中或增量非正时不做修改，返回 `false`。
    pub fn advance(&mut self, increment: f64) -> bool {
        if !self.is_uploading || !increment.is_finite() || increment <= 0.0 {
            return false;
        }

        let next = self.progress_percent + increment;
        if next >= COMPLETE_PERCENT {
            self.progress_percent = COMPLETE_PERCENT;
            self.is_uploading = false;
        } else {
            self.progress_percent = next;
        }
        true
    }

    /// 外部传输上报的百分比。值被钳到 `[0, 100]`，不会让进度回退。
    pub fn apply_progress(&mut self, percent: f64) -> bool {
        if !self.is_uploading || percent.is_nan() {
            return false;
        }

        let percent = percent.clamp(0.0, COMPLETE_PERCENT);
        if percent <= self.progress_percent {
            return false;
        }

        self.progress_percent = percent;
        if percent >= COMPLETE_PERCENT {
            self.is_uploading = false;
        }
        true
    }

    /// 传输成功：记录上传结果，进度置 100。
    pub fn complete(&mut self, uploaded: UploadedFile) -> bool {
        if !self.is_settleable() {
            return false;
        }
        self.progress_percent = COMPLETE_PERCENT;
        self.is_uploading = false;
        self.awaiting_result = false;
        self.uploaded_file = Some(uploaded);
        true
    }

    /// 传输失败：结束上传，保留当前进度，不设置上传结果。
    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if !self.is_settleable() {
            return false;
        }
        self.is_uploading = false;
        self.awaiting_result = false;
        self.failure = Some(reason.into());
        true
    }

    fn is_settleable(&self) -> bool {
        self.selected_file.is_some() && self.uploaded_file.is_none() && self.failure.is_none()
    }

    /// 当前选择已结束：未选择、已完成或已失败
    pub fn is_settled(&self) -> bool {
        !self.is_uploading && !self.awaiting_result
    }

    pub fn filled_segments(&self, total_segments: usize) -> usize {
        filled_segments(self.progress_percent, total_segments)
    }

    /// 四舍五入后的整数百分比，用于状态行
    pub fn rounded_percent(&self) -> u8 {
        self.progress_percent.clamp(0.0, COMPLETE_PERCENT).round() as u8
    }

    pub fn phase(&self) -> UploadPhase {
        if self.failure.is_some() {
            UploadPhase::Failed
        } else if self.is_uploading || self.awaiting_result {
            UploadPhase::Uploading
        } else if self.selected_file.is_some() {
            UploadPhase::Uploaded
        } else {
            UploadPhase::Idle
        }
    }
}
