use std::fmt;

use crate::internal::segments::structs::{SegmentDisplay, SegmentStyle};
use crate::internal::upload_state::enums::UploadPhase;
use crate::internal::upload_state::structs::UploadState;

/// 文件名未知时的占位
pub const FALLBACK_FILE_LABEL: &str = "Uploading file...";

/// 组件某一时刻的渲染快照
///
/// 未选择文件时渲染 `[ Select File ]`，否则渲染三行：文件名、`45% Uploading` 状态行、分段条。
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub phase: UploadPhase,
    pub file_label: Option<String>,
    pub percent: u8,
    pub segments: SegmentDisplay,
    pub style: SegmentStyle,
}

impl WidgetView {
    pub fn from_state(state: &UploadState, total_segments: usize, style: &SegmentStyle) -> Self {
        Self {
            phase: state.phase(),
            file_label: state.selected_file.as_ref().map(|f| f.name.clone()),
            percent: state.rounded_percent(),
            segments: SegmentDisplay::from_progress(state.progress_percent, total_segments),
            style: style.clone(),
        }
    }

    /// 状态行，如 `45% Uploading`
    pub fn status_line(&self) -> String {
        format!("{}% {}", self.percent, self.phase.label())
    }

    pub fn bar(&self) -> String {
        self.segments.render(&self.style)
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.phase == UploadPhase::Idle {
            return write!(f, "[ {} ]", UploadPhase::Idle.label());
        }

        writeln!(f, "{}", self.file_label.as_deref().unwrap_or(FALLBACK_FILE_LABEL))?;
        writeln!(f, "{}", self.status_line())?;
        write!(f, "{}", self.bar())
    }
}
