use owo_colors::OwoColorize;

use crate::internal::segments::functions::filled_segments::filled_segments;

use super::segment_style::SegmentStyle;

/// 分段显示：由进度派生，不单独存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDisplay {
    /// 点亮的分段数
    pub filled: usize,
    /// 分段总数
    pub total: usize,
}

impl SegmentDisplay {
    pub fn from_progress(progress_percent: f64, total_segments: usize) -> Self {
        Self {
            filled: filled_segments(progress_percent, total_segments),
            total: total_segments,
        }
    }

    /// 未点亮的分段数
    pub fn empty(&self) -> usize {
        self.total.saturating_sub(self.filled)
    }

    pub fn is_complete(&self) -> bool {
        self.filled >= self.total
    }

    /// 渲染为一行文本，点亮的分段在前。
    pub fn render(&self, style: &SegmentStyle) -> String {
        let segments: Vec<String> = (0..self.total)
            .map(|index| {
                let lit = index < self.filled;
                match (lit, style.colored) {
                    (true, true) => style.filled.white().to_string(),
                    (false, true) => style.empty.bright_black().to_string(),
                    (true, false) => style.filled.to_string(),
                    (false, false) => style.empty.to_string(),
                }
            })
            .collect();

        segments.join(&style.separator)
    }
}
