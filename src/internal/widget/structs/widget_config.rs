use std::time::Duration;

use crate::internal::segments::structs::SegmentStyle;
use crate::internal::simulator::constants::DEFAULT_TICK_INTERVAL;

use super::widget_error::WidgetError;

/// 默认分段数
pub const DEFAULT_TOTAL_SEGMENTS: usize = 20;

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// 分段总数，必须大于 0
    pub total_segments: usize,
    /// `true` 时由内置模拟器驱动进度；`false` 时由传输适配器或调用方驱动
    pub simulate_upload: bool,
    /// 模拟器节拍间隔
    pub tick_interval: Duration,
    /// 样式覆盖
    pub style: SegmentStyle,
    /// 模拟器随机种子，`None` 时每次不同
    pub seed: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            total_segments: DEFAULT_TOTAL_SEGMENTS,
            simulate_upload: true,
            tick_interval: DEFAULT_TICK_INTERVAL,
            style: SegmentStyle::default(),
            seed: None,
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.total_segments == 0 {
            return Err(WidgetError::ZeroSegments);
        }
        Ok(())
    }
}
