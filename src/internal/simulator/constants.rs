use std::time::Duration;

/// 默认节拍间隔：200ms
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// 单次增量下限（含）
pub const MIN_INCREMENT: f64 = 1.0;

/// 单次增量上限（不含）
pub const MAX_INCREMENT: f64 = 2.0;
