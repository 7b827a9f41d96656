/// 计算应点亮的分段数：`floor(percent / 100 * total)`，结果落在 `[0, total]`。
///
/// - 百分比单调不减时，结果也单调不减
/// - `0` 及以下、NaN 返回 0；`>= 100` 返回 `total_segments`
///
/// 先乘后除，整数百分比时不会因浮点误差少算一格。
pub fn filled_segments(progress_percent: f64, total_segments: usize) -> usize {
    if total_segments == 0 || progress_percent.is_nan() || progress_percent <= 0.0 {
        return 0;
    }
    if progress_percent >= 100.0 {
        return total_segments;
    }

    let filled = (progress_percent * total_segments as f64 / 100.0).floor() as usize;
    filled.min(total_segments)
}
