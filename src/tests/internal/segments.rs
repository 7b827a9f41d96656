//! 分段映射与渲染测试
//!
//! 测试项：
//! - 典型场景：20 段 / 45% → 9 段
//! - 全量性质：任意分段数、任意整数百分比都与 `p * total / 100` 向下取整一致
//! - 单调性、边界值（0、100、越界、NaN）
//! - 渲染：纯文本、自定义字符、颜色

use crate::segments::{SegmentDisplay, SegmentStyle, filled_segments};

// ═══════════════════════════ 映射 ═══════════════════════════

#[test]
fn twenty_segments_at_45_percent_fill_nine() {
    assert_eq!(filled_segments(45.0, 20), 9);
}

#[test]
fn integer_percents_match_floor_of_exact_ratio() {
    for total in 1..=64usize {
        for percent in 0..=100usize {
            let expected = percent * total / 100;
            let actual = filled_segments(percent as f64, total);
            assert_eq!(actual, expected, "total={total} percent={percent}");
            assert!(actual <= total);
        }
    }
}

#[test]
fn filled_segments_are_monotonic_in_progress() {
    for total in [1usize, 3, 7, 20, 33, 100] {
        let mut previous = 0;
        let mut step = 0;
        while step <= 400 {
            let percent = step as f64 * 0.25;
            let filled = filled_segments(percent, total);
            assert!(filled >= previous, "total={total} percent={percent}");
            previous = filled;
            step += 1;
        }
        assert_eq!(previous, total);
    }
}

#[test]
fn edge_values_are_clamped() {
    assert_eq!(filled_segments(0.0, 20), 0);
    assert_eq!(filled_segments(100.0, 20), 20);
    assert_eq!(filled_segments(250.0, 20), 20);
    assert_eq!(filled_segments(-3.0, 20), 0);
    assert_eq!(filled_segments(f64::NAN, 20), 0);
    assert_eq!(filled_segments(99.9, 20), 19);
    assert_eq!(filled_segments(50.0, 0), 0);
}

#[test]
fn partial_segment_is_not_lit() {
    // 4.99% 不足一段（每段 5%）
    assert_eq!(filled_segments(4.99, 20), 0);
    assert_eq!(filled_segments(5.0, 20), 1);
}

// ═══════════════════════════ 渲染 ═══════════════════════════

#[test]
fn display_from_progress() {
    let display = SegmentDisplay::from_progress(45.0, 20);
    assert_eq!(display.filled, 9);
    assert_eq!(display.empty(), 11);
    assert!(!display.is_complete());
    assert!(SegmentDisplay::from_progress(100.0, 20).is_complete());
}

#[test]
fn plain_render_puts_lit_segments_first() {
    let display = SegmentDisplay { filled: 3, total: 5 };
    assert_eq!(display.render(&SegmentStyle::plain()), "█ █ █ ░ ░");
}

#[test]
fn custom_glyphs_and_separator() {
    let style = SegmentStyle::plain()
        .with_filled('#')
        .with_empty('-')
        .with_separator("");
    let display = SegmentDisplay::from_progress(40.0, 10);
    assert_eq!(display.render(&style), "####------");
}

#[test]
fn colored_render_wraps_segments_in_ansi() {
    let display = SegmentDisplay { filled: 2, total: 4 };
    let rendered = display.render(&SegmentStyle::default());
    assert!(rendered.contains("\u{1b}["));
    assert_eq!(rendered.matches('█').count(), 2);
    assert_eq!(rendered.matches('░').count(), 2);
}

#[test]
fn overfilled_display_has_no_empty_segments() {
    let display = SegmentDisplay { filled: 5, total: 3 };
    assert_eq!(display.empty(), 0);
    assert!(display.is_complete());
    assert_eq!(display.render(&SegmentStyle::plain()), "█ █ █");
}
