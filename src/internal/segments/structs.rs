pub mod segment_display;
pub mod segment_style;

pub use segment_display::SegmentDisplay;
pub use segment_style::SegmentStyle;
