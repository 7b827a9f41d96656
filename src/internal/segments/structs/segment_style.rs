/// 默认点亮分段字符
pub const DEFAULT_FILLED_GLYPH: char = '█';

/// 默认未点亮分段字符
pub const DEFAULT_EMPTY_GLYPH: char = '░';

/// 默认分段间隔
pub const DEFAULT_SEPARATOR: &str = " ";

/// 分段条的样式覆盖项。
///
/// 开启 `colored` 时，点亮分段为白色、未点亮为暗灰色；关闭后只靠字符区分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentStyle {
    pub filled: char,
    pub empty: char,
    pub separator: String,
    pub colored: bool,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            filled: DEFAULT_FILLED_GLYPH,
            empty: DEFAULT_EMPTY_GLYPH,
            separator: DEFAULT_SEPARATOR.to_string(),
            colored: true,
        }
    }
}

impl SegmentStyle {
    /// 无颜色的样式，适合日志或非终端输出。
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Default::default()
        }
    }

    pub fn with_filled(mut self, glyph: char) -> Self {
        self.filled = glyph;
        self
    }

    pub fn with_empty(mut self, glyph: char) -> Self {
        self.empty = glyph;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }
}
