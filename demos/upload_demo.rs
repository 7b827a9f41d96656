//! 终端里的分段上传进度演示（模拟上传）
//!
//! ```text
//! cargo run --example upload_demo -- report.pdf photo.png --segments 30
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use segmented_upload::FileUploadProgress;
use segmented_upload::logging::{LogConfig, init_logging};
use segmented_upload::segments::SegmentStyle;
use segmented_upload::widget::DEFAULT_TOTAL_SEGMENTS;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "upload_demo", about = "Segmented upload progress with a simulated upload")]
struct Cli {
    /// 依次「上传」的文件
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// 分段数
    #[arg(long, default_value_t = DEFAULT_TOTAL_SEGMENTS)]
    segments: usize,

    /// 模拟器节拍间隔（毫秒）
    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    /// 固定随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 关闭颜色
    #[arg(long)]
    no_color: bool,

    /// 日志级别，`RUST_LOG` 优先
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(
        &LogConfig::default()
            .with_level(cli.log_level.as_str())
            .with_ansi(!cli.no_color),
    )?;

    let style = if cli.no_color {
        SegmentStyle::plain()
    } else {
        SegmentStyle::default()
    };

    let mut builder = FileUploadProgress::builder()
        .total_segments(cli.segments)
        .tick_interval(Duration::from_millis(cli.tick_ms))
        .style(style)
        .on_file_select(|file| info!(file = %file.name, size = file.size, "Selected file"));
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let widget = builder.build()?;

    println!("{}", widget.view());

    for (index, path) in cli.files.iter().enumerate() {
        if index > 0 {
            widget.reset()?;
            println!("\nUpload another file");
        }

        let mut watcher = widget.watch();
        widget
            .select_path(path)
            .await
            .with_context(|| format!("无法选择文件 {}", path.display()))?;

        let state = widget.snapshot();
        if let Some(file) = &state.selected_file {
            println!("{}", file.name);
        }

        loop {
            let state = watcher.changed().await?;
            let view = widget.render(&state);
            print!("\r{:<16} {}", view.status_line(), view.bar());
            io::stdout().flush()?;
            if state.is_settled() {
                break;
            }
        }
        println!();
    }

    Ok(())
}
