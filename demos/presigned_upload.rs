//! 通过预签名地址真实上传一个文件
//!
//! 后端需提供 `POST /api/get-upload-url`，返回 `{ "url", "fields" }`。
//!
//! ```text
//! cargo run --example presigned_upload -- --backend http://localhost:3000 report.pdf --mime application/pdf
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use segmented_upload::FileUploadProgress;
use segmented_upload::logging::{LogConfig, init_logging};
use segmented_upload::presigned::PresignedUploader;
use segmented_upload::upload_state::SelectedFile;
use segmented_upload::widget::{DEFAULT_TOTAL_SEGMENTS, WidgetView};

#[derive(Debug, Parser)]
#[command(name = "presigned_upload", about = "Upload a file through a presigned POST form")]
struct Cli {
    /// 签发上传地址的后端根地址
    #[arg(long)]
    backend: String,

    /// 要上传的文件
    file: PathBuf,

    /// MIME 类型，默认 application/octet-stream
    #[arg(long)]
    mime: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TOTAL_SEGMENTS)]
    segments: usize,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::default().with_level(cli.log_level.as_str()))?;

    let uploader = PresignedUploader::new(&cli.backend)
        .with_context(|| format!("后端地址无效: {}", cli.backend))?;
    let widget = FileUploadProgress::builder()
        .total_segments(cli.segments)
        .transport(uploader)
        .build()?;

    let mut file = SelectedFile::from_path(&cli.file).await?;
    if let Some(mime) = cli.mime {
        file = file.with_mime_type(mime);
    }
    println!("{}", file.name);

    // 渲染任务只监听状态，结束条件交给 settled()
    let mut watcher = widget.watch();
    let total_segments = widget.config().total_segments;
    let style = widget.config().style.clone();
    let renderer = tokio::spawn(async move {
        while let Ok(snapshot) = watcher.changed().await {
            let view = WidgetView::from_state(&snapshot, total_segments, &style);
            print!("\r{:<16} {}", view.status_line(), view.bar());
            let _ = io::stdout().flush();
        }
    });

    widget.select_file(file)?;
    let settled = widget.settled().await?;
    renderer.abort();
    println!();

    match (settled.uploaded_file, settled.failure) {
        (Some(uploaded), _) => {
            println!("File uploaded successfully!");
            println!("{}", uploaded.url);
            Ok(())
        }
        (None, Some(reason)) => bail!("Upload failed: {reason}"),
        (None, None) => bail!("Upload did not finish"),
    }
}
