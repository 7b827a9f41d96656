use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::internal::presigned::structs::presigned_config::PresignedUploaderConfig;
use crate::internal::presigned::structs::progress_stream::ProgressStream;
use crate::internal::presigned::structs::upload_destination::UploadDestination;
use crate::internal::transport::structs::UploadError;
use crate::internal::upload_state::structs::SelectedFile;

/// 第二步：把预签名字段与文件以 multipart 表单提交到目标地址
///
/// 字段按后端返回顺序写入，文件作为最后一个字段；`on_progress` 随请求体发送被调用。
pub(crate) async fn post_multipart<F>(
    client: &Client,
    destination: &UploadDestination,
    file: &SelectedFile,
    config: &PresignedUploaderConfig,
    on_progress: F,
) -> Result<Response, UploadError>
where
    F: FnMut(u64, u64) + Send + Sync + Unpin + 'static,
{
    let handle = File::open(&file.path).await.map_err(UploadError::ReadFile)?;
    // 以打开时的实际大小为准，选择之后文件可能被改动
    let total = handle.metadata().await.map_err(UploadError::ReadFile)?.len();

    let reader = ReaderStream::with_capacity(handle, config.stream_buffer_size.max(1));
    let body = Body::wrap_stream(ProgressStream::new(reader, total, on_progress));

    let file_part = Part::stream_with_length(body, total)
        .file_name(file.name.clone())
        .mime_str(file.mime_or_default())?;

    let form = destination
        .fields
        .iter()
        .fold(Form::new(), |form, (key, value)| form.text(key.clone(), value.clone()))
        .part(config.file_field.clone(), file_part);

    debug!(
        target: "upload::presigned",
        url = %destination.url,
        fields = destination.fields.len(),
        size = total,
        "posting multipart form"
    );

    let response = client.post(&destination.url).multipart(form).send().await?;
    Ok(response)
}
