use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::internal::presigned::structs::presigned_config::PresignedUploaderConfig;
use crate::internal::presigned::structs::upload_destination::{DestinationRequest, UploadDestination};
use crate::internal::transport::structs::UploadError;
use crate::internal::upload_state::structs::SelectedFile;

/// 第一步：向后端申请预签名上传地址
pub(crate) async fn request_upload_destination(
    client: &Client,
    backend_url: &Url,
    config: &PresignedUploaderConfig,
    file: &SelectedFile,
) -> Result<UploadDestination, UploadError> {
    let endpoint = backend_url.join(&config.presign_path)?;

    debug!(
        target: "upload::presigned",
        endpoint = %endpoint,
        file = %file.name,
        "requesting upload destination"
    );

    let response = client
        .post(endpoint)
        .json(&DestinationRequest {
            file_name: &file.name,
            file_type: file.mime_or_default(),
        })
        .send()
        .await
        .map_err(UploadError::DestinationRequest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(UploadError::DestinationRejected(status));
    }

    let destination: UploadDestination = response.json().await.map_err(UploadError::DestinationDecode)?;

    // 目标地址必须可解析
    Url::parse(&destination.url)?;

    Ok(destination)
}
