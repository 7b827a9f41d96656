use async_trait::async_trait;

use crate::internal::transport::structs::{ProgressSink, UploadError};
use crate::internal::upload_state::structs::{SelectedFile, UploadedFile};

/// 外部传输适配器
///
/// 实现方负责把文件传到远端，过程中通过 `progress` 上报百分比，
/// 返回值即终态：`Ok` 为成功并带回文件引用，`Err` 为失败。
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(
        &self,
        file: &SelectedFile,
        progress: ProgressSink,
    ) -> Result<UploadedFile, UploadError>;
}
