/// 组件所处阶段（由 [`UploadState`](super::structs::UploadState) 派生）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// 尚未选择文件
    Idle,
    Uploading,
    Uploaded,
    /// 传输失败，可重新选择
    Failed,
}

impl UploadPhase {
    /// 状态行里的文字
    pub fn label(&self) -> &'static str {
        match self {
            UploadPhase::Idle => "Select File",
            UploadPhase::Uploading => "Uploading",
            UploadPhase::Uploaded => "Uploaded",
            UploadPhase::Failed => "Upload failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadPhase::Uploaded | UploadPhase::Failed)
    }
}
