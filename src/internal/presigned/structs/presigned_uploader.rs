//! 预签名上传器
//!
//! 两步协议：
//!
//! 1. `POST {backend}/api/get-upload-url`，请求体 `{ "fileName", "fileType" }`，
//!    响应 `{ "url", "fields": { ... } }`
//! 2. `POST url`，multipart 表单：先原样写入全部 `fields`，最后是名为 `file` 的文件；
//!    存储端返回 204 视为成功，其余状态码一律失败
//!
//! 成功后的访问地址为 `url` + `fields.key`。不做重试，第一次失败即结束。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use segmented_upload::presigned::PresignedUploader;
//! # use segmented_upload::upload_state::SelectedFile;
//! # use segmented_upload::transport::ProgressSink;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uploader = PresignedUploader::new("http://localhost:3000")?
//!     .with_on_progress_hook(|sent, total| println!("{sent}/{total}"));
//!
//! let file = SelectedFile::from_path("report.pdf").await?.with_mime_type("application/pdf");
//! let uploaded = uploader.upload_file(&file, ProgressSink::noop()).await?;
//! println!("{}", uploaded.url);
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::internal::presigned::functions::object_url::object_url;
use crate::internal::presigned::functions::post_form::post_multipart;
use crate::internal::presigned::functions::request_destination::request_upload_destination;
use crate::internal::presigned::raw_xml::storage_error::StorageErrorBody;
use crate::internal::transport::structs::{ProgressSink, UploadError, UploadHooksContainer};
use crate::internal::transport::traits::upload_hook::{HookAbort, UploadHook};
use crate::internal::transport::traits::upload_transport::UploadTransport;
use crate::internal::upload_state::structs::{SelectedFile, UploadedFile};

use super::presigned_config::PresignedUploaderConfig;

/// 预签名上传器，实现 [`UploadTransport`]，可直接交给上传组件使用。
pub struct PresignedUploader {
    client: Client,
    backend_url: Url,
    config: PresignedUploaderConfig,
    /// 每次上传取一份快照，请求体流也持有一份用于进度钩子
    hooks: UploadHooksContainer,
}

impl PresignedUploader {
    /// 以后端根地址创建上传器，使用默认配置
    pub fn new(backend_url: &str) -> Result<Self, UploadError> {
        Self::with_config(backend_url, PresignedUploaderConfig::default())
    }

    pub fn with_config(backend_url: &str, config: PresignedUploaderConfig) -> Result<Self, UploadError> {
        let backend_url = Url::parse(backend_url)?;
        let client = Client::builder()
            .http1_only()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            backend_url,
            config,
            hooks: UploadHooksContainer::default(),
        })
    }

    /// 替换 HTTP 客户端（例如需要自定义代理或证书时）
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    pub fn config(&self) -> &PresignedUploaderConfig {
        &self.config
    }

    /// 注册「开始前」钩子；闭包返回 `Err(HookAbort)` 会中止本次上传。
    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add_before_start(f);
        self
    }

    /// 注册「进度」钩子；参数为已发送字节数、总字节数。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(u64, u64) + Send + Sync + 'static,
    {
        self.hooks.add_on_progress(f);
        self
    }

    /// 注册「完成后」钩子；存储端确认成功后调用。
    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut(UploadedFile) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.hooks.add_after_complete(f);
        self
    }

    /// 添加完整钩子
    pub fn with_hook(mut self, hook: impl UploadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 执行一次完整的预签名上传
    pub async fn upload_file(
        &self,
        file: &SelectedFile,
        progress: ProgressSink,
    ) -> Result<UploadedFile, UploadError> {
        let hooks = self.hooks.clone();
        if hooks.run_before_start().await.is_err() {
            info!(target: "upload::presigned", file = %file.name, "upload aborted by hook");
            return Err(UploadError::Aborted);
        }

        let destination =
            request_upload_destination(&self.client, &self.backend_url, &self.config, file).await?;
        let key = destination
            .key()
            .map(str::to_owned)
            .ok_or(UploadError::MissingField("key"))?;

        let stream_hooks = hooks.clone();
        let sink = progress.clone();
        let on_progress = move |sent: u64, total: u64| {
            sink.report_bytes(sent, total);
            stream_hooks.run_on_progress(sent, total);
        };

        let response = post_multipart(&self.client, &destination, file, &self.config, on_progress).await?;
        let status = response.status();

        if status != self.config.success_status {
            let body = response.text().await.unwrap_or_default();
            let storage_error = StorageErrorBody::parse(&body);
            warn!(
                target: "upload::presigned",
                status = status.as_u16(),
                code = storage_error.as_ref().map(|e| e.code.as_str()).unwrap_or("-"),
                "storage rejected the upload"
            );
            return Err(UploadError::UnexpectedStatus {
                status,
                code: storage_error.as_ref().map(|e| e.code.clone()),
                message: storage_error.map(|e| e.message),
            });
        }

        let uploaded = UploadedFile {
            url: object_url(&destination.url, &key),
            key,
            name: file.name.clone(),
            size: file.size,
            uploaded_at: Utc::now(),
        };

        debug!(target: "upload::presigned", url = %uploaded.url, "upload confirmed");
        progress.report(100.0);
        hooks.run_after_complete(&uploaded).await;

        Ok(uploaded)
    }
}

#[async_trait]
impl UploadTransport for PresignedUploader {
    async fn upload(
        &self,
        file: &SelectedFile,
        progress: ProgressSink,
    ) -> Result<UploadedFile, UploadError> {
        self.upload_file(file, progress).await
    }
}

impl std::fmt::Debug for PresignedUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresignedUploader")
            .field("backend_url", &self.backend_url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
