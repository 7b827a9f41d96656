//! 预签名上传测试（本机模拟存储，不依赖外部服务）
//!
//! 测试项：
//! - 204 成功：表单字段顺序、文件最后、访问地址、进度单调到 100
//! - 403 + XML：错误码透出
//! - 签发接口失败 / 缺少 key
//! - 钩子：开始前中止、进度、完成后、慢钩子不阻塞下一次上传
//! - 通过组件端到端上传
//! - 访问地址拼接、字段顺序解析、XML 错误体解析

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::Notify;

use crate::FileUploadProgress;
use crate::presigned::{
    PresignedUploader, PresignedUploaderConfig, StorageErrorBody, UploadDestination, object_url,
};
use crate::tests::{DENIED_XML, StorageBehavior, selected_temp_file, spawn_mock_storage};
use crate::transport::{HookAbort, ProgressSink, UploadError, percent_of};
use crate::upload_state::{SelectedFile, UploadPhase};

const FILE_SIZE: usize = 200 * 1024;

fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<f64>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&seen);
    let sink = ProgressSink::new(move |p| recorded.lock().unwrap().push(p));
    (sink, seen)
}

// ═══════════════════════════ 上传器 ═══════════════════════════

#[tokio::test]
async fn upload_succeeds_on_no_content() {
    let storage = spawn_mock_storage(StorageBehavior::Accept).await;
    let (_temp, file) = selected_temp_file(&vec![7u8; FILE_SIZE]).await;
    let (sink, seen) = recording_sink();

    let uploader = PresignedUploader::new(&storage.base_url).unwrap();
    let uploaded = uploader.upload_file(&file, sink).await.unwrap();

    assert_eq!(uploaded.key, format!("uploads/{}", file.name));
    assert_eq!(uploaded.url, format!("{}uploads/{}", storage.bucket_url(), file.name));
    assert_eq!(uploaded.size, FILE_SIZE as u64);

    let requests = storage.presign_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["fileName"], file.name.as_str());
    assert_eq!(requests[0]["fileType"], "text/plain");

    let received = storage.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].field_names, vec!["key", "policy", "x-amz-signature", "file"]);
    assert_eq!(received[0].file_name.as_deref(), Some(file.name.as_str()));
    assert_eq!(received[0].file_bytes, FILE_SIZE);

    let seen = seen.lock().unwrap().clone();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[1] >= w[0]), "进度回退: {:?}", seen);
    assert_eq!(*seen.last().unwrap(), 100.0);
}

#[tokio::test]
async fn storage_rejection_surfaces_error_code() {
    let storage = spawn_mock_storage(StorageBehavior::Deny).await;
    let (_temp, file) = selected_temp_file(b"denied").await;

    let uploader = PresignedUploader::new(&storage.base_url).unwrap();
    let err = uploader.upload_file(&file, ProgressSink::noop()).await.unwrap_err();

    println!("预期错误: {}", err);
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.storage_code(), Some("AccessDenied"));
    assert!(matches!(err, UploadError::UnexpectedStatus { .. }));
}

#[tokio::test]
async fn presign_failure_stops_before_storage() {
    let storage = spawn_mock_storage(StorageBehavior::PresignFails).await;
    let (_temp, file) = selected_temp_file(b"never sent").await;

    let uploader = PresignedUploader::new(&storage.base_url).unwrap();
    let err = uploader.upload_file(&file, ProgressSink::noop()).await.unwrap_err();

    assert!(matches!(err, UploadError::DestinationRejected(StatusCode::INTERNAL_SERVER_ERROR)));
    assert!(storage.received().is_empty());
}

#[tokio::test]
async fn missing_key_is_reported() {
    let storage = spawn_mock_storage(StorageBehavior::MissingKey).await;
    let (_temp, file) = selected_temp_file(b"no key").await;

    let uploader = PresignedUploader::new(&storage.base_url).unwrap();
    let err = uploader.upload_file(&file, ProgressSink::noop()).await.unwrap_err();

    assert!(matches!(err, UploadError::MissingField("key")));
    assert!(storage.received().is_empty());
}

#[tokio::test]
async fn custom_presign_path_is_used() {
    let storage = spawn_mock_storage(StorageBehavior::Accept).await;
    let (_temp, file) = selected_temp_file(b"elsewhere").await;

    let config = PresignedUploaderConfig {
        presign_path: "/api/other-endpoint".to_string(),
        ..Default::default()
    };
    let uploader = PresignedUploader::with_config(&storage.base_url, config).unwrap();
    let err = uploader.upload_file(&file, ProgressSink::noop()).await.unwrap_err();

    assert!(matches!(err, UploadError::DestinationRejected(StatusCode::NOT_FOUND)));
}

#[test]
fn invalid_backend_url_is_rejected() {
    let result = PresignedUploader::new("not a url");
    assert!(matches!(result, Err(UploadError::InvalidUrl(_))));
}

// ═══════════════════════════ 钩子 ═══════════════════════════

#[tokio::test]
async fn before_start_hook_can_abort() {
    let storage = spawn_mock_storage(StorageBehavior::Accept).await;
    let (_temp, file) = selected_temp_file(b"aborted").await;

    let uploader = PresignedUploader::new(&storage.base_url)
        .unwrap()
        .with_before_start_hook(|| async { Err::<(), _>(HookAbort) });
    let err = uploader.upload_file(&file, ProgressSink::noop()).await.unwrap_err();

    assert!(matches!(err, UploadError::Aborted));
    assert!(storage.presign_requests().is_empty());
}

#[tokio::test]
async fn progress_and_completion_hooks_run() {
    let storage = spawn_mock_storage(StorageBehavior::Accept).await;
    let (_temp, file) = selected_temp_file(&vec![1u8; FILE_SIZE]).await;

    let last_bytes = Arc::new(Mutex::new((0u64, 0u64)));
    let completed = Arc::new(AtomicUsize::new(0));
    let completed_url = Arc::new(Mutex::new(String::new()));

    let bytes = Arc::clone(&last_bytes);
    let count = Arc::clone(&completed);
    let url = Arc::clone(&completed_url);
    let uploader = PresignedUploader::new(&storage.base_url)
        .unwrap()
        .with_on_progress_hook(move |sent, total| *bytes.lock().unwrap() = (sent, total))
        .with_after_complete_hook(move |uploaded| {
            let count = Arc::clone(&count);
            let url = Arc::clone(&url);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                *url.lock().unwrap() = uploaded.url;
            }
        });

    let uploaded = uploader.upload_file(&file, ProgressSink::noop()).await.unwrap();

    assert_eq!(*last_bytes.lock().unwrap(), (FILE_SIZE as u64, FILE_SIZE as u64));
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert_eq!(*completed_url.lock().unwrap(), uploaded.url);
}

#[tokio::test]
async fn slow_completion_hook_does_not_block_next_upload() {
    let storage = spawn_mock_storage(StorageBehavior::Accept).await;
    let (_temp, file) = selected_temp_file(b"two uploads, one uploader").await;

    let started = Arc::new(AtomicUsize::new(0));
    let completions = Arc::new(AtomicUsize::new(0));
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());

    let starts = Arc::clone(&started);
    let calls = Arc::clone(&completions);
    let hook_entered = Arc::clone(&entered);
    let hook_release = Arc::clone(&release);
    let uploader = PresignedUploader::new(&storage.base_url)
        .unwrap()
        .with_before_start_hook(move || {
            let starts = Arc::clone(&starts);
            async move {
                starts.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .with_after_complete_hook(move |_| {
            let calls = Arc::clone(&calls);
            let entered = Arc::clone(&hook_entered);
            let release = Arc::clone(&hook_release);
            async move {
                // 只有第一次上传停在这里
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    entered.notify_one();
                    release.notified().await;
                }
            }
        });
    let uploader = Arc::new(uploader);

    let spawn_upload = |uploader: Arc<PresignedUploader>, file: SelectedFile| {
        tokio::spawn(async move { uploader.upload_file(&file, ProgressSink::noop()).await })
    };

    let first = spawn_upload(Arc::clone(&uploader), file.clone());
    entered.notified().await;

    let second = spawn_upload(Arc::clone(&uploader), file);
    tokio::time::timeout(Duration::from_secs(5), async {
        while storage.received().len() < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    assert_eq!(started.load(Ordering::SeqCst), 2);
    assert!(!first.is_finished());

    release.notify_one();
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
    assert_eq!(completions.load(Ordering::SeqCst), 2);
}

// ═══════════════════════════ 组件端到端 ═══════════════════════════

#[tokio::test]
async fn widget_uploads_through_presigned_transport() {
    let storage = spawn_mock_storage(StorageBehavior::Accept).await;
    let (_temp, file) = selected_temp_file(&vec![9u8; FILE_SIZE]).await;

    let widget = FileUploadProgress::builder()
        .transport(PresignedUploader::new(&storage.base_url).unwrap())
        .build()
        .unwrap();

    widget.select_file(file.clone()).unwrap();
    let settled = widget.settled().await.unwrap();

    let uploaded = settled.uploaded_file.clone().unwrap();
    println!("上传完成: {}", uploaded.url);
    assert_eq!(uploaded.name, file.name);
    assert_eq!(settled.progress_percent, 100.0);
    assert_eq!(settled.phase(), UploadPhase::Uploaded);
}

#[tokio::test]
async fn widget_reports_storage_rejection() {
    let storage = spawn_mock_storage(StorageBehavior::Deny).await;
    let (_temp, file) = selected_temp_file(b"rejected through widget").await;

    let widget = FileUploadProgress::builder()
        .transport(PresignedUploader::new(&storage.base_url).unwrap())
        .build()
        .unwrap();

    widget.select_file(file).unwrap();
    let settled = widget.settled().await.unwrap();

    assert!(!settled.is_uploading);
    assert!(settled.uploaded_file.is_none());
    assert_eq!(settled.phase(), UploadPhase::Failed);
    assert!(settled.failure.as_deref().is_some_and(|r| r.contains("AccessDenied")));
}

#[tokio::test]
async fn widget_recovers_from_presign_failure() {
    let storage = spawn_mock_storage(StorageBehavior::PresignFails).await;
    let (_temp, file) = selected_temp_file(b"presign down").await;

    let widget = FileUploadProgress::builder()
        .transport(PresignedUploader::new(&storage.base_url).unwrap())
        .build()
        .unwrap();

    widget.select_file(file.clone()).unwrap();
    let settled = widget.settled().await.unwrap();
    assert!(!settled.is_uploading);
    assert!(settled.uploaded_file.is_none());
    assert_eq!(settled.progress_percent, 0.0);

    // 失败后可以重新选择
    let again = widget.select_file(file).unwrap();
    assert_eq!(widget.snapshot().selection_id, again);
    assert!(widget.snapshot().is_uploading);
}

// ═══════════════════════════ 纯函数 ═══════════════════════════

#[test]
fn object_url_joins_destination_and_key() {
    assert_eq!(
        object_url("https://bucket.s3.amazonaws.com/", "uploads/a.txt"),
        "https://bucket.s3.amazonaws.com/uploads/a.txt"
    );
    assert_eq!(
        object_url("https://bucket.s3.amazonaws.com", "/uploads/a.txt"),
        "https://bucket.s3.amazonaws.com/uploads/a.txt"
    );
    assert_eq!(
        object_url("https://bucket.s3.amazonaws.com/", "uploads/my report#1.txt"),
        "https://bucket.s3.amazonaws.com/uploads/my%20report%231.txt"
    );
}

#[test]
fn destination_fields_keep_backend_order() {
    let body = r#"{
        "url": "https://bucket.s3.amazonaws.com/",
        "fields": { "x-amz-date": "20300101T000000Z", "key": "uploads/a.txt", "Policy": "e30=" }
    }"#;
    let destination: UploadDestination = serde_json::from_str(body).unwrap();

    let names: Vec<&str> = destination.fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["x-amz-date", "key", "Policy"]);
    assert_eq!(destination.key(), Some("uploads/a.txt"));
    assert_eq!(destination.field("Policy"), Some("e30="));
}

#[test]
fn storage_error_body_parses_s3_xml() {
    let parsed = StorageErrorBody::parse(DENIED_XML).unwrap();
    assert_eq!(parsed.code, "AccessDenied");
    assert!(parsed.message.starts_with("Invalid according to Policy"));

    assert!(StorageErrorBody::parse("").is_none());
    assert!(StorageErrorBody::parse("<html>bad gateway</html>").is_none());
}

#[test]
fn byte_progress_rounds_to_whole_percent() {
    assert_eq!(percent_of(0, 0), None);
    assert_eq!(percent_of(0, 200), Some(0.0));
    assert_eq!(percent_of(90, 200), Some(45.0));
    assert_eq!(percent_of(1, 3), Some(33.0));
    assert_eq!(percent_of(300, 200), Some(100.0));
}
