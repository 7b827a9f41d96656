//! # UnlockReactiveProperty
//!
//! 轻量级响应式属性容器，基于 [`tokio::sync::watch`] 实现，读写不阻塞。
//! 上传组件用它持有 [`UploadState`](crate::upload_state::UploadState)，
//! 渲染端 watch 后每次变化重算分段。
//!
//! ## 使用示例
//! ```rust,no_run
//! use segmented_upload::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u32);
//! prop.update(1).unwrap();
//! prop.update_if(|v| { *v += 1; true });
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器。
///
/// 纯通知机制，适合高频更新场景（如进度条）；条件等待用 [`PropertyWatcher::wait_for`]。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
