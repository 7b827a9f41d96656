//! # ReactiveProperty — 响应式属性内核
//!
//! 上传状态共享的基础设施：组件是唯一写入方，渲染端和进度源各持一个句柄。
//! 所有修改都走 `watch::Sender` 的写锁，守卫（如选择 id 校验）与写入不会被其它写入方插队。
//!
//! 对外以 [`UnlockReactiveProperty`](super::unlock_reactive::UnlockReactiveProperty) 的名字导出。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 所有属性句柄都已释放，值被清空
    #[error("属性已被销毁")]
    Destroyed,

    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

/// 所有句柄共享的发送端。最后一个句柄释放时广播 `None`，唤醒仍在等待的监听者。
#[derive(Debug)]
pub(crate) struct Shared<T> {
    sender: watch::Sender<Option<T>>,
    closed: AtomicBool,
}

impl<T> Shared<T> {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::Relaxed);
        self.sender.send_replace(None);
    }
}

/// 响应式属性：克隆得到的是同一个值的另一个句柄。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    shared: Arc<Shared<T>>,
    snapshot: watch::Receiver<Option<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, snapshot) = watch::channel(Some(value));
        Self {
            shared: Arc::new(Shared {
                sender,
                closed: AtomicBool::new(false),
            }),
            snapshot,
        }
    }

    /// 整体替换属性值，所有监听者都会收到通知。
    pub fn update(&self, new_value: T) -> Result<&Self, ReactivePropertyError> {
        if self.shared.is_closed() {
            return Err(ReactivePropertyError::Destroyed);
        }
        self.shared.sender.send_replace(Some(new_value));
        Ok(self)
    }

    /// 在写锁内原地修改并通知监听者，返回闭包的结果。
    pub fn update_field<F, R>(&self, updater: F) -> Result<R, ReactivePropertyError>
    where
        F: FnOnce(&mut T) -> R,
    {
        if self.shared.is_closed() {
            return Err(ReactivePropertyError::Destroyed);
        }

        let mut updater = Some(updater);
        let mut result = None;
        self.shared.sender.send_if_modified(|slot| match (slot.as_mut(), updater.take()) {
            (Some(value), Some(f)) => {
                result = Some(f(value));
                true
            }
            _ => false,
        });

        result.ok_or(ReactivePropertyError::Destroyed)
    }

    /// 条件修改：闭包返回 `true` 才通知监听者，返回是否发生了修改。
    ///
    /// 读取、判断与写入在同一把写锁内完成，适合「仅当仍属于当前选择时才推进进度」这类守卫。
    pub fn update_if<F>(&self, updater: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        if self.shared.is_closed() {
            return false;
        }
        self.shared.sender.send_if_modified(|slot| slot.as_mut().is_some_and(updater))
    }

    /// 当前值的快照（会 clone）
    pub fn get_current(&self) -> Option<T> {
        self.snapshot.borrow().clone()
    }

    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get_current().unwrap_or_default()
    }

    /// 对当前值应用转换函数，避免整体 clone。
    ///
    /// ```rust,no_run
    /// use segmented_upload::states::unlock_reactive::UnlockReactiveProperty;
    ///
    /// let prop = UnlockReactiveProperty::new(45.0f64);
    /// let rounded = prop.map(|p| p.round() as u32); // Some(45)
    /// ```
    pub fn map<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.snapshot.borrow().as_ref().map(f)
    }

    /// 新建监听器；只会看到创建之后的变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.shared.sender.subscribe(),
            _shared: Arc::clone(&self.shared),
        }
    }
}

/// 属性监听器
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<Option<T>>,
    // 监听期间保持发送端存活
    _shared: Arc<Shared<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化并返回新值。
    ///
    /// 连续多次更新可能被合并，只保证拿到最新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        self.receiver
            .borrow_and_update()
            .clone()
            .ok_or(ReactivePropertyError::Destroyed)
    }

    /// 挂起直到当前值满足条件（当前值已满足时立即返回）。
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Result<T, ReactivePropertyError>
    where
        F: FnMut(&T) -> bool,
    {
        let value = self
            .receiver
            .wait_for(|slot| slot.as_ref().is_none_or(|v| predicate(v)))
            .await?;
        value.clone().ok_or(ReactivePropertyError::Destroyed)
    }
}
