use crate::internal::states::reactive_core::PropertyWatcher;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::upload_state::structs::UploadState;

/// 上传状态的只读句柄
///
/// 由 [`FileUploadProgress::state`](super::FileUploadProgress::state) 发放。
/// 只能读取和监听；状态只经由组件的方法修改，不变式由组件维护。
/// 组件被 drop 后句柄仍可读到最后的状态。
#[derive(Clone, Debug)]
pub struct UploadStateReader {
    state: UnlockReactiveProperty<UploadState>,
}

impl UploadStateReader {
    pub(crate) fn new(state: UnlockReactiveProperty<UploadState>) -> Self {
        Self { state }
    }

    pub fn snapshot(&self) -> UploadState {
        self.state.get_or_default()
    }

    pub fn map<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&UploadState) -> R,
    {
        self.state.map(f)
    }

    pub fn watch(&self) -> PropertyWatcher<UploadState> {
        self.state.watch()
    }
}
