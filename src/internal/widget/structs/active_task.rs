use tokio::task::JoinHandle;
use tracing::debug;

/// 活动任务的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Simulation,
    Transport,
}

/// 组件当前唯一的进度任务；取消或 drop 时 abort。
#[derive(Debug)]
pub(crate) struct ActiveTask {
    selection_id: u64,
    kind: TaskKind,
    handle: JoinHandle<()>,
}

impl ActiveTask {
    pub(crate) fn new(selection_id: u64, kind: TaskKind, handle: JoinHandle<()>) -> Self {
        Self {
            selection_id,
            kind,
            handle,
        }
    }

    pub(crate) fn kind(&self) -> TaskKind {
        self.kind
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub(crate) fn cancel(self) {
        if !self.handle.is_finished() {
            debug!(
                target: "upload::widget",
                selection_id = self.selection_id,
                kind = ?self.kind,
                "cancelling pending task"
            );
        }
        // abort 在 Drop 中完成
    }
}

impl Drop for ActiveTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
