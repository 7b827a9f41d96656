use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::internal::simulator::constants::{DEFAULT_TICK_INTERVAL, MAX_INCREMENT, MIN_INCREMENT};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::upload_state::structs::UploadState;

/// 单个节拍的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Advanced,
    Finished,
    /// 选择已被替换、重置，或上传已由别处结束
    Stale,
}

/// 模拟进度源
///
/// 每个节拍（首个节拍在启动一个间隔之后）给进度加上 `[1, 2)` 内的随机增量，
/// 达到 100 后结束。每次写入都在状态写锁内校验选择 id，被取消的模拟器不会再改动新选择。
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    tick_interval: Duration,
    seed: Option<u64>,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
        }
    }
}

impl ProgressSimulator {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            ..Default::default()
        }
    }

    /// 固定随机种子，使增量序列可复现
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// 在给定运行时上启动模拟任务；取消由调用方 abort 返回的句柄。
    pub fn spawn(
        &self,
        runtime: &Handle,
        state: UnlockReactiveProperty<UploadState>,
        selection_id: u64,
    ) -> JoinHandle<()> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        runtime.spawn(Self::run(self.tick_interval, rng, state, selection_id))
    }

    /// 模拟循环，直到进度到达 100 或选择失效。
    pub(crate) async fn run(
        tick_interval: Duration,
        mut rng: StdRng,
        state: UnlockReactiveProperty<UploadState>,
        selection_id: u64,
    ) {
        // 零间隔会让 interval 直接 panic
        let period = tick_interval.max(Duration::from_millis(1));
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!(
            target: "upload::simulator",
            selection_id,
            tick_ms = period.as_millis() as u64,
            "simulation started"
        );

        loop {
            ticker.tick().await;
            let increment = rng.gen_range(MIN_INCREMENT..MAX_INCREMENT);

            match Self::apply_tick(&state, selection_id, increment) {
                Tick::Advanced => {
                    trace!(target: "upload::simulator", selection_id, increment, "tick");
                }
                Tick::Finished => {
                    debug!(target: "upload::simulator", selection_id, "simulation finished");
                    break;
                }
                Tick::Stale => {
                    debug!(target: "upload::simulator", selection_id, "selection is stale, stopping");
                    break;
                }
            }
        }
    }

    fn apply_tick(
        state: &UnlockReactiveProperty<UploadState>,
        selection_id: u64,
        increment: f64,
    ) -> Tick {
        let mut tick = Tick::Stale;
        state.update_if(|s| {
            if !s.is_current(selection_id) || !s.advance(increment) {
                return false;
            }
            tick = if s.is_uploading {
                Tick::Advanced
            } else {
                Tick::Finished
            };
            true
        });
        tick
    }
}
