//! 模拟进度源测试（tokio 暂停时钟，虚拟时间推进）
//!
//! 测试项：
//! - 进度单调不减，最终恰好 100 且结束上传
//! - 完成耗时落在 51..=100 个节拍之间
//! - 首个节拍在启动一个间隔之后
//! - 选择被替换后，旧模拟器不再改动状态并自行退出
//! - 固定种子可复现

use std::path::PathBuf;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, sleep};

use crate::simulator::{DEFAULT_TICK_INTERVAL, ProgressSimulator};
use crate::states::unlock_reactive::UnlockReactiveProperty;
use crate::upload_state::{SelectedFile, UploadState};

fn selected_state(name: &str) -> (UnlockReactiveProperty<UploadState>, u64) {
    let state = UnlockReactiveProperty::new(UploadState::default());
    let id = state
        .update_field(|s| s.select(SelectedFile::new(PathBuf::from(name), 2048)))
        .unwrap();
    (state, id)
}

/// 跑完一次模拟，返回观察到的进度序列与耗时
async fn run_to_completion(seed: Option<u64>) -> (Vec<f64>, Duration) {
    let (state, id) = selected_state("a.bin");
    let mut watcher = state.watch();
    let started = Instant::now();

    let simulator = ProgressSimulator::new(DEFAULT_TICK_INTERVAL).with_seed(seed);
    let handle = simulator.spawn(&Handle::current(), state.clone(), id);

    let mut seen = vec![0.0];
    loop {
        let snapshot = watcher.changed().await.unwrap();
        seen.push(snapshot.progress_percent);
        if !snapshot.is_uploading {
            break;
        }
    }
    let elapsed = started.elapsed();
    handle.await.unwrap();
    (seen, elapsed)
}

#[tokio::test(start_paused = true)]
async fn progress_is_monotonic_and_ends_at_complete() {
    let (seen, _) = run_to_completion(None).await;

    for pair in seen.windows(2) {
        assert!(pair[1] >= pair[0], "进度回退: {:?}", pair);
        assert!(pair[1] - pair[0] < 2.0, "单次增量过大: {:?}", pair);
    }
    assert_eq!(*seen.last().unwrap(), 100.0);
}

#[tokio::test(start_paused = true)]
async fn completion_takes_between_51_and_100_ticks() {
    let (_, elapsed) = run_to_completion(Some(7)).await;
    println!("模拟耗时: {:?}", elapsed);

    assert!(elapsed >= DEFAULT_TICK_INTERVAL * 51, "耗时过短: {:?}", elapsed);
    assert!(elapsed <= DEFAULT_TICK_INTERVAL * 100, "耗时过长: {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn first_tick_arrives_after_one_interval() {
    let (state, id) = selected_state("a.bin");
    let _handle = ProgressSimulator::default().spawn(&Handle::current(), state.clone(), id);

    sleep(Duration::from_millis(150)).await;
    assert_eq!(state.get_current().unwrap().progress_percent, 0.0);

    sleep(Duration::from_millis(100)).await;
    let progress = state.get_current().unwrap().progress_percent;
    assert!((1.0..2.0).contains(&progress), "一个节拍后进度为 {progress}");
}

#[tokio::test(start_paused = true)]
async fn stale_simulator_leaves_new_selection_alone() {
    let (state, first) = selected_state("a.bin");
    let handle = ProgressSimulator::default().spawn(&Handle::current(), state.clone(), first);

    sleep(Duration::from_secs(1)).await;
    assert!(state.get_current().unwrap().progress_percent > 0.0);

    let second = state
        .update_field(|s| s.select(SelectedFile::new(PathBuf::from("b.bin"), 10)))
        .unwrap();
    assert_ne!(first, second);

    sleep(Duration::from_secs(5)).await;
    let snapshot = state.get_current().unwrap();
    assert!(snapshot.is_current(second));
    assert_eq!(snapshot.progress_percent, 0.0);
    assert!(snapshot.is_uploading);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn same_seed_gives_same_run() {
    let (first, first_elapsed) = run_to_completion(Some(42)).await;
    let (second, second_elapsed) = run_to_completion(Some(42)).await;
    assert_eq!(first, second);
    assert_eq!(first_elapsed, second_elapsed);
}
