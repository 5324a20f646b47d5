use super::*;
use std::sync::mpsc;
use std::time::Duration;

#[test]
fn executor_runs_spawned_futures() {
    let runtime = AsyncRuntime::new().unwrap();
    let executor = runtime.executor();
    let (tx, rx) = mpsc::channel();

    executor.spawn(Box::pin(async move {
        let _ = tx.send(42u32);
    }));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(42));
}

#[test]
fn executor_supports_timers() {
    let runtime = AsyncRuntime::new().unwrap();
    let executor = TokioExecutor::new(runtime.tokio_handle());
    let (tx, rx) = mpsc::channel();

    executor.spawn(Box::pin(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let _ = tx.send("slept");
    }));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("slept"));
}
