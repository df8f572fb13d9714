// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dispatch_core::MonitorConfig;
use std::time::Duration;

fn fast_config() -> DispatchConfig {
    DispatchConfig::builder()
        .monitor(MonitorConfig {
            start_sla_interval_seconds: 0,
            cooldown_release_interval_seconds: 0,
            payment_timeout_interval_seconds: 0,
            offline_check_interval_seconds: 0,
            ..MonitorConfig::default()
        })
        .build()
}

#[tokio::test]
async fn app_starts_and_shuts_down_cleanly() {
    let app = App::start(fast_config());
    let (assignable, active) = app.core.queue_status(dispatch_core::Region::Dxb);
    assert_eq!(assignable, 0);
    assert_eq!(active, 0);
    app.shutdown().await;
}

#[tokio::test]
async fn wait_for_shutdown_signal_returns_on_cancellation() {
    let cancellation = CancellationToken::new();
    let token = cancellation.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        token.cancel();
    });
    wait_for_shutdown_signal(&cancellation).await;
    assert!(cancellation.is_cancelled());
}
