//! Tests unitaires pour stream.rs

use super::super::stream::*;

#[test]
fn test_xpu_stream_create_and_sync() {
    let s = XpuStream::new(false);
    assert!(!s.is_non_blocking());
    s.synchronize().expect("Stream synchronize failed");
    let s2 = XpuStream::new(true);
    assert!(s2.is_non_blocking());
    s2.synchronize().expect("Non-blocking stream synchronize failed");
}

#[test]
fn test_stream_records_launch_order() {
    let s = XpuStream::new(false);
    s.record("less_than");
    s.record("equal");
    s.record("select");
    assert_eq!(s.launched_ops(), vec!["less_than", "equal", "select"]);
    s.clear_launch_log();
    assert!(s.launched_ops().is_empty());
}

#[test]
fn test_launch_log_is_bounded() {
    let s = XpuStream::new(false);
    for _ in 0..LAUNCH_LOG_CAPACITY * 4 {
        s.record("clamp");
    }
    s.record("select");
    assert_eq!(s.pending_launches(), LAUNCH_LOG_CAPACITY * 4 + 1);

    s.synchronize().unwrap();
    assert_eq!(s.pending_launches(), 0);
    let log = s.launched_ops();
    assert_eq!(log.len(), LAUNCH_LOG_CAPACITY);
    assert_eq!(log.last(), Some(&"select"));
    assert!(log[..LAUNCH_LOG_CAPACITY - 1].iter().all(|&op| op == "clamp"));
}

#[test]
fn test_synchronize_keeps_history() {
    let s = XpuStream::new(true);
    s.record("constant");
    s.synchronize().unwrap();
    s.record("select");
    assert_eq!(s.pending_launches(), 1);
    assert_eq!(s.launched_ops(), vec!["constant", "select"]);
}
