use super::super::config::XpuConfig;
use super::super::context::*;
use super::super::error::{XpuBackendError, XPUERR_INJECTED, XPU_SUCCESS};
use super::setup_logger;

#[test]
fn test_initialize_xpu_idempotent() {
    setup_logger();
    // Call multiple times to test idempotency
    let first = initialize_xpu_with_logging();
    let second = initialize_xpu_with_logging();
    match (first, second) {
        (Ok(a), Ok(b)) => {
            assert!(std::ptr::eq(a, b));
            assert!(std::ptr::eq(runtime_config().unwrap(), a));
        }
        // An invalid environment fails every time, never only once.
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("inconsistent initialization results: {:?} / {:?}", a, b),
    }
}

#[test]
fn test_list_devices_with_config() {
    let config = XpuConfig::default().with_device_count(3).with_memory_limit(1024);
    let devices = list_devices_with(&config).unwrap();
    assert_eq!(devices.len(), 3);
    assert_eq!(devices[2].id, 2);
    assert_eq!(devices[2].name, "XPU:2");
    assert_eq!(devices[0].total_memory, Some(1024));
}

#[test]
fn test_list_devices_none() {
    let config = XpuConfig::default().with_device_count(0);
    assert_eq!(list_devices_with(&config), Err(XpuBackendError::NoDevicesFound));
}

#[test]
fn test_context_creation() {
    setup_logger();
    let config = XpuConfig::default().with_memory_limit(512);
    let ctx = XpuContext::new(0, &config).expect("Context creation failed");
    assert_eq!(ctx.device_id(), 0);
    assert_eq!(ctx.allocator().limit(), Some(512));
    assert_eq!(ctx.x_context().device_id(), 0);
    ctx.synchronize().expect("Stream synchronize failed");
}

#[test]
fn test_context_invalid_device() {
    let config = XpuConfig::default();
    let err = XpuContext::new(1, &config).unwrap_err();
    assert_eq!(err, XpuBackendError::InvalidDeviceId(1));
}

#[test]
fn test_fault_injection_and_clear() {
    let ctx = XContext::new(0, super::super::stream::XpuStream::new(false));
    ctx.inject_fault("clip_grad", XPUERR_INJECTED);
    assert_eq!(ctx.launch("clip_grad"), XPUERR_INJECTED);
    // Other ops are unaffected.
    assert_eq!(ctx.launch("equal"), XPU_SUCCESS);
    ctx.clear_faults();
    assert_eq!(ctx.launch("clip_grad"), XPU_SUCCESS);
    // Failed launches never reach the stream.
    assert_eq!(ctx.stream().launched_ops(), vec!["equal", "clip_grad"]);
}
