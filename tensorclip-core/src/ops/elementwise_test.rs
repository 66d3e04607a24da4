use super::*;
use crate::context::CpuContext;

#[test]
fn test_lt_and_equal() {
    let ctx = CpuContext::new();
    let a = DenseTensor::new_i32(vec![1, 5, 3], vec![3]).unwrap();
    let b = DenseTensor::new_i32(vec![2, 5, 1], vec![3]).unwrap();
    assert_eq!(
        lt_op(&ctx, &a, &b).unwrap().get_bool_data().unwrap(),
        vec![true, false, false]
    );
    assert_eq!(
        equal_op(&ctx, &a, &b).unwrap().get_bool_data().unwrap(),
        vec![false, true, false]
    );
}

#[test]
fn test_equal_is_exact_for_floats() {
    let ctx = CpuContext::new();
    let a = DenseTensor::new_f64(vec![0.1 + 0.2, -0.0], vec![2]).unwrap();
    let b = DenseTensor::new_f64(vec![0.3, 0.0], vec![2]).unwrap();
    assert_eq!(
        equal_op(&ctx, &a, &b).unwrap().get_bool_data().unwrap(),
        vec![false, true]
    );
}

#[test]
fn test_full_converts_value() {
    let ctx = CpuContext::new();
    let t = full(&ctx, &[2, 1], 2.9f64, DType::I32).unwrap();
    assert_eq!(t.shape(), &[2, 1]);
    assert_eq!(t.get_i32_data().unwrap(), vec![2, 2]);
}

#[test]
fn test_full_bool_is_unsupported() {
    let ctx = CpuContext::new();
    assert_eq!(
        full(&ctx, &[1], true, DType::Bool).unwrap_err(),
        ClipError::UnsupportedDType {
            dtype: DType::Bool,
            operation: "full".to_string(),
        }
    );
}

#[test]
fn test_where_dtype_mismatch() {
    let ctx = CpuContext::new();
    let cond = DenseTensor::new_bool(vec![true], vec![1]).unwrap();
    let x = DenseTensor::new(vec![1.0], vec![1]).unwrap();
    let y = DenseTensor::new_f64(vec![2.0], vec![1]).unwrap();
    assert!(matches!(
        where_op(&ctx, &cond, &x, &y),
        Err(ClipError::DataTypeMismatch { .. })
    ));
}

#[test]
fn test_full_with_overflowing_shape_fails_cleanly() {
    let ctx = CpuContext::new();
    let err = full(&ctx, &[usize::MAX, 2], 0.0f32, DType::F32).unwrap_err();
    assert!(matches!(
        err,
        ClipError::AllocationFailed {
            backend: crate::device::Backend::Cpu,
            requested_bytes: usize::MAX,
            ..
        }
    ));
}
