use crate::context::CpuContext;
use crate::device::Backend;
use crate::error::ClipError;
use crate::kernels::{dispatch, KernelArgs};
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;
use crate::types::DType;

fn run(args: &KernelArgs<'_>, out_dtype: DType) -> Result<DenseTensor, ClipError> {
    let ctx = CpuContext::new();
    let mut out = DenseTensor::empty(out_dtype, Backend::Cpu);
    dispatch(&ctx, args, &mut out)?;
    Ok(out)
}

#[test]
fn test_clipmul_valid_bounds() {
    let x = DenseTensor::new(vec![-2.0, 0.5, 3.0, 1.0], vec![2, 2]).unwrap();
    let min = DenseTensor::new(vec![0.0; 4], vec![2, 2]).unwrap();
    let max = DenseTensor::new(vec![1.0, 1.0, 2.0, 1.0], vec![2, 2]).unwrap();
    let args = KernelArgs::new("clipmul")
        .with_tensor(&x)
        .with_tensor(&min)
        .with_tensor(&max);
    let out = run(&args, DType::F32).unwrap();
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out.get_f32_data().unwrap(), vec![0.0, 0.5, 2.0, 1.0]);
}

#[test]
fn test_clipmul_inverted_bounds_branch_order() {
    let x = DenseTensor::new_i64(vec![5, 1, 5], vec![3]).unwrap();
    let min = DenseTensor::new_i64(vec![10, 10, 4], vec![3]).unwrap();
    let max = DenseTensor::new_i64(vec![2, 2, 2], vec![3]).unwrap();
    let args = KernelArgs::new("clipmul")
        .with_tensor(&x)
        .with_tensor(&min)
        .with_tensor(&max);
    let out = run(&args, DType::I64).unwrap();
    assert_eq!(out.get_i64_data().unwrap(), vec![10, 10, 2]);
}

#[test]
fn test_clipmul_length_mismatch() {
    let x = DenseTensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let min = DenseTensor::new(vec![0.0, 0.0], vec![2]).unwrap();
    let max = DenseTensor::new(vec![1.0, 1.0, 1.0], vec![3]).unwrap();
    let args = KernelArgs::new("clipmul")
        .with_tensor(&x)
        .with_tensor(&min)
        .with_tensor(&max);
    assert_eq!(
        run(&args, DType::F32).unwrap_err(),
        ClipError::ShapeMismatch {
            expected: vec![3],
            actual: vec![2],
            operation: "clipmul".to_string(),
        }
    );
}

#[test]
fn test_clip_scalar_bounds_convert_to_element_type() {
    let x = DenseTensor::new_i32(vec![-5, 0, 2, 9], vec![4]).unwrap();
    let args = KernelArgs::new("clip")
        .with_tensor(&x)
        .with_scalar(Scalar::Float(-1.9))
        .with_scalar(Scalar::Float(2.7));
    let out = run(&args, DType::I32).unwrap();
    assert_eq!(out.get_i32_data().unwrap(), vec![-1, 0, 2, 2]);
}

#[test]
fn test_clip_grad_is_strict() {
    let x = DenseTensor::new_f64(vec![0.0, 0.5, 1.0, 2.0], vec![4]).unwrap();
    let g = DenseTensor::new_f64(vec![1.0, 2.0, 3.0, 4.0], vec![4]).unwrap();
    let args = KernelArgs::new("clip_grad")
        .with_tensor(&x)
        .with_tensor(&g)
        .with_scalar(0.0f64)
        .with_scalar(1.0f64);
    let out = run(&args, DType::F64).unwrap();
    assert_eq!(out.get_f64_data().unwrap(), vec![0.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_comparisons() {
    let a = DenseTensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let b = DenseTensor::new(vec![2.0, 2.0, 2.0], vec![3]).unwrap();
    let lt = run(
        &KernelArgs::new("less_than").with_tensor(&a).with_tensor(&b),
        DType::Bool,
    )
    .unwrap();
    assert_eq!(lt.get_bool_data().unwrap(), vec![true, false, false]);

    let p = DenseTensor::new_bool(vec![true, false, false], vec![3]).unwrap();
    let q = DenseTensor::new_bool(vec![true, true, false], vec![3]).unwrap();
    let eq = run(
        &KernelArgs::new("equal").with_tensor(&p).with_tensor(&q),
        DType::Bool,
    )
    .unwrap();
    assert_eq!(eq.get_bool_data().unwrap(), vec![true, false, true]);
}

#[test]
fn test_comparison_output_must_be_bool() {
    let a = DenseTensor::new(vec![1.0], vec![1]).unwrap();
    let err = run(
        &KernelArgs::new("less_than").with_tensor(&a).with_tensor(&a),
        DType::F32,
    )
    .unwrap_err();
    assert!(matches!(err, ClipError::DataTypeMismatch { .. }));
}

#[test]
fn test_full_and_where() {
    let shape = [3usize];
    let zero = run(
        &KernelArgs::new("full")
            .with_shape(&shape)
            .with_scalar(0i32)
            .with_dtype(DType::I64),
        DType::I64,
    )
    .unwrap();
    assert_eq!(zero.get_i64_data().unwrap(), vec![0, 0, 0]);

    let cond = DenseTensor::new_bool(vec![true, false, true], vec![3]).unwrap();
    let x = DenseTensor::new_i64(vec![7, 8, 9], vec![3]).unwrap();
    let out = run(
        &KernelArgs::new("where")
            .with_tensor(&cond)
            .with_tensor(&x)
            .with_tensor(&zero)
            .keyed_by(DType::I64),
        DType::I64,
    )
    .unwrap();
    assert_eq!(out.get_i64_data().unwrap(), vec![7, 0, 9]);
}

#[test]
fn test_input_on_other_backend_is_rejected() {
    let x = DenseTensor::empty(DType::F32, Backend::Xpu);
    let args = KernelArgs::new("clip")
        .with_tensor(&x)
        .with_scalar(0.0f32)
        .with_scalar(1.0f32);
    assert!(matches!(
        run(&args, DType::F32),
        Err(ClipError::DeviceMismatch {
            expected: Backend::Cpu,
            actual: Backend::Xpu,
            ..
        })
    ));
}

#[test]
fn test_missing_argument() {
    let x = DenseTensor::new(vec![1.0], vec![1]).unwrap();
    let args = KernelArgs::new("clip").with_tensor(&x).with_scalar(0.0f32);
    assert!(matches!(
        run(&args, DType::F32),
        Err(ClipError::InvalidArgument { .. })
    ));
}
