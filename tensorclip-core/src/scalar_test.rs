use super::*;

#[test]
fn test_float_to_int_truncates_and_saturates() {
    assert_eq!(Scalar::Float(2.9).to::<i32>(), 2);
    assert_eq!(Scalar::Float(-2.9).to::<i64>(), -2);
    assert_eq!(Scalar::Float(1e20).to::<i32>(), i32::MAX);
    assert_eq!(Scalar::Float(f64::NAN).to::<i64>(), 0);
}

#[test]
fn test_int_narrowing_saturates() {
    assert_eq!(Scalar::Int(i64::MAX).to::<i32>(), i32::MAX);
    assert_eq!(Scalar::Int(i64::MIN).to::<i32>(), i32::MIN);
    assert_eq!(Scalar::Int(-5).to::<i32>(), -5);
}

#[test]
fn test_to_floats() {
    assert_eq!(Scalar::Int(3).to::<f32>(), 3.0);
    assert_eq!(Scalar::Bool(true).to::<f64>(), 1.0);
    assert_eq!(Scalar::Float(0.5).to::<f16>(), f16::from_f32(0.5));
}

#[test]
fn test_to_bool() {
    assert!(Scalar::Float(0.1).to::<bool>());
    assert!(!Scalar::Int(0).to::<bool>());
}

#[test]
fn test_from_impls() {
    assert_eq!(Scalar::from(1.5f32), Scalar::Float(1.5));
    assert_eq!(Scalar::from(7i32), Scalar::Int(7));
    assert_eq!(Scalar::from(f16::from_f32(2.0)), Scalar::Float(2.0));
    assert_eq!(Scalar::from(false), Scalar::Bool(false));
}
