use std::fmt::Debug;

use half::f16;
use num_traits::Zero;
use tensorclip_backend_xpu::{XpuFloat16, XpuNative};

use crate::buffer::Buffer;
use crate::scalar::Scalar;
use crate::types::DType;

/// A trait connecting Rust element types to the runtime `DType` system.
///
/// It gives generic kernels typed access to a tensor's [`Buffer`] and lets
/// registration derive the `DType` part of a kernel key from the type the
/// kernel is instantiated with.
pub trait Element: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// The corresponding DType for this Rust type.
    const DTYPE: DType;

    /// Converts a boxed scalar to this type (see [`Scalar`] for the rules).
    fn from_scalar(value: Scalar) -> Self;

    fn slice(buffer: &Buffer) -> Option<&[Self]>;

    fn slice_mut(buffer: &mut Buffer) -> Option<&mut [Self]>;

    fn into_buffer(data: Vec<Self>) -> Buffer;
}

macro_rules! impl_element_buffer {
    ($variant:ident) => {
        fn slice(buffer: &Buffer) -> Option<&[Self]> {
            match buffer {
                Buffer::$variant(data) => Some(data.as_slice()),
                _ => None,
            }
        }

        fn slice_mut(buffer: &mut Buffer) -> Option<&mut [Self]> {
            match buffer {
                Buffer::$variant(data) => Some(data.as_mut_slice()),
                _ => None,
            }
        }

        fn into_buffer(data: Vec<Self>) -> Buffer {
            Buffer::$variant(data)
        }
    };
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
    fn from_scalar(value: Scalar) -> Self {
        value.to_f64() as f32
    }
    impl_element_buffer!(F32);
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
    fn from_scalar(value: Scalar) -> Self {
        value.to_f64()
    }
    impl_element_buffer!(F64);
}

impl Element for f16 {
    const DTYPE: DType = DType::F16;
    fn from_scalar(value: Scalar) -> Self {
        f16::from_f64(value.to_f64())
    }
    impl_element_buffer!(F16);
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Float(v) => v as i32,
            other => other.to_i64().clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        }
    }
    impl_element_buffer!(I32);
}

impl Element for i64 {
    const DTYPE: DType = DType::I64;
    fn from_scalar(value: Scalar) -> Self {
        value.to_i64()
    }
    impl_element_buffer!(I64);
}

impl Element for bool {
    const DTYPE: DType = DType::Bool;
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Float(v) => v != 0.0,
            Scalar::Int(v) => v != 0,
            Scalar::Bool(b) => b,
        }
    }
    impl_element_buffer!(Bool);
}

/// Numeric element types accepted by the clip kernels and `full`.
/// Excludes `bool`, which only appears as a mask.
pub trait ClipNumeric: Element + Zero {}

impl ClipNumeric for f32 {}
impl ClipNumeric for f64 {}
impl ClipNumeric for f16 {}
impl ClipNumeric for i32 {}
impl ClipNumeric for i64 {}

/// Maps a host element type to the representation the XPU primitives use.
///
/// Slices are reinterpreted in place; for `f16` this is a `bytemuck` cast to
/// the layout-compatible `XpuFloat16`.
pub trait XpuElement: Element {
    type Native: XpuNative;

    fn as_native(data: &[Self]) -> &[Self::Native];

    fn as_native_mut(data: &mut [Self]) -> &mut [Self::Native];

    fn to_native(self) -> Self::Native;
}

macro_rules! impl_identity_xpu_element {
    ($($t:ty),+) => {
        $(
            impl XpuElement for $t {
                type Native = $t;

                fn as_native(data: &[Self]) -> &[Self::Native] {
                    data
                }

                fn as_native_mut(data: &mut [Self]) -> &mut [Self::Native] {
                    data
                }

                fn to_native(self) -> Self::Native {
                    self
                }
            }
        )+
    };
}

impl_identity_xpu_element!(f32, i32, i64, bool);

impl XpuElement for f16 {
    type Native = XpuFloat16;

    fn as_native(data: &[Self]) -> &[Self::Native] {
        bytemuck::cast_slice(data)
    }

    fn as_native_mut(data: &mut [Self]) -> &mut [Self::Native] {
        bytemuck::cast_slice_mut(data)
    }

    fn to_native(self) -> Self::Native {
        XpuFloat16(self.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: XpuElement>(values: Vec<T>) -> usize {
        T::as_native(&values).len()
    }

    #[test]
    fn test_dtype_constants() {
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<f16 as Element>::DTYPE, DType::F16);
        assert_eq!(<bool as Element>::DTYPE, DType::Bool);
    }

    #[test]
    fn test_f16_reinterpretation_keeps_values() {
        let host = vec![f16::from_f32(1.5), f16::from_f32(-2.0)];
        let native = <f16 as XpuElement>::as_native(&host);
        assert_eq!(native[0].to_f32(), 1.5);
        assert_eq!(native[1].to_f32(), -2.0);
        assert_eq!(f16::from_f32(0.25).to_native().to_f32(), 0.25);
        assert_eq!(round_trip(vec![1i64, 2, 3]), 3);
    }

    #[test]
    fn test_into_buffer_and_slice() {
        let buffer = <i32 as Element>::into_buffer(vec![1, 2]);
        assert_eq!(<i32 as Element>::slice(&buffer), Some(&[1, 2][..]));
        assert!(<i64 as Element>::slice(&buffer).is_none());
    }
}
