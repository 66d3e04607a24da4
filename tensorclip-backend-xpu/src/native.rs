//! Element representations understood by the vendor primitives.

use std::cmp::Ordering;
use std::fmt::Debug;

use bytemuck::{Pod, Zeroable};

/// Types the XPU primitives operate on directly.
pub trait XpuNative: Copy + PartialOrd + Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    fn zero() -> Self;
}

impl XpuNative for f32 {
    const TYPE_NAME: &'static str = "float32";
    fn zero() -> Self {
        0.0
    }
}

impl XpuNative for i32 {
    const TYPE_NAME: &'static str = "int32";
    fn zero() -> Self {
        0
    }
}

impl XpuNative for i64 {
    const TYPE_NAME: &'static str = "int64";
    fn zero() -> Self {
        0
    }
}

impl XpuNative for bool {
    const TYPE_NAME: &'static str = "bool";
    fn zero() -> Self {
        false
    }
}

/// IEEE binary16 value in the device's storage format.
///
/// Layout-compatible with `half::f16`, so host buffers can be reinterpreted
/// in place. Comparisons follow IEEE semantics (`-0 == +0`, NaN unordered).
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct XpuFloat16(pub u16);

impl XpuFloat16 {
    pub fn from_f32(value: f32) -> Self {
        XpuFloat16(half::f16::from_f32(value).to_bits())
    }

    pub fn to_f32(self) -> f32 {
        half::f16::from_bits(self.0).to_f32()
    }
}

impl PartialEq for XpuFloat16 {
    fn eq(&self, other: &Self) -> bool {
        self.to_f32() == other.to_f32()
    }
}

impl PartialOrd for XpuFloat16 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_f32().partial_cmp(&other.to_f32())
    }
}

impl XpuNative for XpuFloat16 {
    const TYPE_NAME: &'static str = "float16";
    fn zero() -> Self {
        XpuFloat16(0)
    }
}
