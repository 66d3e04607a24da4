/// Defines the possible data types for Tensor elements.
///
/// This enum allows the framework to handle tensors with different
/// numerical types dynamically, and is one component of every kernel key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
    /// 16-bit IEEE floating-point type (`half::f16`).
    F16,
    /// 32-bit integer type.
    I32,
    /// 64-bit integer type.
    I64,
    /// Boolean type, produced by comparison kernels.
    Bool,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
            DType::F16 => 2,
            DType::Bool => 1,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DType::F32 | DType::F64 | DType::F16)
    }
}
