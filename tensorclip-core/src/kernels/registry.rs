//! Kernel registration table and dispatcher.
//!
//! Kernels are plain function pointers keyed by
//! `(name, backend, layout, dtype)`. The table is built once, on first use,
//! and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info, trace};
use once_cell::sync::OnceCell;

use crate::context::DeviceContext;
use crate::device::{Backend, DataLayout};
use crate::error::ClipError;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// Signature every registered kernel has.
pub type KernelFn =
    fn(&dyn DeviceContext, &KernelArgs<'_>, &mut DenseTensor) -> Result<(), ClipError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelKey {
    pub name: String,
    pub backend: Backend,
    pub layout: DataLayout,
    pub dtype: DType,
}

impl KernelKey {
    pub fn new(name: &str, backend: Backend, layout: DataLayout, dtype: DType) -> Self {
        KernelKey {
            name: name.to_string(),
            backend,
            layout,
            dtype,
        }
    }
}

impl fmt::Display for KernelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{:?}/{:?}/{:?}",
            self.name, self.backend, self.layout, self.dtype
        )
    }
}

/// One positional argument of a kernel call.
#[derive(Debug, Clone, Copy)]
pub enum KernelInput<'a> {
    Tensor(&'a DenseTensor),
    Scalar(Scalar),
    Shape(&'a [usize]),
    DType(DType),
}

/// Ordered kernel arguments, plus the operation name used in error messages.
#[derive(Debug, Clone)]
pub struct KernelArgs<'a> {
    op: &'static str,
    inputs: Vec<KernelInput<'a>>,
    key_dtype: Option<DType>,
}

impl<'a> KernelArgs<'a> {
    pub fn new(op: &'static str) -> Self {
        KernelArgs {
            op,
            inputs: Vec::new(),
            key_dtype: None,
        }
    }

    pub fn with_tensor(mut self, tensor: &'a DenseTensor) -> Self {
        self.inputs.push(KernelInput::Tensor(tensor));
        self
    }

    pub fn with_scalar(mut self, value: impl Into<Scalar>) -> Self {
        self.inputs.push(KernelInput::Scalar(value.into()));
        self
    }

    pub fn with_shape(mut self, shape: &'a [usize]) -> Self {
        self.inputs.push(KernelInput::Shape(shape));
        self
    }

    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.inputs.push(KernelInput::DType(dtype));
        self
    }

    /// Overrides the dtype used to select the kernel.
    pub fn keyed_by(mut self, dtype: DType) -> Self {
        self.key_dtype = Some(dtype);
        self
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The dtype part of the kernel key: an explicit `keyed_by` dtype, else
    /// the first `DType` argument, else the dtype of the first tensor.
    pub fn key_dtype(&self) -> Option<DType> {
        self.key_dtype
            .or_else(|| {
                self.inputs.iter().find_map(|input| match input {
                    KernelInput::DType(dtype) => Some(*dtype),
                    _ => None,
                })
            })
            .or_else(|| {
                self.inputs.iter().find_map(|input| match input {
                    KernelInput::Tensor(t) => Some(t.dtype()),
                    _ => None,
                })
            })
    }

    fn get(&self, index: usize, expected: &str) -> Result<&KernelInput<'a>, ClipError> {
        self.inputs.get(index).ok_or_else(|| ClipError::InvalidArgument {
            operation: self.op.to_string(),
            message: format!(
                "missing {} argument at position {} ({} given)",
                expected,
                index,
                self.inputs.len()
            ),
        })
    }

    fn wrong_kind(&self, index: usize, expected: &str, found: &KernelInput<'a>) -> ClipError {
        ClipError::InvalidArgument {
            operation: self.op.to_string(),
            message: format!("argument {} must be a {}, got {:?}", index, expected, found),
        }
    }

    pub fn tensor(&self, index: usize) -> Result<&'a DenseTensor, ClipError> {
        match self.get(index, "tensor")? {
            KernelInput::Tensor(t) => Ok(*t),
            other => Err(self.wrong_kind(index, "tensor", other)),
        }
    }

    pub fn scalar(&self, index: usize) -> Result<Scalar, ClipError> {
        match self.get(index, "scalar")? {
            KernelInput::Scalar(s) => Ok(*s),
            other => Err(self.wrong_kind(index, "scalar", other)),
        }
    }

    pub fn shape(&self, index: usize) -> Result<&'a [usize], ClipError> {
        match self.get(index, "shape")? {
            KernelInput::Shape(s) => Ok(*s),
            other => Err(self.wrong_kind(index, "shape", other)),
        }
    }

    pub fn dtype(&self, index: usize) -> Result<DType, ClipError> {
        match self.get(index, "dtype")? {
            KernelInput::DType(d) => Ok(*d),
            other => Err(self.wrong_kind(index, "dtype", other)),
        }
    }
}

/// Closed table of `KernelKey -> KernelFn`.
#[derive(Default)]
pub struct KernelRegistry {
    kernels: HashMap<KernelKey, KernelFn>,
}

impl fmt::Debug for KernelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.kernels.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("KernelRegistry").field("kernels", &keys).finish()
    }
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in CPU and XPU kernel.
    pub fn with_builtin_kernels() -> Result<Self, ClipError> {
        let mut registry = Self::new();
        super::cpu::register_kernels(&mut registry)?;
        super::xpu::register_kernels(&mut registry)?;
        info!("Kernel registry built with {} kernels", registry.len());
        Ok(registry)
    }

    /// # Errors
    /// `ClipError::DuplicateKernel` if `key` is already taken.
    pub fn register(&mut self, key: KernelKey, kernel: KernelFn) -> Result<(), ClipError> {
        if self.kernels.contains_key(&key) {
            return Err(ClipError::DuplicateKernel(key));
        }
        debug!("Registering kernel {}", key);
        self.kernels.insert(key, kernel);
        Ok(())
    }

    pub fn lookup(&self, key: &KernelKey) -> Result<KernelFn, ClipError> {
        self.kernels
            .get(key)
            .copied()
            .ok_or_else(|| ClipError::KernelNotFound(key.clone()))
    }

    pub fn contains(&self, key: &KernelKey) -> bool {
        self.kernels.contains_key(key)
    }

    /// Registered dtypes of `name` on `backend`, sorted.
    pub fn dtypes_for(&self, name: &str, backend: Backend) -> Vec<DType> {
        let mut dtypes: Vec<DType> = self
            .kernels
            .keys()
            .filter(|key| key.name == name && key.backend == backend)
            .map(|key| key.dtype)
            .collect();
        dtypes.sort();
        dtypes
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Resolves the kernel for `args` on the context's backend and runs it.
    pub fn dispatch(
        &self,
        ctx: &dyn DeviceContext,
        args: &KernelArgs<'_>,
        out: &mut DenseTensor,
    ) -> Result<(), ClipError> {
        let dtype = args.key_dtype().ok_or_else(|| ClipError::InvalidArgument {
            operation: args.op().to_string(),
            message: "cannot infer the kernel dtype from the arguments".to_string(),
        })?;
        let key = KernelKey::new(args.op(), ctx.backend(), DataLayout::All, dtype);
        let kernel = self.lookup(&key)?;
        trace!("Dispatching {}", key);
        kernel(ctx, args, out)
    }
}

static GLOBAL_REGISTRY: OnceCell<KernelRegistry> = OnceCell::new();

/// The process-wide registry of built-in kernels, built on first use.
pub fn global_registry() -> Result<&'static KernelRegistry, ClipError> {
    GLOBAL_REGISTRY.get_or_try_init(KernelRegistry::with_builtin_kernels)
}

/// Dispatches through [`global_registry`].
pub fn dispatch(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    global_registry()?.dispatch(ctx, args, out)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
