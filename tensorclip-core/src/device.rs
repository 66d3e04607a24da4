/// Compute target a kernel runs on.
///
/// Tensors carry the backend their buffer was allocated on; a kernel only
/// accepts tensors from the backend of the context it is invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Main system memory, native loops.
    #[default]
    Cpu,
    /// Accelerator; kernels delegate to the vendor primitives of
    /// `tensorclip_backend_xpu`.
    Xpu,
}

/// Memory layout a kernel is registered for. Clip kernels are layout
/// agnostic, so `All` is the only variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataLayout {
    #[default]
    All,
}
