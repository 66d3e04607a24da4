use tensorclip_core::kernels::KernelFn;
use tensorclip_core::{
    global_registry, Backend, ClipError, DType, DataLayout, KernelKey, KernelRegistry,
};

mod common;

const CPU_NUMERIC: [DType; 4] = [DType::F32, DType::F64, DType::I32, DType::I64];
const XPU_NUMERIC: [DType; 4] = [DType::F32, DType::F16, DType::I32, DType::I64];

fn sorted(mut dtypes: Vec<DType>) -> Vec<DType> {
    dtypes.sort();
    dtypes
}

#[test]
fn test_registration_table() {
    common::setup_logger();
    let registry = global_registry().unwrap();
    let cpu = sorted(CPU_NUMERIC.to_vec());
    let xpu = sorted(XPU_NUMERIC.to_vec());

    for op in ["clip", "clip_grad", "clipmul_grad", "less_than", "full", "where"] {
        assert_eq!(registry.dtypes_for(op, Backend::Cpu), cpu, "{} on CPU", op);
        assert_eq!(registry.dtypes_for(op, Backend::Xpu), xpu, "{} on XPU", op);
    }
    assert_eq!(registry.dtypes_for("clipmul", Backend::Cpu), cpu);
    assert!(registry.dtypes_for("clipmul", Backend::Xpu).is_empty());

    let mut cpu_eq = CPU_NUMERIC.to_vec();
    cpu_eq.push(DType::Bool);
    let mut xpu_eq = XPU_NUMERIC.to_vec();
    xpu_eq.push(DType::Bool);
    assert_eq!(registry.dtypes_for("equal", Backend::Cpu), sorted(cpu_eq));
    assert_eq!(registry.dtypes_for("equal", Backend::Xpu), sorted(xpu_eq));

    // CPU: 8 ops x 4 dtypes + Bool `equal`. XPU: no `clipmul`.
    assert_eq!(registry.len(), 33 + 29);
}

#[test]
fn test_missing_entry_reports_key() {
    let registry = global_registry().unwrap();
    let key = KernelKey::new("clip_grad", Backend::Xpu, DataLayout::All, DType::F64);
    match registry.lookup(&key) {
        Err(ClipError::KernelNotFound(missing)) => assert_eq!(missing, key),
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("clip_grad/Xpu/F64 should not be registered"),
    }
}

#[test]
fn test_builtin_table_rejects_reregistration() {
    let mut registry = KernelRegistry::with_builtin_kernels().unwrap();
    let key = KernelKey::new("clipmul", Backend::Cpu, DataLayout::All, DType::F32);
    let existing: KernelFn = registry.lookup(&key).unwrap();
    assert_eq!(
        registry.register(key.clone(), existing),
        Err(ClipError::DuplicateKernel(key))
    );
}
