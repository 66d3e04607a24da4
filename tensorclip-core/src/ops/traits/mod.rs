//! Element traits binding Rust types to dtypes and to the XPU's native types.

pub mod numeric;

pub use numeric::{ClipNumeric, Element, XpuElement};
