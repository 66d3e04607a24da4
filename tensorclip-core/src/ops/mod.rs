//! # Tensor Operations Module (`ops`)
//!
//! User-facing entry points. Each function creates an unallocated output on
//! the context's backend and dispatches the matching kernel through the
//! global registry.
//!
//! - [`clip`]: forward clip (scalar or per-element bounds) and the two
//!   gradient flavours.
//! - [`elementwise`]: the primitives the composed gradient is built from.
//! - [`traits`]: element-type traits shared by every kernel.

pub mod clip;
pub mod elementwise;
pub mod traits;

pub use clip::{clip, clip_grad, clip_mul, clip_mul_grad};
pub use elementwise::{equal_op, full, lt_op, where_op};
