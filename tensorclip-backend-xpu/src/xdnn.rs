//! Vendor elementwise primitives.
//!
//! Every primitive takes the raw vendor context, device slices and an element
//! count `n`, and returns a status code (`XPU_SUCCESS` on success). Only the
//! first `n` elements of each slice are touched; a slice shorter than `n`
//! yields `XPUERR_INVALID_PARAM` before anything is launched.

use log::warn;

use crate::context::XContext;
use crate::error::{XPUERR_INVALID_PARAM, XPU_SUCCESS};
use crate::native::XpuNative;

fn check_len(op: &str, n: usize, lens: &[usize]) -> i32 {
    match lens.iter().find(|&&len| len < n) {
        Some(len) => {
            warn!("xdnn::{}: buffer of {} elements cannot hold n = {}", op, len, n);
            XPUERR_INVALID_PARAM
        }
        None => XPU_SUCCESS,
    }
}

/// Gradient of clip with scalar bounds:
/// `dx[i] = dy[i]` where `min < x[i] < max`, else zero.
pub fn clip_grad<T: XpuNative>(
    ctx: &XContext,
    x: &[T],
    dy: &[T],
    dx: &mut [T],
    n: usize,
    min: T,
    max: T,
) -> i32 {
    let status = check_len("clip_grad", n, &[x.len(), dy.len(), dx.len()]);
    if status != XPU_SUCCESS {
        return status;
    }
    let status = ctx.launch("clip_grad");
    if status != XPU_SUCCESS {
        return status;
    }
    for ((d, &xv), &g) in dx[..n].iter_mut().zip(&x[..n]).zip(&dy[..n]) {
        *d = if xv > min && xv < max { g } else { T::zero() };
    }
    XPU_SUCCESS
}

/// Clamps `x` into `[min, max]`. The lower bound is tested first, so an
/// inverted range yields `min` for values below it.
pub fn clamp<T: XpuNative>(ctx: &XContext, x: &[T], y: &mut [T], n: usize, min: T, max: T) -> i32 {
    let status = check_len("clamp", n, &[x.len(), y.len()]);
    if status != XPU_SUCCESS {
        return status;
    }
    let status = ctx.launch("clamp");
    if status != XPU_SUCCESS {
        return status;
    }
    for (out, &v) in y[..n].iter_mut().zip(&x[..n]) {
        *out = if v < min {
            min
        } else if v > max {
            max
        } else {
            v
        };
    }
    XPU_SUCCESS
}

pub fn less_than<T: XpuNative>(ctx: &XContext, x: &[T], y: &[T], z: &mut [bool], n: usize) -> i32 {
    let status = check_len("less_than", n, &[x.len(), y.len(), z.len()]);
    if status != XPU_SUCCESS {
        return status;
    }
    let status = ctx.launch("less_than");
    if status != XPU_SUCCESS {
        return status;
    }
    for ((out, &a), &b) in z[..n].iter_mut().zip(&x[..n]).zip(&y[..n]) {
        *out = a < b;
    }
    XPU_SUCCESS
}

pub fn equal<T: XpuNative>(ctx: &XContext, x: &[T], y: &[T], z: &mut [bool], n: usize) -> i32 {
    let status = check_len("equal", n, &[x.len(), y.len(), z.len()]);
    if status != XPU_SUCCESS {
        return status;
    }
    let status = ctx.launch("equal");
    if status != XPU_SUCCESS {
        return status;
    }
    for ((out, &a), &b) in z[..n].iter_mut().zip(&x[..n]).zip(&y[..n]) {
        *out = a == b;
    }
    XPU_SUCCESS
}

/// Fills the first `n` elements of `y` with `value`.
pub fn constant<T: XpuNative>(ctx: &XContext, y: &mut [T], n: usize, value: T) -> i32 {
    let status = check_len("constant", n, &[y.len()]);
    if status != XPU_SUCCESS {
        return status;
    }
    let status = ctx.launch("constant");
    if status != XPU_SUCCESS {
        return status;
    }
    y[..n].fill(value);
    XPU_SUCCESS
}

/// `z[i] = if condition[i] { x[i] } else { y[i] }`
pub fn select<T: XpuNative>(
    ctx: &XContext,
    condition: &[bool],
    x: &[T],
    y: &[T],
    z: &mut [T],
    n: usize,
) -> i32 {
    let status = check_len("select", n, &[condition.len(), x.len(), y.len(), z.len()]);
    if status != XPU_SUCCESS {
        return status;
    }
    let status = ctx.launch("select");
    if status != XPU_SUCCESS {
        return status;
    }
    for (i, out) in z[..n].iter_mut().enumerate() {
        *out = if condition[i] { x[i] } else { y[i] };
    }
    XPU_SUCCESS
}
