//! Fast-math helpers: clamped inverse trig, table-based approximate trig,
//! and small scalar utilities.
//!
//! The approximate trig path is a process-wide opt-in. When enabled,
//! `sin`/`cos`/`tan` read from a lookup table built once over `[0, 2*PI)`;
//! the index wraps with a bitmask, so the table size must be a power of two.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::consts;
use crate::error::{MathError, Result};

/// Default trig table resolution (2^20 entries).
pub const DEFAULT_TRIG_RESOLUTION: usize = 0x100000;

static USE_FAST_TRIG: AtomicBool = AtomicBool::new(false);
static TRIG_TABLE: OnceLock<TrigTable> = OnceLock::new();

struct TrigTable {
    size: usize,
    sin: Vec<f32>,
    cos: Vec<f32>,
    tan: Vec<f32>,
}

impl TrigTable {
    fn build(size: usize) -> Self {
        let slice = consts::TWO_PI / size as f32;
        let mut sin = Vec::with_capacity(size);
        let mut cos = Vec::with_capacity(size);
        let mut tan = Vec::with_capacity(size);
        for i in 0..size {
            let rad = i as f32 * slice;
            sin.push(rad.sin());
            cos.push(rad.cos());
            tan.push(rad.tan());
        }
        Self { size, sin, cos, tan }
    }

    #[inline]
    fn index(&self, radians: f32) -> usize {
        // Truncation toward zero, then a two's-complement wrap; negative
        // angles land on the equivalent positive slot.
        ((radians * consts::INV_TWO_PI * self.size as f32) as isize as usize) & (self.size - 1)
    }
}

#[inline]
fn table() -> &'static TrigTable {
    TRIG_TABLE.get_or_init(|| TrigTable::build(DEFAULT_TRIG_RESOLUTION))
}

/// Returns true if the given number is a power of two.
#[inline]
pub fn is_power_of_two(number: usize) -> bool {
    number > 0 && (number & (number - 1)) == 0
}

/// Build the trig lookup table at a non-default resolution.
///
/// Must be called before the table is first used (directly or through the
/// fast-trig toggle); later calls keep the already-built table. The
/// resolution must be a power of two so the lookup index can wrap with a
/// bitmask.
pub fn init_fast_trig(resolution: usize) -> Result<()> {
    if !is_power_of_two(resolution) {
        return Err(MathError::NotPowerOfTwo(resolution));
    }
    TRIG_TABLE.get_or_init(|| TrigTable::build(resolution));
    Ok(())
}

/// Toggle the process-wide approximate-trig dispatch.
///
/// Enabling builds the lookup table on first use.
pub fn use_fast_trig(enabled: bool) {
    USE_FAST_TRIG.store(enabled, Ordering::Relaxed);
}

/// Whether approximate trig dispatch is currently enabled.
pub fn fast_trig_enabled() -> bool {
    USE_FAST_TRIG.load(Ordering::Relaxed)
}

/// Sine; table lookup when fast trig is enabled.
#[inline]
pub fn sin(radians: f32) -> f32 {
    if fast_trig_enabled() {
        let t = table();
        t.sin[t.index(radians)]
    } else {
        radians.sin()
    }
}

/// Cosine; table lookup when fast trig is enabled.
#[inline]
pub fn cos(radians: f32) -> f32 {
    if fast_trig_enabled() {
        let t = table();
        t.cos[t.index(radians)]
    } else {
        radians.cos()
    }
}

/// Tangent; table lookup when fast trig is enabled.
#[inline]
pub fn tan(radians: f32) -> f32 {
    if fast_trig_enabled() {
        let t = table();
        t.tan[t.index(radians)]
    } else {
        radians.tan()
    }
}

/// Arc cosine, clamping out-of-domain inputs to the boundary result
/// (`PI` for values below -1, `0` for values above 1) instead of NaN.
///
/// Callers feed this raw dot products; the clamping is contractual.
#[inline]
pub fn acos(value: f32) -> f32 {
    if value <= -1.0 {
        consts::PI
    } else if value >= 1.0 {
        0.0
    } else {
        value.acos()
    }
}

/// Arc sine with the same boundary clamping as [`acos`]: out-of-domain
/// inputs yield `-HALF_PI`/`HALF_PI`, never NaN.
#[inline]
pub fn asin(value: f32) -> f32 {
    if value <= -1.0 {
        -consts::HALF_PI
    } else if value >= 1.0 {
        consts::HALF_PI
    } else {
        value.asin()
    }
}

/// Inverse square root.
#[inline]
pub fn inv_sqrt(value: f32) -> f32 {
    1.0 / value.sqrt()
}

/// Squares the value.
#[inline]
pub fn sqr(value: f32) -> f32 {
    value * value
}

/// Sign of the value: 1.0, -1.0, or 0.0.
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
