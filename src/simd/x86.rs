//! x86/x86-64 backend (SSE2 register width, SSSE3-class byte shuffle).
//!
//! This is expressed through `core::simd` rather than hand-written
//! intrinsics: `Simd<u8, 16>` and `Simd<u16, 8>` map onto a single `__m128i`
//! register, and [`core::simd::Simd::swizzle_dyn`] lowers to `pshufb` on
//! any x86-64 target with SSSE3 (the baseline for all 64-bit x86 CPUs),
//! giving this backend the shuffle-based profile fill for free. There is
//! no separate non-SSSE3 x86 code path: every x86-64 CPU has SSSE3, so
//! `fill_shuffle` (`profile.rs`) is always available here.

use super::Lane;
use std::simd::cmp::{SimdOrd, SimdPartialEq};
use std::simd::num::SimdUint;
use std::simd::Simd;

/// `true` on `x86`/`x86_64` targets; `false` everywhere else, in which case
/// the orchestrator falls back to the scalar backend (same results, only
/// performance differs).
pub fn has_x86_backend() -> bool {
    cfg!(any(target_arch = "x86", target_arch = "x86_64"))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct X86Lane8(pub Simd<u8, 16>);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct X86Lane16(pub Simd<u16, 8>);

impl Lane for X86Lane8 {
    const CHANNELS: usize = 16;
    const HAS_SHUFFLE: bool = true;
    const MAX: u32 = u8::MAX as u32;
    type Scalar = u8;

    fn splat(v: u8) -> Self {
        Self(Simd::splat(v))
    }

    fn zero() -> Self {
        Self::splat(0)
    }

    fn sat_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    fn sat_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    fn min(self, other: Self) -> Self {
        Self(self.0.simd_min(other.0))
    }

    fn eq_mask(self, other: Self) -> u32 {
        self.0.simd_eq(other.0).to_bitmask() as u32
    }

    fn shift_lane_left(self) -> Self {
        let mut a = self.0.to_array();
        a.rotate_right(1);
        a[0] = 0;
        Self(Simd::from_array(a))
    }

    fn lane0_selector() -> Self {
        let mut a = [0u8; 16];
        a[0] = u8::MAX;
        Self(Simd::from_array(a))
    }

    fn swizzle(self, idx: Self) -> Self {
        Self(self.0.swizzle_dyn(idx.0))
    }

    fn to_array(self) -> Vec<u8> {
        self.0.to_array().to_vec()
    }

    fn from_slice(a: &[u8]) -> Self {
        Self(Simd::from_slice(a))
    }

    fn channel_indices() -> Self {
        let mut a = [0u8; 16];
        for (i, v) in a.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self(Simd::from_array(a))
    }

    fn scalar_from_u32(v: u32) -> u8 {
        v.min(u8::MAX as u32) as u8
    }
}

impl Lane for X86Lane16 {
    const CHANNELS: usize = 8;
    const HAS_SHUFFLE: bool = true;
    const MAX: u32 = u16::MAX as u32;
    type Scalar = u16;

    fn splat(v: u16) -> Self {
        Self(Simd::splat(v))
    }

    fn zero() -> Self {
        Self::splat(0)
    }

    fn sat_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    fn sat_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    fn min(self, other: Self) -> Self {
        Self(self.0.simd_min(other.0))
    }

    fn eq_mask(self, other: Self) -> u32 {
        self.0.simd_eq(other.0).to_bitmask() as u32
    }

    fn shift_lane_left(self) -> Self {
        let mut a = self.0.to_array();
        a.rotate_right(1);
        a[0] = 0;
        Self(Simd::from_array(a))
    }

    fn lane0_selector() -> Self {
        let mut a = [0u16; 8];
        a[0] = u16::MAX;
        Self(Simd::from_array(a))
    }

    fn swizzle(self, idx: Self) -> Self {
        // `swizzle_dyn` needs a byte-element vector; narrow each 16-bit
        // channel to its low byte (channel values here never exceed 4, so
        // no information is lost) and widen back after the shuffle.
        let self_bytes: Simd<u8, 8> = self.0.cast();
        let idx_bytes: Simd<u8, 8> = idx.0.cast();
        let shuffled = self_bytes.swizzle_dyn(idx_bytes);
        Self(shuffled.cast())
    }

    fn to_array(self) -> Vec<u16> {
        self.0.to_array().to_vec()
    }

    fn from_slice(a: &[u16]) -> Self {
        Self(Simd::from_slice(a))
    }

    fn channel_indices() -> Self {
        let mut a = [0u16; 8];
        for (i, v) in a.iter_mut().enumerate() {
            *v = i as u16;
        }
        Self(Simd::from_array(a))
    }

    fn scalar_from_u32(v: u32) -> u16 {
        v.min(u16::MAX as u32) as u16
    }
}
