//! Portable scalar fallback, used on architectures without a dedicated
//! backend and as the reference implementation that every property test
//! checks the `x86` backend against.

use super::Lane;

/// 16 independent `u8` lanes (the 8-bit cell width, 16 channels).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScalarLane8(pub [u8; 16]);

/// 8 independent `u16` lanes (the 16-bit cell width, 8 channels).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScalarLane16(pub [u16; 8]);

impl Lane for ScalarLane8 {
    const CHANNELS: usize = 16;
    const HAS_SHUFFLE: bool = false;
    const MAX: u32 = u8::MAX as u32;
    type Scalar = u8;

    fn splat(v: u8) -> Self {
        Self([v; 16])
    }

    fn zero() -> Self {
        Self::splat(0)
    }

    fn sat_add(self, other: Self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = self.0[i].saturating_add(other.0[i]);
        }
        Self(out)
    }

    fn sat_sub(self, other: Self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = self.0[i].saturating_sub(other.0[i]);
        }
        Self(out)
    }

    fn min(self, other: Self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = self.0[i].min(other.0[i]);
        }
        Self(out)
    }

    fn eq_mask(self, other: Self) -> u32 {
        let mut mask = 0u32;
        for i in 0..16 {
            if self.0[i] == other.0[i] {
                mask |= 1 << i;
            }
        }
        mask
    }

    fn shift_lane_left(self) -> Self {
        let mut out = [0u8; 16];
        out[1..16].copy_from_slice(&self.0[0..15]);
        Self(out)
    }

    fn lane0_selector() -> Self {
        let mut out = [0u8; 16];
        out[0] = u8::MAX;
        Self(out)
    }

    fn swizzle(self, idx: Self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            let j = idx.0[i] as usize;
            out[i] = if j < 16 { self.0[j] } else { 0 };
        }
        Self(out)
    }

    fn to_array(self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_slice(a: &[u8]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(a);
        Self(out)
    }

    fn channel_indices() -> Self {
        let mut out = [0u8; 16];
        for (i, v) in out.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self(out)
    }

    fn scalar_from_u32(v: u32) -> u8 {
        v.min(u8::MAX as u32) as u8
    }
}

impl Lane for ScalarLane16 {
    const CHANNELS: usize = 8;
    const HAS_SHUFFLE: bool = false;
    const MAX: u32 = u16::MAX as u32;
    type Scalar = u16;

    fn splat(v: u16) -> Self {
        Self([v; 8])
    }

    fn zero() -> Self {
        Self::splat(0)
    }

    fn sat_add(self, other: Self) -> Self {
        let mut out = [0u16; 8];
        for i in 0..8 {
            out[i] = self.0[i].saturating_add(other.0[i]);
        }
        Self(out)
    }

    fn sat_sub(self, other: Self) -> Self {
        let mut out = [0u16; 8];
        for i in 0..8 {
            out[i] = self.0[i].saturating_sub(other.0[i]);
        }
        Self(out)
    }

    fn min(self, other: Self) -> Self {
        let mut out = [0u16; 8];
        for i in 0..8 {
            out[i] = self.0[i].min(other.0[i]);
        }
        Self(out)
    }

    fn eq_mask(self, other: Self) -> u32 {
        let mut mask = 0u32;
        for i in 0..8 {
            if self.0[i] == other.0[i] {
                mask |= 1 << i;
            }
        }
        mask
    }

    fn shift_lane_left(self) -> Self {
        let mut out = [0u16; 8];
        out[1..8].copy_from_slice(&self.0[0..7]);
        Self(out)
    }

    fn lane0_selector() -> Self {
        let mut out = [0u16; 8];
        out[0] = u16::MAX;
        Self(out)
    }

    fn swizzle(self, idx: Self) -> Self {
        let mut out = [0u16; 8];
        for i in 0..8 {
            let j = idx.0[i] as usize;
            out[i] = if j < 8 { self.0[j] } else { 0 };
        }
        Self(out)
    }

    fn to_array(self) -> Vec<u16> {
        self.0.to_vec()
    }

    fn from_slice(a: &[u16]) -> Self {
        let mut out = [0u16; 8];
        out.copy_from_slice(a);
        Self(out)
    }

    fn channel_indices() -> Self {
        let mut out = [0u16; 8];
        for (i, v) in out.iter_mut().enumerate() {
            *v = i as u16;
        }
        Self(out)
    }

    fn scalar_from_u32(v: u32) -> u16 {
        v.min(u16::MAX as u32) as u16
    }
}
