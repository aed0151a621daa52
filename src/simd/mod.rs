//! The small SIMD capability used by the rest of the aligner.
//!
//! Everything above this module (the profile builder, the one-cell kernel,
//! the channel scheduler) is written once against the [`Lane`] trait and
//! compiles for both cell widths and both backends. No intrinsic or
//! architecture `cfg` leaks past this module.

mod scalar;
mod x86;

pub use scalar::{ScalarLane16, ScalarLane8};
pub use x86::{has_x86_backend, X86Lane16, X86Lane8};

/// A SIMD lane vector wide enough to hold one score per channel, plus the
/// small operation set the aligner needs: saturating add/sub, unsigned min,
/// duplicate-scalar, lane-byte-shuffle, compare-equal-to-bitmask, and a
/// one-lane left shift (used to walk the "restart this channel" bitmask
/// through the vector, see `scheduler.rs`).
pub trait Lane: Copy + Clone {
    /// Number of independent database sequences this lane tracks at once:
    /// 16 for the 8-bit cell width, 8 for the 16-bit cell width.
    const CHANNELS: usize;

    /// Whether this backend can perform a dynamic byte shuffle (`pshufb`/
    /// `tbl1`-style gather). When false, the profile builder always uses
    /// the merge-based generic path.
    const HAS_SHUFFLE: bool;

    /// The saturation ceiling for this cell width (255 for 8-bit, 65535 for
    /// 16-bit); used as the "score saturated" sentinel.
    const MAX: u32;

    /// The scalar type carried in each lane (`u8` or `u16`).
    type Scalar: Copy + Eq + Ord + Into<u32> + std::fmt::Debug;

    fn splat(v: Self::Scalar) -> Self;
    fn zero() -> Self;

    fn sat_add(self, other: Self) -> Self;
    fn sat_sub(self, other: Self) -> Self;
    fn min(self, other: Self) -> Self;

    /// Per-lane equality, packed one bit per channel into the low
    /// `CHANNELS` bits of the result.
    fn eq_mask(self, other: Self) -> u32;

    /// `T = T0 << c`: shifts the active-lane selector used while walking
    /// channels in lane order. Lane 0 holds the selector bit before the
    /// first call; each call moves it one lane to the right (channel 0 ->
    /// channel 1 -> ...).
    fn shift_lane_left(self) -> Self;

    /// The initial value for [`Lane::shift_lane_left`]'s first argument:
    /// all bits set in lane 0, zero elsewhere.
    fn lane0_selector() -> Self;

    /// Dynamic byte shuffle: `result[i] = self[idx[i] as usize]` if
    /// `idx[i] < CHANNELS`, else `0`. Only called when `HAS_SHUFFLE`.
    fn swizzle(self, idx: Self) -> Self;

    fn to_array(self) -> Vec<Self::Scalar>;
    fn from_slice(a: &[Self::Scalar]) -> Self;

    /// Narrows a penalty computed in `u32` (gap-open + gap-extend can
    /// overflow `u8`) down to this lane's scalar width, saturating at
    /// [`Lane::MAX`]. Used by the scheduler to turn [`crate::config::AlignerConfig`]
    /// penalties into splat-able lane values for either cell width.
    fn scalar_from_u32(v: u32) -> Self::Scalar;

    /// Builds a lane vector where channel `c` is `Self::Scalar::try_from(c)`,
    /// used only to materialise a byte-index vector for [`Lane::swizzle`].
    fn channel_indices() -> Self;
}
