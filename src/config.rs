//! Aligner tuning knobs, split out from the orchestrator the way the
//! teacher keeps its process-wide settings in one small config struct
//! rather than threading individual arguments everywhere.

/// Affine gap-penalty and thread-count configuration for one search run.
///
/// `gap_open`/`gap_extend`/`mismatch_penalty` are plain mismatch/gap costs
/// (not scores): higher means worse. `gap_open` is charged once per gap,
/// `gap_extend` once per gap column including the first.
#[derive(Copy, Clone, Debug)]
pub struct AlignerConfig {
    pub mismatch_penalty: u8,
    pub gap_open: u8,
    pub gap_extend: u8,
    pub threads: usize,
}

impl AlignerConfig {
    /// `gap_open + gap_extend`, the cost charged to open a one-column gap
    /// (`QR` in the one-cell kernel).
    #[inline]
    pub fn gap_open_extend(&self) -> u16 {
        self.gap_open as u16 + self.gap_extend as u16
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            mismatch_penalty: 1,
            gap_open: 12,
            gap_extend: 4,
            threads: num_cpus::get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_open_extend_sums_both_penalties() {
        let cfg = AlignerConfig {
            mismatch_penalty: 1,
            gap_open: 12,
            gap_extend: 4,
            threads: 1,
        };
        assert_eq!(cfg.gap_open_extend(), 16);
    }

    #[test]
    fn default_picks_up_available_parallelism() {
        let cfg = AlignerConfig::default();
        assert!(cfg.threads >= 1);
    }
}
