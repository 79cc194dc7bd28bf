use serde::{Deserialize, Serialize};

/// Bucketing pass statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Number of input features pushed through the bucketer
    pub features: u64,
    /// Number of sink invocations
    pub pieces_emitted: u64,
    /// Number of times the clipper was invoked
    pub clipped: u64,
    /// Pieces emitted under a cell coarser than the configured level
    pub coarse_fallbacks: u64,
}

impl BucketStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_feature(&mut self) {
        self.features += 1;
    }

    pub fn record_emit(&mut self) {
        self.pieces_emitted += 1;
    }

    pub fn record_clip(&mut self) {
        self.clipped += 1;
    }

    pub fn record_coarse_fallback(&mut self) {
        self.coarse_fallbacks += 1;
    }

    /// Combine statistics from another pass.
    pub fn merge(&mut self, other: &BucketStats) {
        self.features += other.features;
        self.pieces_emitted += other.pieces_emitted;
        self.clipped += other.clipped;
        self.coarse_fallbacks += other.coarse_fallbacks;
    }
}
