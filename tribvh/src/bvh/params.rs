/// Knobs of the hierarchy builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildParams {
    /// Nodes at this depth (root = 0) are never split, so no node ever ends
    /// up deeper than this.
    pub max_depth: u32,

    /// Number of evenly spaced candidate planes tested per axis.
    pub split_samples: u32,
}

impl BuildParams {
    pub const DEFAULT_MAX_DEPTH: u32 = 32;
    pub const DEFAULT_SPLIT_SAMPLES: u32 = 5;

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_split_samples(mut self, split_samples: u32) -> Self {
        self.split_samples = split_samples;
        self
    }
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            split_samples: Self::DEFAULT_SPLIT_SAMPLES,
        }
    }
}
