use crate::error::{LvsegError, Result};
use crate::types::ContourSelection;

/// What the dataset does with a sample that fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadPolicy {
    /// Log the failure and move on to the next sample
    #[default]
    SkipInvalid,
    /// Abort loading on the first failure
    FailFast,
}

/// Configuration for the batching data loader
///
/// # Example
///
/// ```
/// use lvseg_core::{ContourSelection, LoaderConfig};
///
/// let config = LoaderConfig::new(8)
///     .unwrap()
///     .with_seed(42)
///     .with_contours(ContourSelection::InnerAndOuter);
///
/// assert_eq!(config.batch_size, 8);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.drop_last);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct LoaderConfig {
    /// Number of samples per batch
    pub batch_size: usize,

    /// Seed for the epoch shuffles. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Drop the trailing incomplete batch of every epoch
    pub drop_last: bool,

    /// Which contours each sample must carry
    pub contours: ContourSelection,

    /// Handling of samples that fail to load
    pub load_policy: LoadPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8,
            seed: None,
            drop_last: true,
            contours: ContourSelection::InnerOnly,
            load_policy: LoadPolicy::SkipInvalid,
        }
    }
}

impl LoaderConfig {
    /// Creates a config with the given batch size and defaults otherwise
    ///
    /// # Errors
    ///
    /// Returns [`LvsegError::InvalidConfig`] if `batch_size` is zero.
    pub fn new(batch_size: usize) -> Result<Self> {
        Self::default().with_batch_size(batch_size)
    }

    /// Builder: Set batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(LvsegError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    /// Builder: Set shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: Drop or keep the trailing incomplete batch
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Builder: Set contour selection
    pub fn with_contours(mut self, contours: ContourSelection) -> Self {
        self.contours = contours;
        self
    }

    /// Builder: Set load policy
    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = policy;
        self
    }

    /// Checks a config built by hand rather than through the builders
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(LvsegError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
