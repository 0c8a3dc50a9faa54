use crate::error::Result;
use crate::pipeline::locator::SamplePaths;
use crate::pipeline::sample::{load_sample, Sample};
use crate::types::LoadPolicy;
use log::{info, warn};

/// All successfully loaded samples, held in memory
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
    skipped: Vec<SamplePaths>,
}

impl Dataset {
    /// Loads every located sample
    ///
    /// With [`LoadPolicy::SkipInvalid`] a sample that fails to load is logged
    /// and recorded in [`Dataset::skipped`]; with [`LoadPolicy::FailFast`]
    /// the first failure is returned.
    pub fn load(paths: &[SamplePaths], policy: LoadPolicy) -> Result<Self> {
        let mut samples = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for sample_paths in paths {
            match load_sample(sample_paths) {
                Ok(sample) => samples.push(sample),
                Err(e) if policy == LoadPolicy::SkipInvalid => {
                    warn!("Skipping {}: {}", sample_paths.dicom.display(), e);
                    skipped.push(sample_paths.clone());
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Loaded {} samples ({} skipped)",
            samples.len(),
            skipped.len()
        );
        Ok(Self { samples, skipped })
    }

    /// Builds a dataset from samples that are already in memory
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            skipped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Samples that failed to load under [`LoadPolicy::SkipInvalid`]
    pub fn skipped(&self) -> &[SamplePaths] {
        &self.skipped
    }

    /// Number of samples carrying an outer mask
    pub fn outer_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.outer_mask.is_some())
            .count()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
