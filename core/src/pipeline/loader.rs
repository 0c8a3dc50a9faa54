use crate::error::Result;
use crate::pipeline::batch::Batch;
use crate::pipeline::dataset::Dataset;
use crate::pipeline::locator::SampleLocator;
use crate::pipeline::sample::Sample;
use crate::types::LoaderConfig;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

/// Shuffling minibatch iterator over an in-memory [`Dataset`]
///
/// Every epoch visits each sample once in a fresh random order. When the
/// dataset size is not a multiple of the batch size, the trailing
/// incomplete batch is dropped unless `drop_last` is disabled.
///
/// # Example
///
/// ```no_run
/// use lvseg_core::{DataLoader, LoaderConfig};
///
/// let config = LoaderConfig::new(8).unwrap().with_seed(0);
/// let mut loader = DataLoader::from_base_dir("./final_data", config).unwrap();
///
/// for batch in loader.epoch() {
///     let batch = batch.unwrap();
///     println!("{:?}", batch.shape());
/// }
/// loader.reset(); // start a new epoch with a new order
/// ```
pub struct DataLoader {
    dataset: Dataset,
    config: LoaderConfig,
    order: Vec<usize>,
    pos: usize,
    epoch: usize,
    rng: StdRng,
}

impl DataLoader {
    /// Creates a loader and shuffles for the first epoch
    pub fn new(dataset: Dataset, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut loader = Self {
            order: (0..dataset.len()).collect(),
            dataset,
            config,
            pos: 0,
            epoch: 0,
            rng,
        };
        loader.shuffle();
        Ok(loader)
    }

    /// Locates, loads and wraps every sample of a dataset directory
    pub fn from_base_dir<P: AsRef<Path>>(base_dir: P, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        let paths = SampleLocator::new(base_dir).locate_all(config.contours)?;
        let dataset = Dataset::load(&paths, config.load_policy)?;
        Self::new(dataset, config)
    }

    /// Number of samples in the dataset
    pub fn size(&self) -> usize {
        self.dataset.len()
    }

    /// Number of batches one epoch yields
    pub fn batches_per_epoch(&self) -> usize {
        let full = self.size() / self.config.batch_size;
        if !self.config.drop_last && self.size() % self.config.batch_size != 0 {
            full + 1
        } else {
            full
        }
    }

    /// Zero-based index of the current epoch
    pub fn current_epoch(&self) -> usize {
        self.epoch
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Takes the next minibatch of the current epoch
    ///
    /// Returns `Ok(None)` once the epoch is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LvsegError::ShapeMismatch`] if the samples drawn
    /// for this batch have different image shapes. The cursor still
    /// advances past them.
    pub fn next_batch(&mut self) -> Result<Option<Batch>> {
        let remaining = self.order.len() - self.pos;
        if remaining == 0 {
            return Ok(None);
        }
        if remaining < self.config.batch_size && self.config.drop_last {
            info!("Incomplete batch of {} samples skipped", remaining);
            self.pos = self.order.len();
            return Ok(None);
        }

        let end = (self.pos + self.config.batch_size).min(self.order.len());
        let samples: Vec<&Sample> = self.order[self.pos..end]
            .iter()
            .filter_map(|&idx| self.dataset.get(idx))
            .collect();
        self.pos = end;

        Batch::from_samples(&samples).map(Some)
    }

    /// Starts a new epoch by reshuffling the dataset
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.shuffle();
    }

    /// Iterates over the remaining batches of the current epoch
    pub fn epoch(&mut self) -> Epoch<'_> {
        Epoch { loader: self }
    }

    fn shuffle(&mut self) {
        self.order.shuffle(&mut self.rng);
        self.pos = 0;
        debug!("Epoch {}: shuffled {} samples", self.epoch, self.order.len());
    }
}

/// Batches remaining in the current epoch, see [`DataLoader::epoch`]
pub struct Epoch<'a> {
    loader: &'a mut DataLoader,
}

impl Iterator for Epoch<'_> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.loader.next_batch().transpose()
    }
}
