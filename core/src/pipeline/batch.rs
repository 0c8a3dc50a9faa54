use crate::error::{LvsegError, Result};
use crate::pipeline::locator::SamplePaths;
use crate::pipeline::sample::Sample;
use ndarray::{stack, Array3, ArrayView2, Axis};

/// A stacked minibatch, arrays of shape `(batch, height, width)`
#[derive(Debug, Clone)]
pub struct Batch {
    pub images: Array3<f32>,
    pub inner_masks: Array3<bool>,

    /// Present only when every sample of the batch has an outer mask
    pub outer_masks: Option<Array3<bool>>,

    /// Source files, in batch order
    pub paths: Vec<SamplePaths>,
}

impl Batch {
    /// Stacks samples along a new leading axis
    ///
    /// # Errors
    ///
    /// Returns [`LvsegError::ShapeMismatch`] if the samples do not all have
    /// the same image shape, or if `samples` is empty.
    pub fn from_samples(samples: &[&Sample]) -> Result<Self> {
        let first = samples
            .first()
            .ok_or_else(|| LvsegError::ShapeMismatch("empty batch".to_string()))?;
        let shape = first.shape();

        if let Some(odd) = samples.iter().find(|s| s.shape() != shape) {
            return Err(LvsegError::ShapeMismatch(format!(
                "Batch consisted of samples of different size: {:?} ({}) vs {:?} ({})",
                shape,
                first.paths.dicom.display(),
                odd.shape(),
                odd.paths.dicom.display()
            )));
        }

        let images: Vec<ArrayView2<f32>> = samples.iter().map(|s| s.image.view()).collect();
        let inner: Vec<ArrayView2<bool>> = samples.iter().map(|s| s.inner_mask.view()).collect();
        let outer: Option<Vec<ArrayView2<bool>>> = samples
            .iter()
            .map(|s| s.outer_mask.as_ref().map(|m| m.view()))
            .collect();

        Ok(Self {
            images: stack(Axis(0), &images)?,
            inner_masks: stack(Axis(0), &inner)?,
            outer_masks: outer.map(|views| stack(Axis(0), &views)).transpose()?,
            paths: samples.iter().map(|s| s.paths.clone()).collect(),
        })
    }

    /// Number of samples in the batch
    pub fn len(&self) -> usize {
        self.images.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(batch, height, width)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.images.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::synthetic_sample;

    #[test]
    fn test_stack_samples() {
        let a = synthetic_sample(1, 4, 5, true);
        let b = synthetic_sample(2, 4, 5, true);

        let batch = Batch::from_samples(&[&a, &b]).unwrap();
        assert_eq!(batch.shape(), (2, 4, 5));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.inner_masks.dim(), (2, 4, 5));
        assert_eq!(batch.outer_masks.as_ref().unwrap().dim(), (2, 4, 5));
        assert_eq!(batch.images[[0, 0, 0]], 1.0);
        assert_eq!(batch.images[[1, 3, 4]], 2.0);
        assert!(!batch.inner_masks[[0, 1, 1]]);
        assert!(batch.inner_masks[[1, 1, 1]]);
        assert_eq!(batch.paths[1].slice, 2);
    }

    #[test]
    fn test_outer_masks_require_every_sample() {
        let a = synthetic_sample(1, 4, 4, true);
        let b = synthetic_sample(2, 4, 4, false);

        let batch = Batch::from_samples(&[&a, &b]).unwrap();
        assert!(batch.outer_masks.is_none());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = synthetic_sample(1, 4, 4, false);
        let b = synthetic_sample(2, 4, 6, false);

        assert!(matches!(
            Batch::from_samples(&[&a, &b]),
            Err(LvsegError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_empty_batch() {
        assert!(Batch::from_samples(&[]).is_err());
    }
}
