//! Time series data model and the deterministic train/validation split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of a workload's samples used for training; the remainder is the
/// validation split.
pub const TRAIN_RATIO: f64 = 0.75;

/// A single observation in a workload's time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the observation was taken.
    pub timestamp: DateTime<Utc>,
    /// The observed CPU usage.
    pub value: f64,
}

impl Sample {
    /// Creates a new sample.
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// An ordered sequence of samples for one workload.
///
/// Samples are kept in input row order; no reordering, deduplication, or gap
/// handling is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// The samples, in input order.
    pub samples: Vec<Sample>,
}

impl TimeSeries {
    /// Creates a time series from a vector of samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the observed values in order.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Partitions the series at `floor(ratio × len)`.
    ///
    /// The first portion is the training split, the remainder the validation
    /// split. The split is deterministic by index; no shuffling.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use loadcast_core::series::{Sample, TimeSeries, TRAIN_RATIO};
    ///
    /// let samples = (0i64..8)
    ///     .map(|i| Sample::new(Utc.timestamp_opt(i * 30, 0).unwrap(), i as f64))
    ///     .collect();
    /// let split = TimeSeries::new(samples).split(TRAIN_RATIO);
    /// assert_eq!(split.training.len(), 6);
    /// assert_eq!(split.validation.len(), 2);
    /// ```
    pub fn split(&self, ratio: f64) -> TrainValidationSplit {
        let train_len = (self.samples.len() as f64 * ratio) as usize;
        let (training, validation) = self.samples.split_at(train_len);
        TrainValidationSplit {
            training: training.to_vec(),
            validation: validation.to_vec(),
        }
    }
}

impl FromIterator<Sample> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// The result of splitting a [`TimeSeries`] into training and validation
/// portions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainValidationSplit {
    /// The earliest `floor(ratio × len)` samples, used to fit the model.
    pub training: Vec<Sample>,
    /// The remaining samples, used only for accuracy scoring.
    pub validation: Vec<Sample>,
}

impl TrainValidationSplit {
    /// Returns the validation values in order.
    pub fn validation_values(&self) -> Vec<f64> {
        self.validation.iter().map(|s| s.value).collect()
    }
}
