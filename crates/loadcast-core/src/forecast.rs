//! Forecasting backends behind a common trait seam.
//!
//! The pipeline only depends on the [`Forecaster`] / [`FittedForecast`] pair,
//! so backends can be swapped without touching the batch driver. The default
//! backend delegates model selection and fitting to the `augurs` ETS
//! implementation (the Rust replacement for Prophet-style trend forecasting);
//! a deterministic naive baseline is provided for comparison runs and tests.
//!
//! Predictions for the future horizon are generated at a fixed 30-second
//! cadence starting one step after the training data's end, regardless of how
//! the source data was sampled. Downstream comparison against validation
//! actuals is by index position, not timestamp.

use augurs::ets::AutoETS;
use augurs::prelude::*;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::{LoadcastError, Result};
use crate::series::Sample;

/// Sampling cadence of generated future predictions, in seconds.
pub const FORECAST_CADENCE_SECS: i64 = 30;

/// Minimum training window for the ETS backend; AutoETS refuses to fit fewer
/// points. Shorter windows fall back to the naive baseline.
pub const ETS_MIN_TRAINING_SAMPLES: usize = 7;

/// A fitted model's output: predicted samples covering the full in-sample
/// range plus the requested future horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// Predicted samples: in-sample fitted values followed by the future
    /// horizon at the fixed cadence.
    pub samples: Vec<Sample>,
    /// The number of trailing samples that lie beyond the training data.
    pub horizon: usize,
}

impl Forecast {
    /// Returns the last `horizon` predicted values.
    pub fn horizon_values(&self) -> Vec<f64> {
        self.samples[self.samples.len() - self.horizon..]
            .iter()
            .map(|s| s.value)
            .collect()
    }

    /// Returns the number of in-sample predicted samples.
    pub fn in_sample_len(&self) -> usize {
        self.samples.len() - self.horizon
    }
}

/// A forecasting backend that can be fitted to a training split.
pub trait Forecaster {
    /// A short stable identifier for the backend ("ets", "naive").
    fn name(&self) -> &'static str;

    /// Fits the backend on the training samples only.
    ///
    /// The validation split is never visible to this call.
    fn fit(&self, training: &[Sample]) -> Result<Box<dyn FittedForecast>>;
}

/// A model fitted on one workload's training split.
pub trait FittedForecast: std::fmt::Debug {
    /// Produces a forecast for `horizon` future steps plus the in-sample
    /// range.
    fn predict(&self, horizon: usize) -> Result<Forecast>;
}

/// Generates `horizon` timestamps at the fixed cadence after `last`.
fn future_timestamps(last: DateTime<Utc>, horizon: usize) -> impl Iterator<Item = DateTime<Utc>> {
    (1..=horizon as i64).map(move |step| last + Duration::seconds(FORECAST_CADENCE_SECS * step))
}

/// The default backend: automatic exponential-smoothing model selection via
/// `augurs`.
///
/// Non-seasonal ETS covers level and trend decomposition; the 30-second CPU
/// series this pipeline consumes carry no known season length. Training
/// windows shorter than [`ETS_MIN_TRAINING_SAMPLES`] are handed to the naive
/// baseline instead of surfacing an opaque backend error, so short workloads
/// still produce a forecast and a report row.
#[derive(Debug, Clone, Copy, Default)]
pub struct EtsForecaster;

impl Forecaster for EtsForecaster {
    fn name(&self) -> &'static str {
        "ets"
    }

    fn fit(&self, training: &[Sample]) -> Result<Box<dyn FittedForecast>> {
        if training.len() < ETS_MIN_TRAINING_SAMPLES {
            debug!(
                len = training.len(),
                min = ETS_MIN_TRAINING_SAMPLES,
                "training window too short for ETS, using naive baseline"
            );
            return NaiveForecaster.fit(training);
        }

        let values: Vec<f64> = training.iter().map(|s| s.value).collect();
        let ets = AutoETS::non_seasonal();
        let model = ets.fit(&values).map_err(|e| LoadcastError::Forecast {
            message: format!("ETS fit error: {e}"),
        })?;
        let in_sample = model
            .predict_in_sample(None)
            .map_err(|e| LoadcastError::Forecast {
                message: format!("ETS in-sample predict error: {e}"),
            })?
            .point;

        Ok(Box::new(FittedEts {
            model,
            train_timestamps: training.iter().map(|s| s.timestamp).collect(),
            in_sample,
        }))
    }
}

impl<M> std::fmt::Debug for FittedEts<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedEts")
            .field("train_timestamps", &self.train_timestamps)
            .field("in_sample", &self.in_sample)
            .finish_non_exhaustive()
    }
}

struct FittedEts<M> {
    model: M,
    train_timestamps: Vec<DateTime<Utc>>,
    in_sample: Vec<f64>,
}

impl<M: Predict> FittedForecast for FittedEts<M> {
    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let future = self
            .model
            .predict(horizon, None)
            .map_err(|e| LoadcastError::Forecast {
                message: format!("ETS predict error: {e}"),
            })?
            .point;

        let last = self
            .train_timestamps
            .last()
            .copied()
            .ok_or_else(|| LoadcastError::Forecast {
                message: "empty training window".to_string(),
            })?;

        // In-sample output can be shorter than the training series; align it
        // to the tail of the training timestamps.
        let offset = self.train_timestamps.len().saturating_sub(self.in_sample.len());
        let mut samples: Vec<Sample> = self.train_timestamps[offset..]
            .iter()
            .zip(&self.in_sample)
            .map(|(&ts, &value)| Sample::new(ts, value))
            .collect();
        samples.extend(
            future_timestamps(last, horizon)
                .zip(&future)
                .map(|(ts, &value)| Sample::new(ts, value)),
        );

        Ok(Forecast {
            samples,
            horizon: future.len(),
        })
    }
}

/// Last-observation-carried-forward baseline.
///
/// In-sample predictions lag the observations by one step; every future step
/// repeats the last training value. Deterministic, so tests build on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveForecaster;

impl Forecaster for NaiveForecaster {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn fit(&self, training: &[Sample]) -> Result<Box<dyn FittedForecast>> {
        if training.is_empty() {
            return Err(LoadcastError::InsufficientData { len: 0, min: 1 });
        }
        Ok(Box::new(FittedNaive {
            training: training.to_vec(),
        }))
    }
}

#[derive(Debug)]
struct FittedNaive {
    training: Vec<Sample>,
}

impl FittedForecast for FittedNaive {
    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self
            .training
            .last()
            .copied()
            .ok_or_else(|| LoadcastError::Forecast {
                message: "empty training window".to_string(),
            })?;

        let mut samples: Vec<Sample> = self
            .training
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let value = if i == 0 {
                    s.value
                } else {
                    self.training[i - 1].value
                };
                Sample::new(s.timestamp, value)
            })
            .collect();
        samples.extend(future_timestamps(last.timestamp, horizon).map(|ts| Sample::new(ts, last.value)));

        Ok(Forecast { samples, horizon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn training(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Sample::new(
                    Utc.timestamp_opt(1_700_000_000 + i as i64 * 30, 0).unwrap(),
                    v,
                )
            })
            .collect()
    }

    #[test]
    fn test_naive_constant_series() {
        let train = training(&[5.0; 6]);
        let fitted = NaiveForecaster.fit(&train).unwrap();
        let forecast = fitted.predict(2).unwrap();

        assert_eq!(forecast.horizon, 2);
        assert_eq!(forecast.horizon_values(), vec![5.0, 5.0]);
        assert_eq!(forecast.in_sample_len(), 6);
        assert!(forecast.samples.iter().all(|s| s.value == 5.0));
    }

    #[test]
    fn test_naive_future_cadence() {
        let train = training(&[1.0, 2.0, 3.0]);
        let fitted = NaiveForecaster.fit(&train).unwrap();
        let forecast = fitted.predict(3).unwrap();

        let last_train_ts = train[2].timestamp;
        let future = &forecast.samples[forecast.in_sample_len()..];
        for (i, sample) in future.iter().enumerate() {
            let expected = last_train_ts + Duration::seconds(FORECAST_CADENCE_SECS * (i as i64 + 1));
            assert_eq!(sample.timestamp, expected);
            assert_eq!(sample.value, 3.0);
        }
    }

    #[test]
    fn test_naive_in_sample_lags_by_one() {
        let train = training(&[1.0, 2.0, 3.0, 4.0]);
        let fitted = NaiveForecaster.fit(&train).unwrap();
        let forecast = fitted.predict(1).unwrap();

        let in_sample: Vec<f64> = forecast.samples[..forecast.in_sample_len()]
            .iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(in_sample, vec![1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_naive_rejects_empty_training() {
        let err = NaiveForecaster.fit(&[]).unwrap_err();
        assert!(matches!(err, LoadcastError::InsufficientData { len: 0, .. }));
    }

    #[test]
    fn test_ets_falls_back_to_naive_for_short_windows() {
        // Six training samples is below the ETS minimum; the backend must
        // still produce a forecast, via the last-value baseline.
        let train = training(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let fitted = EtsForecaster.fit(&train).unwrap();
        let forecast = fitted.predict(2).unwrap();

        assert_eq!(forecast.horizon, 2);
        assert_eq!(forecast.horizon_values(), vec![6.0, 6.0]);
    }

    #[test]
    fn test_ets_fits_at_minimum_window() {
        let values: Vec<f64> = (0..ETS_MIN_TRAINING_SAMPLES as i64)
            .map(|i| 10.0 + i as f64)
            .collect();
        let train = training(&values);
        let fitted = EtsForecaster.fit(&train).unwrap();
        let forecast = fitted.predict(2).unwrap();

        assert_eq!(forecast.horizon, 2);
        assert!(forecast.horizon_values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_ets_rejects_empty_training() {
        let err = EtsForecaster.fit(&[]).unwrap_err();
        assert!(matches!(err, LoadcastError::InsufficientData { len: 0, .. }));
    }

    #[test]
    fn test_ets_forecast_basic() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.5).collect();
        let train = training(&values);
        let fitted = EtsForecaster.fit(&train).unwrap();
        let forecast = fitted.predict(7).unwrap();

        assert_eq!(forecast.horizon, 7);
        assert_eq!(forecast.horizon_values().len(), 7);
        assert!(forecast.in_sample_len() > 0);
        assert!(forecast
            .horizon_values()
            .iter()
            .all(|v| v.is_finite()));

        let last_train_ts = train[29].timestamp;
        let first_future = forecast.samples[forecast.in_sample_len()].timestamp;
        assert_eq!(
            first_future,
            last_train_ts + Duration::seconds(FORECAST_CADENCE_SECS)
        );
    }
}
