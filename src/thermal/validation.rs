//! Plausibility and threshold checks for temperature readings

use thiserror::Error;

use super::TemperatureReading;
use crate::config::ThermalConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdViolation {
    #[error("Temperature fatal: {reading}°C > {threshold}°C for {name}")]
    Fatal {
        name: String,
        reading: f64,
        threshold: f64,
    },

    #[error("Temperature critical: {reading}°C > {threshold}°C for {name}")]
    Critical {
        name: String,
        reading: f64,
        threshold: f64,
    },

    #[error("Invalid temperature: {reading}°C < {limit}°C for {name}")]
    BelowRange { name: String, reading: f64, limit: f64 },

    #[error("Temperature too high: {reading}°C >= {limit}°C for {name}")]
    AboveRange { name: String, reading: f64, limit: f64 },

    #[error("CPU temp out of norm: {reading}°C > {threshold}°C for {name}")]
    CpuOutOfNorm {
        name: String,
        reading: f64,
        threshold: f64,
    },
}

/// Thresholds of zero are reported by some BMCs for "not configured"
fn configured(threshold: Option<f64>) -> Option<f64> {
    threshold.filter(|t| *t != 0.0)
}

/// Validate one reading.
///
/// Fatal is checked before critical; the plausibility range applies only
/// when neither threshold is exceeded. Readings without a value pass.
pub fn validate_reading(
    reading: &TemperatureReading,
    limits: &ThermalConfig,
) -> Result<(), ThresholdViolation> {
    let Some(value) = reading.celsius else {
        return Ok(());
    };
    let name = reading.name.clone();

    if let Some(fatal) = configured(reading.upper_fatal) {
        if value > fatal {
            return Err(ThresholdViolation::Fatal {
                name,
                reading: value,
                threshold: fatal,
            });
        }
    }
    if let Some(critical) = configured(reading.upper_critical) {
        if value > critical {
            return Err(ThresholdViolation::Critical {
                name,
                reading: value,
                threshold: critical,
            });
        }
    }
    if value < limits.min_celsius {
        return Err(ThresholdViolation::BelowRange {
            name,
            reading: value,
            limit: limits.min_celsius,
        });
    }
    if value >= limits.max_celsius {
        return Err(ThresholdViolation::AboveRange {
            name,
            reading: value,
            limit: limits.max_celsius,
        });
    }
    Ok(())
}

/// First violation across all readings, in order
pub fn validate_all(
    readings: &[TemperatureReading],
    limits: &ThermalConfig,
) -> Result<(), ThresholdViolation> {
    readings
        .iter()
        .try_for_each(|reading| validate_reading(reading, limits))
}

/// The first CPU sensor must read at or below its critical threshold (or
/// the configured default). Returns the CPU reading that was checked.
pub fn check_cpu_norm(
    readings: &[TemperatureReading],
    limits: &ThermalConfig,
) -> Result<Option<f64>, ThresholdViolation> {
    let Some(cpu) = readings.iter().find(|r| r.is_cpu()) else {
        return Ok(None);
    };
    let Some(value) = cpu.celsius else {
        return Ok(None);
    };

    let threshold = configured(cpu.upper_critical).unwrap_or(limits.cpu_default_critical);
    if value > threshold {
        return Err(ThresholdViolation::CpuOutOfNorm {
            name: cpu.name.clone(),
            reading: value,
            threshold,
        });
    }
    Ok(Some(value))
}
