use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EncodeError;
use crate::fixed_point::{quantize, OverflowPolicy};

/// Number of ROM addresses filled by default.
pub const DEFAULT_SAMPLES: usize = 4096;
/// With `f = 2` the table spans one quarter period, 0..π/2.
pub const DEFAULT_CYCLE_MULTIPLIER: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SineTableConfig {
    pub samples: usize,
    pub cycle_multiplier: u32,
    pub overflow: OverflowPolicy,
}

impl Default for SineTableConfig {
    fn default() -> Self {
        SineTableConfig {
            samples: DEFAULT_SAMPLES,
            cycle_multiplier: DEFAULT_CYCLE_MULTIPLIER,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl SineTableConfig {
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.samples == 0 {
            return Err(EncodeError::EmptyTable);
        }
        Ok(())
    }

    pub fn angle(&self, index: usize) -> f64 {
        0.25 * PI * self.cycle_multiplier as f64 * (index as f64 / self.samples as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub amplitude: f64,
    pub word: i16,
}

#[derive(Debug, Clone)]
pub struct SineTable {
    samples: Vec<Sample>,
}

impl SineTable {
    pub fn generate(config: &SineTableConfig) -> Result<Self, EncodeError> {
        config.validate()?;

        let samples = (0..config.samples)
            .map(|index| -> Result<Sample, EncodeError> {
                let amplitude = config.angle(index).sin();
                let word = quantize(index, amplitude, config.overflow)?;
                Ok(Sample {
                    index,
                    amplitude,
                    word,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            samples = samples.len(),
            cycle_multiplier = config.cycle_multiplier,
            "sine table generated"
        );
        Ok(SineTable { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn words(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().map(|s| s.word)
    }

    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.amplitude)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
