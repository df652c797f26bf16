//! Value axis scaling for bar charts

use crate::{RecipeError, Result};

/// Tick count used when a chart does not set one
pub const DEFAULT_TICK_COUNT: u32 = 5;

/// Round a maximum up to a "nice" axis limit
///
/// The value is rounded up to a multiple of the largest power of ten not
/// above it, with ten as the smallest step: 4 → 10, 43 → 50, 120 → 200,
/// 999 → 1000.
pub fn nice_max(raw_max: f64) -> f64 {
    let mut place = 10.0;
    while raw_max >= place * 10.0 {
        place *= 10.0;
    }
    (raw_max / place).ceil() * place
}

/// One labelled tick on the value axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTick {
    /// Axis value at the tick
    pub value: f64,
    /// Distance below the top of the axis
    pub offset: f64,
}

/// Value axis of a bar chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    /// Axis maximum, already rounded with [`nice_max`]
    pub max: f64,
    /// Number of ticks including zero and the maximum
    pub tick_count: u32,
}

impl AxisScale {
    /// Build an axis for data whose largest value is `raw_max`
    ///
    /// A tick count below two cannot place both ends of the axis.
    pub fn new(raw_max: f64, tick_count: u32) -> Result<Self> {
        if tick_count < 2 {
            return Err(RecipeError::InvalidInput(format!(
                "a value axis needs at least 2 ticks, got {tick_count}"
            )));
        }
        if !raw_max.is_finite() {
            return Err(RecipeError::InvalidInput(format!(
                "axis maximum must be finite, got {raw_max}"
            )));
        }

        Ok(Self {
            max: nice_max(raw_max),
            tick_count,
        })
    }

    /// Ticks from the maximum (offset 0) down to zero (offset `height`)
    pub fn ticks(&self, height: f64) -> Vec<AxisTick> {
        let intervals = (self.tick_count - 1) as f64;
        (0..self.tick_count)
            .map(|i| {
                let step = i as f64;
                AxisTick {
                    value: self.max - step * self.max / intervals,
                    offset: step * height / intervals,
                }
            })
            .collect()
    }

    /// Height of a bar for `value` on an axis `height` tall
    ///
    /// A zero maximum yields zero-height bars rather than dividing by zero.
    pub fn bar_height(&self, value: f64, height: f64) -> f64 {
        if self.max == 0.0 {
            0.0
        } else {
            value / self.max * height
        }
    }
}
