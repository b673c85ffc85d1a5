//! Ichimoku cloud lines.
//!
//! Midpoint(p) = (highest high(p) + lowest low(p)) / 2, over the trailing
//! window. Five lines:
//! - conversion: midpoint(9)
//! - base: midpoint(26)
//! - leading span A: (conversion + base) / 2, shifted forward `shift` bars
//! - leading span B: midpoint(52), shifted forward `shift` bars
//! - lagging span: close, shifted backward `shift` bars
//!
//! Shifted output stays index-aligned with the input series: a forward
//! shift places the value computed at bar t at index t + shift, a backward
//! shift places close[t + shift] at index t. Shifted-out regions are NaN.
//!
//! The lagging span reads future closes, so no strategy consumes it; it is
//! computed for the report artifacts only.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IchimokuLine {
    Conversion,
    Base,
    LeadingSpanA,
    LeadingSpanB,
    LaggingSpan,
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    conversion_period: usize,
    base_period: usize,
    span_b_period: usize,
    shift: usize,
    line: IchimokuLine,
    name: String,
}

impl Ichimoku {
    pub fn conversion() -> Self {
        Self::make(IchimokuLine::Conversion, "ichimoku_conversion")
    }

    pub fn base() -> Self {
        Self::make(IchimokuLine::Base, "ichimoku_base")
    }

    pub fn leading_span_a() -> Self {
        Self::make(IchimokuLine::LeadingSpanA, "ichimoku_span_a")
    }

    pub fn leading_span_b() -> Self {
        Self::make(IchimokuLine::LeadingSpanB, "ichimoku_span_b")
    }

    pub fn lagging_span() -> Self {
        Self::make(IchimokuLine::LaggingSpan, "ichimoku_lagging")
    }

    fn make(line: IchimokuLine, name: &str) -> Self {
        Self {
            conversion_period: 9,
            base_period: 26,
            span_b_period: 52,
            shift: 26,
            line,
            name: name.to_string(),
        }
    }

    /// (highest high + lowest low) / 2 over the trailing window; NaN until
    /// the window is full or if the window contains a NaN.
    fn midpoint(bars: &[Bar], period: usize) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < period {
            return result;
        }

        for i in (period - 1)..n {
            let window = &bars[i + 1 - period..=i];

            let mut highest = f64::NEG_INFINITY;
            let mut lowest = f64::INFINITY;
            let mut has_nan = false;
            for bar in window {
                if bar.high.is_nan() || bar.low.is_nan() {
                    has_nan = true;
                    break;
                }
                highest = highest.max(bar.high);
                lowest = lowest.min(bar.low);
            }
            if has_nan {
                continue;
            }
            result[i] = (highest + lowest) / 2.0;
        }

        result
    }

    /// Value computed at bar t lands at index t + shift; the first `shift`
    /// indices are NaN, the last `shift` computed values fall off the end.
    fn shift_forward(values: &[f64], shift: usize) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];
        for i in shift..n {
            result[i] = values[i - shift];
        }
        result
    }

    /// Value from bar t + shift lands at index t; the last `shift` indices
    /// are NaN.
    fn shift_backward(values: &[f64], shift: usize) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];
        for i in 0..n.saturating_sub(shift) {
            result[i] = values[i + shift];
        }
        result
    }
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            IchimokuLine::Conversion => self.conversion_period - 1,
            IchimokuLine::Base => self.base_period - 1,
            IchimokuLine::LeadingSpanA => self.base_period - 1 + self.shift,
            IchimokuLine::LeadingSpanB => self.span_b_period - 1 + self.shift,
            IchimokuLine::LaggingSpan => 0,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.line {
            IchimokuLine::Conversion => Self::midpoint(bars, self.conversion_period),
            IchimokuLine::Base => Self::midpoint(bars, self.base_period),
            IchimokuLine::LeadingSpanA => {
                let conversion = Self::midpoint(bars, self.conversion_period);
                let base = Self::midpoint(bars, self.base_period);
                let raw: Vec<f64> = conversion
                    .iter()
                    .zip(base.iter())
                    .map(|(c, b)| {
                        if c.is_nan() || b.is_nan() {
                            f64::NAN
                        } else {
                            (c + b) / 2.0
                        }
                    })
                    .collect();
                Self::shift_forward(&raw, self.shift)
            }
            IchimokuLine::LeadingSpanB => {
                let raw = Self::midpoint(bars, self.span_b_period);
                Self::shift_forward(&raw, self.shift)
            }
            IchimokuLine::LaggingSpan => {
                let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
                Self::shift_backward(&closes, self.shift)
            }
        }
    }
}
