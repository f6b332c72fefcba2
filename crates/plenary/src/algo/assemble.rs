use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Party, PeriodLayout};

/// Default numerator of the bubble scale; larger values draw bigger party circles.
pub const DEFAULT_BUBBLE_SCALE: f64 = 4000.0;

/// Aligned layouts of every analysed period plus one size scale shared by all frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalAnalysis {
    pub parties: Vec<Party>,
    pub periods: Vec<PeriodLayout>,
    pub scale: f64,
}

impl TemporalAnalysis {
    /// Display bubble area of a party size, truncated towards zero.
    pub fn bubble_size(&self, size: u32) -> u32 {
        (size as f64 * self.scale) as u32
    }
}

/// `bubble_scale / sqrt(max over periods of sum(size^2))`.
///
/// The busiest period sets the reference so that bubble areas compare across frames.
pub fn size_scale(layouts: &[PeriodLayout], bubble_scale: f64) -> Result<f64> {
    let max = layouts
        .iter()
        .map(PeriodLayout::sum_of_squared_sizes)
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return Err(Error::NoActiveSeats);
    }
    Ok(bubble_scale / max.sqrt())
}

pub fn assemble(
    parties: Vec<Party>,
    periods: Vec<PeriodLayout>,
    bubble_scale: f64,
) -> Result<TemporalAnalysis> {
    let scale = size_scale(&periods, bubble_scale)?;
    Ok(TemporalAnalysis {
        parties,
        periods,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn sized(label: &str, sizes: &[u32]) -> PeriodLayout {
        PeriodLayout::new(label, vec![Point::default(); sizes.len()], sizes.to_vec())
    }

    #[test]
    fn largest_period_sets_the_scale() {
        let layouts = vec![sized("a", &[3, 4]), sized("b", &[6, 8]), sized("c", &[1, 0])];
        let scale = size_scale(&layouts, DEFAULT_BUBBLE_SCALE).unwrap();
        assert!((scale - 400.0).abs() < 1e-12);

        let analysis = assemble(Vec::new(), layouts, DEFAULT_BUBBLE_SCALE).unwrap();
        assert_eq!(analysis.bubble_size(8), 3200);
        assert_eq!(analysis.bubble_size(0), 0);
    }

    #[test]
    fn no_seats_anywhere_is_an_error() {
        let layouts = vec![sized("a", &[0, 0])];
        assert!(matches!(
            size_scale(&layouts, DEFAULT_BUBBLE_SCALE),
            Err(Error::NoActiveSeats)
        ));
        assert!(matches!(size_scale(&[], 1.0), Err(Error::NoActiveSeats)));
    }
}
