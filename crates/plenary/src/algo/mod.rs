pub mod aggregate;
pub mod align;
pub mod assemble;
pub mod normalize;
pub mod pca;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{PartyIndex, PeriodLayout, RollCall};
use crate::period::{Period, Periodicity};

pub use aggregate::{Aggregation, PartyVoteTally};
pub use align::Transform;
pub use assemble::{DEFAULT_BUBBLE_SCALE, TemporalAnalysis};
pub use pca::Projection;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub periodicity: Periodicity,
    /// Drop periods without roll calls instead of drawing them at the `(0, 0)` sentinel.
    pub skip_empty_periods: bool,
    /// Numerator of the bubble size scale, see [`assemble::size_scale`].
    pub bubble_scale: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            periodicity: Periodicity::Semester,
            skip_empty_periods: true,
            bubble_scale: DEFAULT_BUBBLE_SCALE,
        }
    }
}

/// Everything computed for one period before alignment.
#[derive(Debug, Clone)]
pub struct PeriodAnalysis {
    pub period: Period,
    pub aggregation: Aggregation,
    pub projection: Projection,
    pub layout: PeriodLayout,
}

/// Aggregates, projects and normalizes one period. Periods are independent at this stage.
pub fn analyse_period(
    parties: &PartyIndex,
    period: &Period,
    roll_calls: &[RollCall],
) -> Result<PeriodAnalysis> {
    let aggregation = aggregate::aggregate(parties, roll_calls)?;
    let projection = pca::project(&aggregation.votes, &aggregation.sizes, &period.label)?;
    let positions = normalize::display_coordinates(&projection.scores, roll_calls.len());

    let explained: Vec<f64> = projection
        .explained_variance_ratio()
        .into_iter()
        .take(2)
        .collect();
    tracing::debug!(
        period = %period.label,
        roll_calls = roll_calls.len(),
        explained = ?explained,
        "projected period"
    );

    let layout = PeriodLayout::new(period.label.clone(), positions, aggregation.sizes.clone());
    Ok(PeriodAnalysis {
        period: period.clone(),
        aggregation,
        projection,
        layout,
    })
}
