//! Store -> periods -> per-period analysis -> alignment -> assembly.
//!
//! Per-period analyses are independent and may run on rayon (`parallel` feature); alignment is
//! always a strictly ordered fold because every period is turned onto its aligned predecessor.

use crate::algo::align::align_sequence;
use crate::algo::assemble::assemble;
use crate::algo::{AnalysisOptions, PeriodAnalysis, TemporalAnalysis, analyse_period};
use crate::error::{Error, Result};
use crate::model::{PartyIndex, RollCall};
use crate::period::{self, Period};
use crate::store::VoteStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn analyse<S: VoteStore + ?Sized>(store: &S, opts: &AnalysisOptions) -> Result<TemporalAnalysis> {
    let parties = PartyIndex::new(store.parties()?)?;
    let Some((first, last)) = store.date_range()? else {
        return Err(Error::NoRollCalls);
    };

    let periods = period::periods(opts.periodicity, first, last);
    tracing::info!(
        parties = parties.len(),
        periods = periods.len(),
        %first,
        %last,
        periodicity = ?opts.periodicity,
        "starting temporal analysis"
    );

    let mut inputs: Vec<(Period, Vec<RollCall>)> = Vec::with_capacity(periods.len());
    for p in periods {
        let roll_calls = store.roll_calls(&p)?;
        inputs.push((p, roll_calls));
    }
    analyse_periods(parties, inputs, opts)
}

/// Runs the analysis over periods whose roll calls were already fetched.
pub fn analyse_periods(
    parties: PartyIndex,
    inputs: Vec<(Period, Vec<RollCall>)>,
    opts: &AnalysisOptions,
) -> Result<TemporalAnalysis> {
    let inputs: Vec<(Period, Vec<RollCall>)> = if opts.skip_empty_periods {
        inputs
            .into_iter()
            .filter(|(p, rcs)| {
                if rcs.is_empty() {
                    tracing::debug!(period = %p.label, "skipping period without roll calls");
                }
                !rcs.is_empty()
            })
            .collect()
    } else {
        inputs
    };
    if inputs.is_empty() {
        return Err(Error::NoPeriods);
    }

    let analyses = analyse_all(&parties, &inputs)?;
    let layouts = analyses.into_iter().map(|a| a.layout).collect();
    let aligned = align_sequence(layouts)?;
    let analysis = assemble(parties.parties().to_vec(), aligned, opts.bubble_scale)?;

    tracing::info!(
        periods = analysis.periods.len(),
        scale = analysis.scale,
        "temporal analysis finished"
    );
    Ok(analysis)
}

#[cfg(not(feature = "parallel"))]
fn analyse_all(
    parties: &PartyIndex,
    inputs: &[(Period, Vec<RollCall>)],
) -> Result<Vec<PeriodAnalysis>> {
    inputs
        .iter()
        .map(|(p, rcs)| analyse_period(parties, p, rcs))
        .collect()
}

#[cfg(feature = "parallel")]
fn analyse_all(
    parties: &PartyIndex,
    inputs: &[(Period, Vec<RollCall>)],
) -> Result<Vec<PeriodAnalysis>> {
    inputs
        .par_iter()
        .map(|(p, rcs)| analyse_period(parties, p, rcs))
        .collect()
}
