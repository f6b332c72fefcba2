use crate::error::{Error, Result};
use crate::model::{PartyIndex, RollCall, VoteOption};
use nalgebra::DMatrix;
use rustc_hash::{FxHashMap, FxHashSet};

/// Per party, per roll call vote counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartyVoteTally {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    pub absent: u32,
}

impl PartyVoteTally {
    pub fn add(&mut self, option: VoteOption) {
        match option {
            VoteOption::Yes => self.yes += 1,
            VoteOption::No => self.no += 1,
            VoteOption::Abstain => self.abstain += 1,
            VoteOption::Absent => self.absent += 1,
        }
    }

    /// Votes actually cast; absences do not count.
    pub fn total(&self) -> u32 {
        self.yes + self.no + self.abstain
    }

    /// `(yes - no) / total`, or `0` when nobody cast a vote.
    pub fn position(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.yes as f64 - self.no as f64) / total as f64
    }
}

/// Matrices for one period. Rows follow the [`PartyIndex`], columns follow the roll-call order.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub votes: DMatrix<f64>,
    pub presence: DMatrix<u32>,
    pub sizes: Vec<u32>,
}

/// Every vote must name a party of the index; checked before any matrix is built.
pub fn validate(parties: &PartyIndex, roll_calls: &[RollCall]) -> Result<()> {
    for rc in roll_calls {
        for v in &rc.votes {
            if parties.get(&v.party).is_none() {
                return Err(Error::UnknownParty {
                    roll_call: rc.id.clone(),
                    party: v.party.clone(),
                });
            }
        }
    }
    Ok(())
}

pub fn aggregate(parties: &PartyIndex, roll_calls: &[RollCall]) -> Result<Aggregation> {
    validate(parties, roll_calls)?;

    let n_parties = parties.len();
    let n_calls = roll_calls.len();
    let mut votes = DMatrix::<f64>::zeros(n_parties, n_calls);
    let mut presence = DMatrix::<u32>::zeros(n_parties, n_calls);
    let mut sizes: Vec<u32> = vec![0; n_parties];

    // Seats already counted towards a party size in this period.
    let mut seats: FxHashSet<(usize, &str)> = FxHashSet::default();

    for (col, rc) in roll_calls.iter().enumerate() {
        let mut tallies: FxHashMap<usize, PartyVoteTally> = FxHashMap::default();
        for v in &rc.votes {
            let Some(row) = parties.get(&v.party) else {
                continue;
            };
            if seats.insert((row, v.legislator.as_str())) {
                sizes[row] += 1;
            }
            tallies.entry(row).or_default().add(v.option);
        }

        for (row, tally) in tallies {
            votes[(row, col)] = tally.position();
            presence[(row, col)] = tally.total();
        }
    }

    Ok(Aggregation {
        votes,
        presence,
        sizes,
    })
}
