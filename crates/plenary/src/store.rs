use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Party, RollCall};
use crate::period::Period;

/// Read access to one legislative body's parties and votes.
pub trait VoteStore {
    /// Parties in a stable order; the order becomes the run's party index.
    fn parties(&self) -> Result<Vec<Party>>;

    /// Dates of the first and last roll call, or `None` when there are none.
    fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>>;

    /// Roll calls dated within `period`, in date order, with their votes.
    fn roll_calls(&self, period: &Period) -> Result<Vec<RollCall>>;
}

/// Serialized form of a legislative body's voting history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub parties: Vec<Party>,
    #[serde(rename = "rollCalls", alias = "roll_calls", default)]
    pub roll_calls: Vec<RollCall>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    parties: Vec<Party>,
    roll_calls: Vec<RollCall>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        let Dataset {
            parties,
            mut roll_calls,
        } = dataset;
        roll_calls.sort_by_key(|rc| rc.date);
        Self {
            parties,
            roll_calls,
        }
    }
}

impl From<Dataset> for MemoryStore {
    fn from(value: Dataset) -> Self {
        Self::new(value)
    }
}

impl VoteStore for MemoryStore {
    fn parties(&self) -> Result<Vec<Party>> {
        Ok(self.parties.clone())
    }

    fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        Ok(self
            .roll_calls
            .first()
            .zip(self.roll_calls.last())
            .map(|(a, b)| (a.date, b.date)))
    }

    fn roll_calls(&self, period: &Period) -> Result<Vec<RollCall>> {
        Ok(self
            .roll_calls
            .iter()
            .filter(|rc| period.contains(rc.date))
            .cloned()
            .collect())
    }
}
