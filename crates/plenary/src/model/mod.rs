use crate::error::{Error, Result};
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A political grouping. `name` is the join key across periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Electoral number, rendered as `numPartido` by the frontend.
    #[serde(default)]
    pub number: Option<u32>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: None,
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOption {
    #[serde(alias = "sim")]
    Yes,
    #[serde(alias = "nao")]
    No,
    #[serde(alias = "abstencao")]
    Abstain,
    #[serde(alias = "ausente")]
    Absent,
}

/// One legislator's choice on one roll call.
///
/// `party` is the affiliation *at the time of the roll call*, not the legislator's current
/// party: a legislator who switches parties mid-period occupies a seat in both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub legislator: String,
    pub party: String,
    pub option: VoteOption,
}

impl Vote {
    pub fn new(legislator: impl Into<String>, party: impl Into<String>, option: VoteOption) -> Self {
        Self {
            legislator: legislator.into(),
            party: party.into(),
            option,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollCall {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

/// Stable `party name -> row` table, assigned once per analysis run.
///
/// Every matrix row, PCA row and layout entry of a run is addressed by these indices.
#[derive(Debug, Clone)]
pub struct PartyIndex {
    parties: Vec<Party>,
    names: IndexSet<String>,
}

impl PartyIndex {
    pub fn new(parties: Vec<Party>) -> Result<Self> {
        if parties.is_empty() {
            return Err(Error::NoParties);
        }
        let mut names: IndexSet<String> = IndexSet::with_capacity(parties.len());
        for p in &parties {
            if !names.insert(p.name.clone()) {
                return Err(Error::DuplicateParty {
                    name: p.name.clone(),
                });
            }
        }
        Ok(Self { parties, names })
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn party(&self, idx: usize) -> &Party {
        &self.parties[idx]
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `(radius, angle)` about the origin, angle in radians within `[-pi, pi]`.
    pub fn polar(self) -> (f64, f64) {
        (self.x.hypot(self.y), self.y.atan2(self.x))
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A period's 2D party placement, indexed like the run's [`PartyIndex`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodLayout {
    pub label: String,
    pub positions: Vec<Point>,
    pub sizes: Vec<u32>,
}

impl PeriodLayout {
    pub fn new(label: impl Into<String>, positions: Vec<Point>, sizes: Vec<u32>) -> Self {
        Self {
            label: label.into(),
            positions,
            sizes,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// A party is active in a period when it holds at least one seat there.
    pub fn is_active(&self, idx: usize) -> bool {
        self.sizes.get(idx).copied().unwrap_or(0) > 0
    }

    pub fn sum_of_squared_sizes(&self) -> f64 {
        self.sizes
            .iter()
            .map(|&s| {
                let s = s as f64;
                s * s
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_index_keeps_input_order() {
        let idx = PartyIndex::new(vec![Party::new("PT"), Party::new("PSDB"), Party::new("DEM")])
            .expect("index");
        assert_eq!(idx.get("PSDB"), Some(1));
        assert_eq!(idx.get("DEM"), Some(2));
        assert_eq!(idx.get("PV"), None);
        assert_eq!(idx.party(0).name, "PT");
    }

    #[test]
    fn party_index_rejects_empty_and_duplicate_lists() {
        assert!(matches!(PartyIndex::new(Vec::new()), Err(Error::NoParties)));
        let err = PartyIndex::new(vec![Party::new("PT"), Party::new("PT")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateParty { name } if name == "PT"));
    }

    #[test]
    fn vote_option_accepts_portuguese_aliases() {
        let opts: Vec<VoteOption> =
            serde_json::from_str(r#"["sim", "no", "abstencao", "ausente"]"#).expect("parse");
        assert_eq!(
            opts,
            vec![
                VoteOption::Yes,
                VoteOption::No,
                VoteOption::Abstain,
                VoteOption::Absent
            ]
        );
    }

    #[test]
    fn polar_of_axis_points() {
        let (r, a) = Point::new(0.0, 2.0).polar();
        assert!((r - 2.0).abs() < 1e-12);
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
