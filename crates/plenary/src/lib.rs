#![forbid(unsafe_code)]

//! Temporal party-position analysis of roll-call votes.
//!
//! Votes of each period are aggregated into a party x roll-call matrix, projected onto their
//! first two principal components, and the resulting 2D layouts are rotated/mirrored so that
//! parties move as little as possible from one period to the next.

pub mod algo;
pub mod error;
pub mod model;
pub mod period;
pub mod pipeline;
pub mod store;

pub use algo::{AnalysisOptions, PeriodAnalysis, TemporalAnalysis, Transform, analyse_period};
pub use error::{Error, Result};
pub use model::{Party, PartyIndex, PeriodLayout, Point, RollCall, Vote, VoteOption};
pub use period::{Period, Periodicity};
pub use pipeline::{analyse, analyse_periods};
pub use store::{Dataset, MemoryStore, VoteStore};
