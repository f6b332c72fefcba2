pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the party list is empty")]
    NoParties,

    #[error("party {name:?} appears more than once in the party list")]
    DuplicateParty { name: String },

    #[error("the store has no roll calls to analyse")]
    NoRollCalls,

    #[error("no period with roll calls was left to analyse")]
    NoPeriods,

    #[error("roll call {roll_call:?} has a vote for unknown party {party:?}")]
    UnknownParty { roll_call: String, party: String },

    #[error("principal component analysis failed for period {period:?}: {message}")]
    Decomposition { period: String, message: String },

    #[error("layout {period:?} has {found} parties, expected {expected}")]
    LayoutMismatch {
        period: String,
        expected: usize,
        found: usize,
    },

    #[error("period {period:?} shares no active party with {previous:?}; alignment is undefined")]
    NoSharedParties { period: String, previous: String },

    #[error("no party has an active seat in any period; the size scale is undefined")]
    NoActiveSeats,

    #[error("vote store error: {message}")]
    Store { message: String },
}
