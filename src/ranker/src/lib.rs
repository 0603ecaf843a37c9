//! Ranker is library, responsible for ICPC scoreboard
//! It keeps team results, hides submissions made while scoreboard is frozen
//! and reveals them back during scroll.
//!
//! Ranker is pure: it does no IO, command parsing and output formatting
//! belong to its users.


mod board;
pub mod cfg;
mod contest;
mod error;
mod problem;
mod ranking;
mod scroll;
mod submission;
mod team;

pub use board::{Cell, Scoreboard, TeamRow};
pub use cfg::Config;
pub use contest::{Contest, ContestClock, Phase, RankQuery};
pub use error::{Error, Result};
pub use problem::{Disposition, ProblemState};
pub use ranking::{Ranking, RankingEntry};
pub use scroll::{RankChange, Reveal, ScrollReport, Scroller};
pub use submission::{
    Filter, Ledger, ParseProblemIdError, ProblemId, Submission, Time, Verdict, MAX_PROBLEMS,
};
pub use team::{Roster, Team, TeamStats};
