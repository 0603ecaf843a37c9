use crate::submission::ProblemId;

/// Reasons contest operation can fail.
///
/// Failed operation never changes contest state.
#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("duplicated team name")]
    DuplicateTeam(String),
    #[error("competition has started")]
    ContestAlreadyStarted,
    #[error("competition has not started")]
    ContestNotStarted,
    #[error("competition has ended")]
    ContestEnded,
    #[error("scoreboard has been frozen")]
    AlreadyFrozen,
    #[error("scoreboard has not been frozen")]
    NotFrozen,
    #[error("cannot find the team")]
    UnknownTeam(String),
    #[error("problem {0} is not in the contest")]
    UnknownProblem(ProblemId),
    #[error("problem count must be between 1 and 26, got {0}")]
    InvalidProblemCount(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
