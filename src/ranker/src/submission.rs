//! Submissions and the per-team submission ledger

use serde::Serialize;
use std::{fmt, str::FromStr};

/// Contest-relative time in minutes
pub type Time = u32;

/// Max number of problems in contest: problems are named `A`..=`Z`
pub const MAX_PROBLEMS: u32 = 26;

/// Problem identifier: single uppercase letter.
#[derive(Hash, Ord, PartialOrd, Eq, PartialEq, Debug, Serialize, Copy, Clone)]
#[serde(into = "char")]
pub struct ProblemId(u8);

impl ProblemId {
    /// Creates `ProblemId` from zero-based index (0 is `A`)
    /// # Panics
    /// Will panic if `idx` is not less than `MAX_PROBLEMS`.
    pub fn from_index(idx: u32) -> Self {
        assert!(idx < MAX_PROBLEMS, "problem index {} is out of range", idx);
        Self(idx as u8)
    }

    pub fn to_idx(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }
}

impl From<ProblemId> for char {
    fn from(p: ProblemId) -> char {
        p.letter()
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("`{0}` is not a problem name: expected single uppercase letter")]
pub struct ParseProblemIdError(String);

impl FromStr for ProblemId {
    type Err = ParseProblemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [c @ b'A'..=b'Z'] => Ok(ProblemId(c - b'A')),
            _ => Err(ParseProblemIdError(s.to_string())),
        }
    }
}

/// Judging verdict.
///
/// Any string is accepted, but only `Accepted` has special meaning: everything
/// else counts as wrong attempt.
#[derive(Hash, Eq, PartialEq, Debug, Serialize, Clone)]
#[serde(transparent)]
pub struct Verdict(String);

impl Verdict {
    pub const ACCEPTED: &'static str = "Accepted";

    pub fn new(v: impl Into<String>) -> Self {
        Verdict(v.into())
    }

    pub fn accepted() -> Self {
        Verdict(Self::ACCEPTED.to_string())
    }

    pub fn is_accepted(&self) -> bool {
        self.0 == Self::ACCEPTED
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Verdict {
    fn from(s: &str) -> Self {
        Verdict::new(s)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Clone, Eq, PartialEq)]
pub struct Submission {
    pub problem: ProblemId,
    pub verdict: Verdict,
    pub time: Time,
}

/// Query filter: either matches everything, or only given value
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Filter<T> {
    Any,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::Any => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

/// Append-only list of all submissions made by one team.
///
/// Ledger knows nothing about freezing or solving: every submission accepted
/// by contest is recorded here.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    submissions: Vec<Submission>,
}

impl Ledger {
    pub fn record(&mut self, submission: Submission) {
        self.submissions.push(submission);
    }

    /// Returns latest submission matching both filters
    pub fn last_matching(
        &self,
        problem: &Filter<ProblemId>,
        verdict: &Filter<Verdict>,
    ) -> Option<&Submission> {
        self.submissions
            .iter()
            .rev()
            .find(|sub| problem.matches(&sub.problem) && verdict.matches(&sub.verdict))
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.submissions.iter()
    }
}
