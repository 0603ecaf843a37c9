use crate::{
    board::Cell,
    submission::{Submission, Time},
};
use log::debug;
use serde::Serialize;

/// What happened to submission on its way to problem state
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    /// Submission solved problem
    Solved,
    /// Submission was counted as wrong attempt
    Rejected,
    /// Problem was already solved, so submission changes nothing
    Ignored,
    /// Scoreboard is frozen: submission is queued until scroll
    Hidden,
}

/// State of one problem for one team
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ProblemState {
    solved: bool,
    solve_time: Option<Time>,
    wrong_attempts: u32,
    /// Submissions made while frozen, in arrival order
    pending: Vec<Submission>,
    /// True if problem is solved and this is visible on scoreboard.
    /// Frozen scoreboard still applies submissions to such problems.
    counted: bool,
}

impl ProblemState {
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn solve_time(&self) -> Option<Time> {
        self.solve_time
    }

    pub fn wrong_attempts(&self) -> u32 {
        self.wrong_attempts
    }

    pub fn pending(&self) -> &[Submission] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_counted_pre_freeze(&self) -> bool {
        self.counted
    }

    /// Returns solve time if problem contributes to team score
    pub fn counted_solve_time(&self) -> Option<Time> {
        if self.solved && self.counted {
            self.solve_time
        } else {
            None
        }
    }

    /// Penalty for this problem, if it contributes to team score
    pub fn penalty(&self, per_wrong_attempt: u32) -> Option<u64> {
        self.counted_solve_time().map(|time| {
            u64::from(time) + u64::from(per_wrong_attempt) * u64::from(self.wrong_attempts)
        })
    }

    /// Routes new submission: either applies it or hides it until scroll.
    pub(crate) fn accept(&mut self, submission: Submission, frozen: bool) -> Disposition {
        if frozen && !self.counted {
            debug!(
                "hiding submission to {} at {}",
                submission.problem, submission.time
            );
            self.pending.push(submission);
            return Disposition::Hidden;
        }
        self.apply(&submission)
    }

    fn apply(&mut self, submission: &Submission) -> Disposition {
        if self.solved {
            return Disposition::Ignored;
        }
        if submission.verdict.is_accepted() {
            self.solved = true;
            self.solve_time = Some(submission.time);
            self.counted = true;
            Disposition::Solved
        } else {
            self.wrong_attempts += 1;
            Disposition::Rejected
        }
    }

    /// Marks solved problem as visible on frozen scoreboard
    pub(crate) fn snapshot_for_freeze(&mut self) {
        if self.solved {
            self.counted = true;
        }
    }

    /// Replays all hidden submissions in original order.
    /// Returns number of replayed submissions.
    pub(crate) fn reveal(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        for submission in &pending {
            self.apply(submission);
        }
        pending.len()
    }

    pub fn cell(&self) -> Cell {
        let wrong_attempts = self.wrong_attempts;
        if self.solved && self.counted {
            Cell::Solved { wrong_attempts }
        } else if self.has_pending() {
            Cell::Frozen {
                wrong_attempts,
                hidden: self.pending.len() as u32,
            }
        } else if wrong_attempts > 0 {
            Cell::Failed { wrong_attempts }
        } else {
            Cell::Untouched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{ProblemId, Verdict};

    fn sub(verdict: &str, time: Time) -> Submission {
        Submission {
            problem: ProblemId::from_index(0),
            verdict: Verdict::new(verdict),
            time,
        }
    }

    #[test]
    fn first_accepted_wins() {
        let mut st = ProblemState::default();
        assert_eq!(st.accept(sub("Wrong_Answer", 10), false), Disposition::Rejected);
        assert_eq!(st.accept(sub("Accepted", 30), false), Disposition::Solved);
        assert_eq!(st.accept(sub("Accepted", 40), false), Disposition::Ignored);
        assert_eq!(st.accept(sub("Runtime_Error", 50), false), Disposition::Ignored);
        assert_eq!(st.solve_time(), Some(30));
        assert_eq!(st.wrong_attempts(), 1);
        assert_eq!(st.penalty(20), Some(50));
        assert_eq!(st.cell(), Cell::Solved { wrong_attempts: 1 });
    }

    #[test]
    fn frozen_submissions_are_hidden_until_reveal() {
        let mut st = ProblemState::default();
        st.accept(sub("Wrong_Answer", 10), false);
        assert_eq!(st.accept(sub("Wrong_Answer", 200), true), Disposition::Hidden);
        assert_eq!(st.accept(sub("Accepted", 210), true), Disposition::Hidden);
        assert!(!st.is_solved());
        assert_eq!(st.wrong_attempts(), 1);
        assert_eq!(st.penalty(20), None);
        assert_eq!(
            st.cell(),
            Cell::Frozen {
                wrong_attempts: 1,
                hidden: 2
            }
        );

        assert_eq!(st.reveal(), 2);
        assert!(!st.has_pending());
        assert_eq!(st.solve_time(), Some(210));
        assert_eq!(st.wrong_attempts(), 2);
        assert!(st.is_counted_pre_freeze());
    }

    #[test]
    fn counted_problem_is_not_hidden() {
        let mut st = ProblemState::default();
        st.accept(sub("Accepted", 10), false);
        st.snapshot_for_freeze();
        assert_eq!(st.accept(sub("Wrong_Answer", 200), true), Disposition::Ignored);
        assert!(!st.has_pending());
    }

    #[test]
    fn failed_and_untouched_cells() {
        let mut st = ProblemState::default();
        assert_eq!(st.cell(), Cell::Untouched);
        st.accept(sub("Wrong_Answer", 1), false);
        st.accept(sub("Wrong_Answer", 2), false);
        assert_eq!(st.cell(), Cell::Failed { wrong_attempts: 2 });
    }
}
