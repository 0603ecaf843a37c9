use crate::{
    problem::{Disposition, ProblemState},
    submission::{Ledger, ProblemId, Submission, Time},
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub struct Team {
    name: String,
    ledger: Ledger,
    /// Problems without any submission are absent
    problems: BTreeMap<ProblemId, ProblemState>,
}

/// Values team is ranked by
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TeamStats {
    pub solved: u32,
    pub penalty: u64,
    /// Solve times of counted problems, latest first
    pub solve_times: Vec<Time>,
}

impl Team {
    pub(crate) fn new(name: &str) -> Team {
        Team {
            name: name.to_string(),
            ledger: Ledger::default(),
            problems: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn problem(&self, id: ProblemId) -> Option<&ProblemState> {
        self.problems.get(&id)
    }

    pub(crate) fn submit(&mut self, submission: Submission, frozen: bool) -> Disposition {
        self.ledger.record(submission.clone());
        self.problems
            .entry(submission.problem)
            .or_default()
            .accept(submission, frozen)
    }

    pub(crate) fn snapshot_for_freeze(&mut self) {
        for st in self.problems.values_mut() {
            st.snapshot_for_freeze();
        }
    }

    /// Lowest problem that has hidden submissions
    pub fn first_pending_problem(&self) -> Option<ProblemId> {
        self.problems
            .iter()
            .find(|(_, st)| st.has_pending())
            .map(|(&id, _)| id)
    }

    pub fn has_pending(&self) -> bool {
        self.first_pending_problem().is_some()
    }

    pub(crate) fn reveal(&mut self, id: ProblemId) -> usize {
        self.problems.get_mut(&id).map_or(0, ProblemState::reveal)
    }

    pub fn stats(&self, per_wrong_attempt: u32) -> TeamStats {
        let mut stats = TeamStats {
            solved: 0,
            penalty: 0,
            solve_times: Vec::new(),
        };
        for st in self.problems.values() {
            if let (Some(time), Some(penalty)) =
                (st.counted_solve_time(), st.penalty(per_wrong_attempt))
            {
                stats.solved += 1;
                stats.penalty += penalty;
                stats.solve_times.push(time);
            }
        }
        stats.solve_times.sort_unstable_by(|a, b| b.cmp(a));
        stats
    }
}

/// All teams of contest, in registration order, with lookup by name
#[derive(Debug, Default, Clone)]
pub struct Roster {
    teams: Vec<Team>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    /// Adds new team. Returns false if name is already taken.
    pub(crate) fn insert(&mut self, name: &str) -> bool {
        if self.by_name.contains_key(name) {
            return false;
        }
        self.by_name.insert(name.to_string(), self.teams.len());
        self.teams.push(Team::new(name));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.by_name.get(name).map(|&i| &self.teams[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Team> {
        match self.by_name.get(name) {
            Some(&i) => Some(&mut self.teams[i]),
            None => None,
        }
    }

    pub(crate) fn teams_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Verdict;

    fn submit(team: &mut Team, problem: &str, verdict: &str, time: Time, frozen: bool) {
        team.submit(
            Submission {
                problem: problem.parse().unwrap(),
                verdict: Verdict::new(verdict),
                time,
            },
            frozen,
        );
    }

    #[test]
    fn stats_use_counted_problems_only() {
        let mut team = Team::new("t");
        submit(&mut team, "A", "Wrong_Answer", 5, false);
        submit(&mut team, "A", "Accepted", 30, false);
        submit(&mut team, "C", "Accepted", 12, false);
        submit(&mut team, "B", "Accepted", 250, true);
        assert_eq!(
            team.stats(20),
            TeamStats {
                solved: 2,
                penalty: 30 + 20 + 12,
                solve_times: vec![30, 12],
            }
        );
        assert_eq!(team.first_pending_problem(), Some("B".parse().unwrap()));
        assert_eq!(team.ledger().len(), 4);
    }

    #[test]
    fn roster_rejects_duplicates() {
        let mut roster = Roster::default();
        assert!(roster.insert("alpha"));
        assert!(roster.insert("Alpha"));
        assert!(!roster.insert("alpha"));
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("Alpha").map(Team::name), Some("Alpha"));
        assert!(roster.get("beta").is_none());
    }
}
