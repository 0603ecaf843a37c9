//! Ranking calculator
//!
//! Ranking is always computed from scratch: freeze and scroll change
//! team states between calls, so nothing is cached here.

use crate::team::{Roster, Team, TeamStats};
use serde::Serialize;
use std::{cmp::Ordering, collections::HashMap};

#[derive(Debug, Serialize, Clone, Eq, PartialEq)]
pub struct RankingEntry {
    pub team: String,
    /// 1-based; no two teams share a rank
    pub rank: u32,
    pub solved: u32,
    pub penalty: u64,
}

/// Teams in rank order, with lookup by name
#[derive(Debug, Serialize, Clone, Default, Eq, PartialEq)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

/// Better team goes first.
fn compare(a: (&Team, &TeamStats), b: (&Team, &TeamStats)) -> Ordering {
    let (team_a, a) = a;
    let (team_b, b) = b;
    b.solved
        .cmp(&a.solved)
        .then_with(|| a.penalty.cmp(&b.penalty))
        .then_with(|| a.solve_times.cmp(&b.solve_times))
        .then_with(|| team_a.name().cmp(team_b.name()))
}

impl Ranking {
    pub fn compute(roster: &Roster, per_wrong_attempt: u32) -> Ranking {
        let mut rows: Vec<_> = roster
            .iter()
            .map(|team| (team, team.stats(per_wrong_attempt)))
            .collect();
        rows.sort_by(|a, b| compare((a.0, &a.1), (b.0, &b.1)));
        Ranking::from_entries(
            rows.into_iter()
                .map(|(team, stats)| (team.name().to_string(), stats.solved, stats.penalty)),
        )
    }

    /// Ranks teams by name only, as if nobody solved anything
    pub fn alphabetical(roster: &Roster) -> Ranking {
        let mut names: Vec<_> = roster.iter().map(Team::name).collect();
        names.sort_unstable();
        Ranking::from_entries(names.into_iter().map(|name| (name.to_string(), 0, 0)))
    }

    fn from_entries(rows: impl Iterator<Item = (String, u32, u64)>) -> Ranking {
        let mut ranking = Ranking::default();
        for (team, solved, penalty) in rows {
            ranking.push(team, solved, penalty);
        }
        ranking
    }

    /// Places team after all ranked teams
    pub(crate) fn push(&mut self, team: String, solved: u32, penalty: u64) {
        let pos = self.entries.len();
        self.positions.insert(team.clone(), pos);
        self.entries.push(RankingEntry {
            team,
            rank: pos as u32 + 1,
            solved,
            penalty,
        });
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn get(&self, team: &str) -> Option<&RankingEntry> {
        self.positions.get(team).map(|&pos| &self.entries[pos])
    }

    pub fn rank_of(&self, team: &str) -> Option<u32> {
        self.get(team).map(|entry| entry.rank)
    }

    /// Returns entry with given rank
    pub fn at(&self, rank: u32) -> Option<&RankingEntry> {
        let pos = (rank as usize).checked_sub(1)?;
        self.entries.get(pos)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{Submission, Verdict};

    fn roster(names: &[&str]) -> Roster {
        let mut roster = Roster::default();
        for name in names {
            roster.insert(name);
        }
        roster
    }

    fn submit(roster: &mut Roster, team: &str, problem: &str, verdict: &str, time: u32) {
        roster.get_mut(team).unwrap().submit(
            Submission {
                problem: problem.parse().unwrap(),
                verdict: Verdict::new(verdict),
                time,
            },
            false,
        );
    }

    fn order(ranking: &Ranking) -> Vec<&str> {
        ranking.entries().iter().map(|e| e.team.as_str()).collect()
    }

    #[test]
    fn name_breaks_full_tie() {
        let r = Ranking::compute(&roster(&["zeta", "Zeta", "alpha"]), 20);
        assert_eq!(order(&r), ["Zeta", "alpha", "zeta"]);
        assert_eq!(r.rank_of("zeta"), Some(3));
        assert_eq!(r.at(1).unwrap().team, "Zeta");
        assert!(r.at(0).is_none());
        assert!(r.at(4).is_none());
    }

    #[test]
    fn solved_then_penalty() {
        let mut ros = roster(&["a", "b", "c"]);
        submit(&mut ros, "a", "A", "Accepted", 100);
        submit(&mut ros, "b", "A", "Accepted", 10);
        submit(&mut ros, "b", "B", "Accepted", 200);
        submit(&mut ros, "c", "A", "Wrong_Answer", 1);
        submit(&mut ros, "c", "A", "Accepted", 90);
        let r = Ranking::compute(&ros, 20);
        assert_eq!(order(&r), ["b", "a", "c"]);
        assert_eq!(r.get("c").unwrap().penalty, 110);
        assert_eq!(r.get("b").unwrap().solved, 2);
    }

    #[test]
    fn latest_solve_time_breaks_penalty_tie() {
        let mut ros = roster(&["early", "late"]);
        // both have penalty 100, but `late` solved its last problem later
        submit(&mut ros, "early", "A", "Accepted", 50);
        submit(&mut ros, "early", "B", "Accepted", 50);
        submit(&mut ros, "late", "A", "Accepted", 10);
        submit(&mut ros, "late", "B", "Accepted", 90);
        let r = Ranking::compute(&ros, 20);
        assert_eq!(order(&r), ["early", "late"]);
    }

    #[test]
    fn alphabetical_ignores_results() {
        let mut ros = roster(&["b", "c", "a"]);
        submit(&mut ros, "c", "A", "Accepted", 1);
        let r = Ranking::alphabetical(&ros);
        assert_eq!(order(&r), ["a", "b", "c"]);
    }
}
