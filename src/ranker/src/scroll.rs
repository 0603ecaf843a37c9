//! Scroll: reveals frozen submissions one team-problem at a time,
//! starting from the bottom of scoreboard.

use crate::{
    board::Scoreboard,
    ranking::Ranking,
    submission::ProblemId,
    team::Roster,
};
use log::debug;
use serde::Serialize;

/// Emitted when revealed problem moves team up
#[derive(Debug, Serialize, Clone, Eq, PartialEq)]
pub struct RankChange {
    pub team: String,
    /// Team which now occupies place right below `team`
    pub replaced: String,
    pub solved: u32,
    pub penalty: u64,
    pub old_rank: u32,
    pub new_rank: u32,
}

/// Result of one reveal step
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Reveal {
    pub team: String,
    pub problem: ProblemId,
    pub old_rank: u32,
    pub new_rank: u32,
    pub change: Option<RankChange>,
}

#[derive(Debug, Serialize, Clone, Eq, PartialEq)]
pub struct ScrollReport {
    /// Scoreboard before anything was revealed
    pub before: Scoreboard,
    pub changes: Vec<RankChange>,
    /// Scoreboard with all submissions revealed
    pub after: Scoreboard,
    /// Count of revealed team-problems
    pub steps: usize,
}

/// Performs reveal steps over frozen contest.
#[derive(Debug)]
pub struct Scroller<'a> {
    roster: &'a mut Roster,
    per_wrong_attempt: u32,
    ranking: Ranking,
}

impl<'a> Scroller<'a> {
    pub(crate) fn new(roster: &'a mut Roster, per_wrong_attempt: u32) -> Scroller<'a> {
        let ranking = Ranking::compute(roster, per_wrong_attempt);
        Scroller {
            roster,
            per_wrong_attempt,
            ranking,
        }
    }

    /// Ranking as of last step
    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn into_ranking(self) -> Ranking {
        self.ranking
    }

    /// Worst-ranked team with hidden submissions, and its lowest hidden problem
    fn next_candidate(&self) -> Option<(String, u32, ProblemId)> {
        self.ranking.entries().iter().rev().find_map(|entry| {
            let team = self.roster.get(&entry.team)?;
            let problem = team.first_pending_problem()?;
            Some((entry.team.clone(), entry.rank, problem))
        })
    }

    /// Reveals one team-problem.
    /// Returns None when nothing is hidden anymore.
    pub fn step(&mut self) -> Option<Reveal> {
        let (team, old_rank, problem) = self.next_candidate()?;
        let replayed = self
            .roster
            .get_mut(&team)
            .expect("candidate is taken from roster")
            .reveal(problem);
        debug!(
            "revealed {} submission(s) of team {} on problem {}",
            replayed, team, problem
        );

        self.ranking = Ranking::compute(&*self.roster, self.per_wrong_attempt);
        let entry = self
            .ranking
            .get(&team)
            .expect("ranking contains every team");
        let new_rank = entry.rank;
        let change = if new_rank < old_rank {
            let replaced = self
                .ranking
                .at(new_rank + 1)
                .expect("team moved up, so some team is right below it")
                .team
                .clone();
            debug!(
                "team {} moved from {} to {}, replacing {}",
                team, old_rank, new_rank, replaced
            );
            Some(RankChange {
                team: team.clone(),
                replaced,
                solved: entry.solved,
                penalty: entry.penalty,
                old_rank,
                new_rank,
            })
        } else {
            None
        };
        Some(Reveal {
            team,
            problem,
            old_rank,
            new_rank,
            change,
        })
    }

    /// Reveals everything, collecting rank changes
    pub(crate) fn run(&mut self) -> (Vec<RankChange>, usize) {
        let mut changes = Vec::new();
        let mut steps = 0;
        while let Some(reveal) = self.step() {
            steps += 1;
            changes.extend(reveal.change);
        }
        (changes, steps)
    }

    pub(crate) fn scoreboard(&self, problems: &[ProblemId]) -> Scoreboard {
        Scoreboard::build(&self.ranking, &*self.roster, problems)
    }
}
