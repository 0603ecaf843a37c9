use crate::{
    ranking::Ranking,
    submission::ProblemId,
    team::Roster,
};
use serde::Serialize;

/// Represents one cell in scoreboard
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Cell {
    /// Team has no visible submissions for this problem
    Untouched,
    /// Problem is solved
    Solved { wrong_attempts: u32 },
    /// Problem is not solved, and there are no hidden submissions
    Failed { wrong_attempts: u32 },
    /// Some submissions are hidden by freeze
    Frozen {
        /// Wrong attempts made before freeze
        wrong_attempts: u32,
        /// Count of hidden submissions
        hidden: u32,
    },
}

#[derive(Debug, Serialize, Clone, Eq, PartialEq)]
pub struct TeamRow {
    pub team: String,
    pub rank: u32,
    pub solved: u32,
    pub penalty: u64,
    /// One cell per contest problem, in problem order
    pub cells: Vec<Cell>,
}

#[derive(Debug, Serialize, Clone, Default, Eq, PartialEq)]
pub struct Scoreboard {
    pub rows: Vec<TeamRow>,
}

impl Scoreboard {
    pub(crate) fn build(ranking: &Ranking, roster: &Roster, problems: &[ProblemId]) -> Scoreboard {
        let rows = ranking
            .entries()
            .iter()
            .map(|entry| {
                let team = roster.get(&entry.team);
                let cells = problems
                    .iter()
                    .map(|&id| {
                        team.and_then(|t| t.problem(id))
                            .map_or(Cell::Untouched, |st| st.cell())
                    })
                    .collect();
                TeamRow {
                    team: entry.team.clone(),
                    rank: entry.rank,
                    solved: entry.solved,
                    penalty: entry.penalty,
                    cells,
                }
            })
            .collect();
        Scoreboard { rows }
    }

    pub fn row(&self, team: &str) -> Option<&TeamRow> {
        self.rows.iter().find(|row| row.team == team)
    }
}
