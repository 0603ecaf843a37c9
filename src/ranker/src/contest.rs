use crate::{
    board::Scoreboard,
    cfg::Config,
    error::{Error, Result},
    problem::Disposition,
    ranking::Ranking,
    scroll::{Reveal, ScrollReport, Scroller},
    submission::{Filter, ProblemId, Submission, Time, Verdict, MAX_PROBLEMS},
    team::{Roster, Team},
};
use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Teams can be added
    Registration,
    Running,
    Ended,
}

#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
pub struct ContestClock {
    pub phase: Phase,
    pub frozen: bool,
    /// Contest duration in minutes. Zero until contest starts.
    pub duration: u32,
    pub problem_count: u32,
}

/// Answer to ranking query
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
pub struct RankQuery {
    pub rank: u32,
    /// Scoreboard is frozen, so rank may not account for hidden submissions
    pub stale: bool,
}

/// Whole contest state. All operations are applied in call order.
#[derive(Debug)]
pub struct Contest {
    config: Config,
    clock: ContestClock,
    problems: Vec<ProblemId>,
    roster: Roster,
    /// Ranking saved by last flush since contest start
    flushed: Option<Ranking>,
}

impl Contest {
    pub fn new(config: Config) -> Contest {
        Contest {
            config,
            clock: ContestClock {
                phase: Phase::Registration,
                frozen: false,
                duration: 0,
                problem_count: 0,
            },
            problems: Vec::new(),
            roster: Roster::default(),
            flushed: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> ContestClock {
        self.clock
    }

    pub fn problems(&self) -> &[ProblemId] {
        &self.problems
    }

    pub fn is_frozen(&self) -> bool {
        self.clock.frozen
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.roster.get(name)
    }

    pub fn teams(&self) -> &Roster {
        &self.roster
    }

    fn ensure_not_ended(&self) -> Result<()> {
        if self.clock.phase == Phase::Ended {
            return Err(Error::ContestEnded);
        }
        Ok(())
    }

    fn ensure_running(&self) -> Result<()> {
        match self.clock.phase {
            Phase::Registration => Err(Error::ContestNotStarted),
            Phase::Running => Ok(()),
            Phase::Ended => Err(Error::ContestEnded),
        }
    }

    pub fn register_team(&mut self, name: &str) -> Result<()> {
        self.ensure_not_ended()?;
        if self.clock.phase != Phase::Registration {
            return Err(Error::ContestAlreadyStarted);
        }
        if !self.roster.insert(name) {
            return Err(Error::DuplicateTeam(name.to_string()));
        }
        debug!("registered team {}", name);
        Ok(())
    }

    pub fn start(&mut self, duration: u32, problem_count: u32) -> Result<()> {
        self.ensure_not_ended()?;
        if self.clock.phase != Phase::Registration {
            return Err(Error::ContestAlreadyStarted);
        }
        if problem_count == 0 || problem_count > MAX_PROBLEMS {
            return Err(Error::InvalidProblemCount(problem_count));
        }
        self.clock.phase = Phase::Running;
        self.clock.duration = duration;
        self.clock.problem_count = problem_count;
        self.problems = (0..problem_count).map(ProblemId::from_index).collect();
        // ranking flushed during registration is meaningless
        self.flushed = None;
        info!(
            "contest started: {} teams, {} problems, {} minutes",
            self.roster.len(),
            problem_count,
            duration
        );
        Ok(())
    }

    pub fn submit(
        &mut self,
        problem: ProblemId,
        team: &str,
        verdict: Verdict,
        time: Time,
    ) -> Result<Disposition> {
        self.ensure_running()?;
        if problem.to_idx() >= self.problems.len() {
            return Err(Error::UnknownProblem(problem));
        }
        if !self.roster.contains(team) {
            if !self.config.auto_register {
                return Err(Error::UnknownTeam(team.to_string()));
            }
            info!("registering team {} on its first submission", team);
            self.roster.insert(team);
            if let Some(flushed) = &mut self.flushed {
                flushed.push(team.to_string(), 0, 0);
            }
        }
        let frozen = self.clock.frozen;
        let team = self
            .roster
            .get_mut(team)
            .expect("team is registered above");
        let disposition = team.submit(
            Submission {
                problem,
                verdict,
                time,
            },
            frozen,
        );
        debug!(
            "submission of {} to {} at {}: {:?}",
            team.name(),
            problem,
            time,
            disposition
        );
        Ok(disposition)
    }

    /// Current ranking, computed from scratch
    pub fn ranking(&self) -> Ranking {
        Ranking::compute(&self.roster, self.config.penalty_per_wrong)
    }

    /// Current scoreboard, with hidden submissions shown as pending
    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::build(&self.ranking(), &self.roster, &self.problems)
    }

    /// Recomputes ranking and saves it for ranking queries
    pub fn flush(&mut self) -> &Ranking {
        let ranking = self.ranking();
        debug!("flushing ranking of {} teams", ranking.len());
        self.flushed.insert(ranking)
    }

    pub fn flushed(&self) -> Option<&Ranking> {
        self.flushed.as_ref()
    }

    pub fn freeze(&mut self) -> Result<()> {
        self.ensure_running()?;
        if self.clock.frozen {
            return Err(Error::AlreadyFrozen);
        }
        for team in self.roster.teams_mut() {
            team.snapshot_for_freeze();
        }
        self.clock.frozen = true;
        info!("scoreboard frozen");
        Ok(())
    }

    fn ensure_frozen(&self) -> Result<()> {
        self.ensure_running()?;
        if !self.clock.frozen {
            return Err(Error::NotFrozen);
        }
        Ok(())
    }

    /// Reveals single team-problem, like one step of `scroll`.
    /// Scoreboard stays frozen; returns None when nothing is hidden.
    pub fn reveal_step(&mut self) -> Result<Option<Reveal>> {
        self.ensure_frozen()?;
        let mut scroller = Scroller::new(&mut self.roster, self.config.penalty_per_wrong);
        Ok(scroller.step())
    }

    /// Reveals all hidden submissions and unfreezes scoreboard.
    pub fn scroll(&mut self) -> Result<ScrollReport> {
        self.ensure_frozen()?;
        info!("scrolling scoreboard");
        let mut scroller = Scroller::new(&mut self.roster, self.config.penalty_per_wrong);
        let before = scroller.scoreboard(&self.problems);
        let (changes, steps) = scroller.run();
        let after = scroller.scoreboard(&self.problems);
        self.flushed = Some(scroller.into_ranking());
        self.clock.frozen = false;
        info!(
            "scroll finished: {} team-problems revealed, {} rank changes",
            steps,
            changes.len()
        );
        Ok(ScrollReport {
            before,
            changes,
            after,
            steps,
        })
    }

    pub fn query_ranking(&self, team: &str) -> Result<RankQuery> {
        if !self.roster.contains(team) {
            return Err(Error::UnknownTeam(team.to_string()));
        }
        let rank = match &self.flushed {
            Some(ranking) => ranking.rank_of(team),
            None => Ranking::alphabetical(&self.roster).rank_of(team),
        }
        .expect("every registered team is ranked");
        Ok(RankQuery {
            rank,
            stale: self.clock.frozen,
        })
    }

    /// Latest submission of `team` matching filters.
    /// `Ok(None)` means team exists but has no such submissions.
    pub fn query_submission(
        &self,
        team: &str,
        problem: &Filter<ProblemId>,
        verdict: &Filter<Verdict>,
    ) -> Result<Option<&Submission>> {
        let team = self
            .roster
            .get(team)
            .ok_or_else(|| Error::UnknownTeam(team.to_string()))?;
        Ok(team.ledger().last_matching(problem, verdict))
    }

    pub fn end(&mut self) {
        self.clock.phase = Phase::Ended;
        info!("contest ended");
    }
}
