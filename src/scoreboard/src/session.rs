use crate::{
    command::Command,
    render::{Outcome, Payload, Renderer},
};
use anyhow::Context;
use log::{debug, warn};
use ranker::{Config, Contest};
use std::io::BufRead;

/// Feeds commands to contest and renders outcomes
pub(crate) struct Session<R> {
    contest: Contest,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub(crate) fn new(config: Config, renderer: R) -> Self {
        Session {
            contest: Contest::new(config),
            renderer,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_renderer(self) -> R {
        self.renderer
    }

    fn execute(&mut self, cmd: Command) -> Outcome {
        let command = cmd.kind();
        let contest = &mut self.contest;
        let result = match cmd {
            Command::AddTeam { name } => contest.register_team(&name).map(|_| Payload::TeamAdded),
            Command::Start { duration, problems } => {
                contest.start(duration, problems).map(|_| Payload::Started)
            }
            Command::Submit {
                problem,
                team,
                verdict,
                time,
            } => contest
                .submit(problem, &team, verdict, time)
                .map(|disposition| Payload::Submitted { disposition }),
            Command::Flush => {
                contest.flush();
                Ok(Payload::Flushed)
            }
            Command::Freeze => contest.freeze().map(|_| Payload::Frozen),
            Command::Scroll => contest.scroll().map(Payload::Scrolled),
            Command::QueryRanking { team } => contest.query_ranking(&team).map(|q| {
                Payload::Ranking {
                    team,
                    rank: q.rank,
                    stale: q.stale,
                }
            }),
            Command::QuerySubmission {
                team,
                problem,
                verdict,
            } => contest
                .query_submission(&team, &problem, &verdict)
                .map(|found| found.cloned())
                .map(|found| Payload::Submission { team, found }),
            Command::End => {
                contest.end();
                Ok(Payload::Ended)
            }
        };
        if let Err(err) = &result {
            debug!("{:?} failed: {}", command, err);
        }
        Outcome { command, result }
    }

    /// Processes commands until `END` or end of input
    pub(crate) fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        for (line_no, line) in input.lines().enumerate() {
            let line = line.context("failed to read command")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let cmd: Command = match line.parse() {
                Ok(cmd) => cmd,
                Err(err) => {
                    warn!("line {}: skipping malformed command: {}", line_no + 1, err);
                    continue;
                }
            };
            let is_end = cmd == Command::End;
            let outcome = self.execute(cmd);
            self.renderer.render(&outcome)?;
            if is_end {
                break;
            }
        }
        self.renderer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;

    fn run_text(config: Config, input: &str) -> String {
        let mut session = Session::new(config, TextRenderer::new(Vec::new()));
        session.run(input.as_bytes()).unwrap();
        String::from_utf8(session.into_renderer().into_inner()).unwrap()
    }

    #[test]
    fn whole_contest() {
        let input = "\
ADDTEAM alpha
ADDTEAM beta
ADDTEAM gamma
ADDTEAM alpha
START DURATION 300 PROBLEM 2
ADDTEAM delta
SUBMIT A BY alpha WITH Accepted AT 10
SUBMIT A BY beta WITH Accepted AT 20
QUERY_RANKING gamma
FLUSH

QUERY_RANKING gamma
FREEZE
FREEZE
SUBMIT A BY gamma WITH Accepted AT 200
SUBMIT B BY gamma WITH Accepted AT 210
BOGUS LINE
SUBMIT B BY beta WITH Wrong_Answer AT 220
SUBMIT B BY beta WITH Accepted AT 230
SUBMIT B BY alpha WITH Wrong_Answer AT 240
SUBMIT A BY omega WITH Accepted AT 241
QUERY_RANKING beta
QUERY_SUBMISSION beta WHERE PROBLEM=B AND STATUS=ALL
QUERY_SUBMISSION alpha WHERE PROBLEM=ALL AND STATUS=Accepted
QUERY_SUBMISSION gamma WHERE PROBLEM=A AND STATUS=Wrong_Answer
QUERY_SUBMISSION omega WHERE PROBLEM=A AND STATUS=ALL
SCROLL
QUERY_RANKING beta
SCROLL
END
FLUSH
";
        let expected = "\
[Info]Add successfully.
[Info]Add successfully.
[Info]Add successfully.
[Error]Add failed: duplicated team name.
[Info]Competition starts.
[Error]Add failed: competition has started.
[Info]Complete query ranking.
gamma NOW AT RANKING 3
[Info]Flush scoreboard.
[Info]Complete query ranking.
gamma NOW AT RANKING 3
[Info]Freeze scoreboard.
[Error]Freeze failed: scoreboard has been frozen.
[Error]Submit failed: cannot find the team.
[Info]Complete query ranking.
[Warning]Scoreboard is frozen. The ranking may be inaccurate until it were scrolled.
beta NOW AT RANKING 2
[Info]Complete query submission.
beta B Accepted 230
[Info]Complete query submission.
alpha A Accepted 10
[Info]Complete query submission.
Cannot find any submission.
[Error]Query submission failed: cannot find the team.
[Info]Scroll scoreboard.
alpha 1 1 10 + 0/1
beta 2 1 20 + 0/2
gamma 3 0 0 0/1 0/1
gamma alpha 2 410
beta gamma 2 270
beta 1 2 270 + +1
gamma 2 2 410 + +
alpha 3 1 10 + -1
[Info]Complete query ranking.
beta NOW AT RANKING 1
[Error]Scroll failed: scoreboard has not been frozen.
[Info]Competition ends.
";
        pretty_assertions::assert_eq!(run_text(Config::default(), input), expected);
    }

    #[test]
    fn auto_registration() {
        let config = Config {
            auto_register: true,
            ..Config::default()
        };
        let input = "\
START DURATION 100 PROBLEM 1
SUBMIT A BY red WITH Wrong_Answer AT 3
SUBMIT A BY red WITH Accepted AT 7
FLUSH
QUERY_RANKING red
";
        let expected = "\
[Info]Competition starts.
[Info]Flush scoreboard.
[Info]Complete query ranking.
red NOW AT RANKING 1
";
        pretty_assertions::assert_eq!(run_text(config, input), expected);
    }
}
