//! Parsing of contest commands, one per line

use ranker::{Filter, ParseProblemIdError, ProblemId, Time, Verdict};
use serde::Serialize;
use std::{fmt, num::ParseIntError, str::FromStr};

/// Matches any problem or status in `QUERY_SUBMISSION`
const WILDCARD: &str = "ALL";

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Command {
    AddTeam {
        name: String,
    },
    Start {
        duration: u32,
        problems: u32,
    },
    Submit {
        problem: ProblemId,
        team: String,
        verdict: Verdict,
        time: Time,
    },
    Flush,
    Freeze,
    Scroll,
    QueryRanking {
        team: String,
    },
    QuerySubmission {
        team: String,
        problem: Filter<ProblemId>,
        verdict: Filter<Verdict>,
    },
    End,
}

#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum CommandKind {
    AddTeam,
    Start,
    Submit,
    Flush,
    Freeze,
    Scroll,
    QueryRanking,
    QuerySubmission,
    End,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CommandKind::AddTeam => "Add",
            CommandKind::Start => "Start",
            CommandKind::Submit => "Submit",
            CommandKind::Flush => "Flush",
            CommandKind::Freeze => "Freeze",
            CommandKind::Scroll => "Scroll",
            CommandKind::QueryRanking => "Query ranking",
            CommandKind::QuerySubmission => "Query submission",
            CommandKind::End => "End",
        };
        f.write_str(name)
    }
}

impl Command {
    pub(crate) fn kind(&self) -> CommandKind {
        match self {
            Command::AddTeam { .. } => CommandKind::AddTeam,
            Command::Start { .. } => CommandKind::Start,
            Command::Submit { .. } => CommandKind::Submit,
            Command::Flush => CommandKind::Flush,
            Command::Freeze => CommandKind::Freeze,
            Command::Scroll => CommandKind::Scroll,
            Command::QueryRanking { .. } => CommandKind::QueryRanking,
            Command::QuerySubmission { .. } => CommandKind::QuerySubmission,
            Command::End => CommandKind::End,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("{command}: missing {what}")]
    Missing {
        command: String,
        what: &'static str,
    },
    #[error("{command}: expected `{expected}`, got `{got}`")]
    Keyword {
        command: String,
        expected: &'static str,
        got: String,
    },
    #[error("{command}: unexpected `{got}` after command end")]
    Trailing { command: String, got: String },
    #[error("{command}: `{value}` is not a number")]
    Number {
        command: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Problem(#[from] ParseProblemIdError),
}

/// Whitespace-separated words of single command
struct Tokens<'a> {
    command: &'a str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        let command = self.command;
        self.words.next().ok_or_else(|| ParseError::Missing {
            command: command.to_string(),
            what,
        })
    }

    fn keyword(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let got = self.next(expected)?;
        if got != expected {
            return Err(ParseError::Keyword {
                command: self.command.to_string(),
                expected,
                got: got.to_string(),
            });
        }
        Ok(())
    }

    fn number(&mut self, what: &'static str) -> Result<u32, ParseError> {
        let value = self.next(what)?;
        value.parse().map_err(|source| ParseError::Number {
            command: self.command.to_string(),
            value: value.to_string(),
            source,
        })
    }

    /// Parses `NAME=value` word, returning `value`
    fn setting(&mut self, name: &'static str) -> Result<&'a str, ParseError> {
        let word = self.next(name)?;
        word.strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or_else(|| ParseError::Keyword {
                command: self.command.to_string(),
                expected: name,
                got: word.to_string(),
            })
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.words.next() {
            Some(got) => Err(ParseError::Trailing {
                command: self.command.to_string(),
                got: got.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn filter<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<Filter<T>, ParseError> {
    if value == WILDCARD {
        Ok(Filter::Any)
    } else {
        parse(value).map(Filter::Only)
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Command, ParseError> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let mut tokens = Tokens { command, words };
        let cmd = match command {
            "ADDTEAM" => Command::AddTeam {
                name: tokens.next("team name")?.to_string(),
            },
            "START" => {
                tokens.keyword("DURATION")?;
                let duration = tokens.number("duration")?;
                tokens.keyword("PROBLEM")?;
                let problems = tokens.number("problem count")?;
                Command::Start { duration, problems }
            }
            "SUBMIT" => {
                let problem = tokens.next("problem")?.parse::<ProblemId>()?;
                tokens.keyword("BY")?;
                let team = tokens.next("team name")?.to_string();
                tokens.keyword("WITH")?;
                let verdict = Verdict::new(tokens.next("status")?);
                tokens.keyword("AT")?;
                let time = tokens.number("time")?;
                Command::Submit {
                    problem,
                    team,
                    verdict,
                    time,
                }
            }
            "FLUSH" => Command::Flush,
            "FREEZE" => Command::Freeze,
            "SCROLL" => Command::Scroll,
            "QUERY_RANKING" => Command::QueryRanking {
                team: tokens.next("team name")?.to_string(),
            },
            "QUERY_SUBMISSION" => {
                let team = tokens.next("team name")?.to_string();
                tokens.keyword("WHERE")?;
                let problem =
                    filter(tokens.setting("PROBLEM")?, |s| Ok(s.parse::<ProblemId>()?))?;
                tokens.keyword("AND")?;
                let verdict = filter(tokens.setting("STATUS")?, |s| Ok(Verdict::new(s)))?;
                Command::QuerySubmission {
                    team,
                    problem,
                    verdict,
                }
            }
            "END" => Command::End,
            _ => return Err(ParseError::UnknownCommand(command.to_string())),
        };
        tokens.finish()?;
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn simple_commands() {
        assert_eq!(
            parse("ADDTEAM Team_1"),
            Command::AddTeam {
                name: "Team_1".to_string()
            }
        );
        assert_eq!(
            parse("START DURATION 300 PROBLEM 12"),
            Command::Start {
                duration: 300,
                problems: 12
            }
        );
        assert_eq!(parse("FLUSH"), Command::Flush);
        assert_eq!(parse("  FREEZE  "), Command::Freeze);
        assert_eq!(parse("SCROLL"), Command::Scroll);
        assert_eq!(parse("END"), Command::End);
        assert_eq!(
            parse("QUERY_RANKING Team_1"),
            Command::QueryRanking {
                team: "Team_1".to_string()
            }
        );
    }

    #[test]
    fn submit() {
        assert_eq!(
            parse("SUBMIT C BY Team_1 WITH Wrong_Answer AT 17"),
            Command::Submit {
                problem: "C".parse().unwrap(),
                team: "Team_1".to_string(),
                verdict: Verdict::new("Wrong_Answer"),
                time: 17,
            }
        );
    }

    #[test]
    fn query_submission_filters() {
        assert_eq!(
            parse("QUERY_SUBMISSION Team_1 WHERE PROBLEM=ALL AND STATUS=Accepted"),
            Command::QuerySubmission {
                team: "Team_1".to_string(),
                problem: Filter::Any,
                verdict: Filter::Only(Verdict::accepted()),
            }
        );
        assert_eq!(
            parse("QUERY_SUBMISSION Team_1 WHERE PROBLEM=B AND STATUS=ALL"),
            Command::QuerySubmission {
                team: "Team_1".to_string(),
                problem: Filter::Only("B".parse().unwrap()),
                verdict: Filter::Any,
            }
        );
    }

    #[test]
    fn malformed_lines() {
        let err = |line: &str| line.parse::<Command>().unwrap_err().to_string();
        assert_eq!(err("HELLO world"), "unknown command `HELLO`");
        assert_eq!(err("ADDTEAM"), "ADDTEAM: missing team name");
        assert_eq!(
            err("START DURATION x PROBLEM 3"),
            "START: `x` is not a number"
        );
        assert_eq!(
            err("SUBMIT A FROM t WITH Accepted AT 1"),
            "SUBMIT: expected `BY`, got `FROM`"
        );
        assert_eq!(err("FLUSH now"), "FLUSH: unexpected `now` after command end");
        assert!(err("SUBMIT a BY t WITH Accepted AT 1").contains("not a problem name"));
        assert_eq!(
            err("QUERY_SUBMISSION t WHERE TASK=A AND STATUS=ALL"),
            "QUERY_SUBMISSION: expected `PROBLEM`, got `TASK=A`"
        );
    }

    #[test]
    fn kind_labels() {
        assert_eq!(parse("ADDTEAM x").kind().to_string(), "Add");
        assert_eq!(
            parse("QUERY_RANKING x").kind().to_string(),
            "Query ranking"
        );
    }
}
