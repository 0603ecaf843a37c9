use crate::command::CommandKind;
use anyhow::Context;
use ranker::{Cell, Disposition, ScrollReport, Scoreboard, Submission};
use serde::Serialize;
use std::{fmt, io::Write};

/// Successful result of command
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub(crate) enum Payload {
    TeamAdded,
    Started,
    Submitted { disposition: Disposition },
    Flushed,
    Frozen,
    Scrolled(ScrollReport),
    Ranking { team: String, rank: u32, stale: bool },
    Submission {
        team: String,
        found: Option<Submission>,
    },
    Ended,
}

#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) command: CommandKind,
    pub(crate) result: Result<Payload, ranker::Error>,
}

/// Presents command outcomes to user
pub(crate) trait Renderer {
    fn render(&mut self, outcome: &Outcome) -> anyhow::Result<()>;
    fn flush(&mut self) -> anyhow::Result<()>;
}

/// Formats cell as in classic ICPC standings
struct CellText<'a>(&'a Cell);

impl fmt::Display for CellText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            Cell::Untouched => f.write_str("."),
            Cell::Solved { wrong_attempts: 0 } => f.write_str("+"),
            Cell::Solved { wrong_attempts } => write!(f, "+{}", wrong_attempts),
            Cell::Failed { wrong_attempts } => write!(f, "-{}", wrong_attempts),
            Cell::Frozen {
                wrong_attempts: 0,
                hidden,
            } => write!(f, "0/{}", hidden),
            Cell::Frozen {
                wrong_attempts,
                hidden,
            } => write!(f, "-{}/{}", wrong_attempts, hidden),
        }
    }
}

/// Human-readable output
pub(crate) struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        TextRenderer { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn print_board(&mut self, board: &Scoreboard) -> std::io::Result<()> {
        for row in &board.rows {
            write!(
                self.out,
                "{} {} {} {}",
                row.team, row.rank, row.solved, row.penalty
            )?;
            for cell in &row.cells {
                write!(self.out, " {}", CellText(cell))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn print_payload(&mut self, payload: &Payload) -> std::io::Result<()> {
        match payload {
            Payload::TeamAdded => writeln!(self.out, "[Info]Add successfully."),
            Payload::Started => writeln!(self.out, "[Info]Competition starts."),
            Payload::Submitted { .. } => Ok(()),
            Payload::Flushed => writeln!(self.out, "[Info]Flush scoreboard."),
            Payload::Frozen => writeln!(self.out, "[Info]Freeze scoreboard."),
            Payload::Scrolled(report) => {
                writeln!(self.out, "[Info]Scroll scoreboard.")?;
                self.print_board(&report.before)?;
                for change in &report.changes {
                    writeln!(
                        self.out,
                        "{} {} {} {}",
                        change.team, change.replaced, change.solved, change.penalty
                    )?;
                }
                self.print_board(&report.after)
            }
            Payload::Ranking { team, rank, stale } => {
                writeln!(self.out, "[Info]Complete query ranking.")?;
                if *stale {
                    writeln!(
                        self.out,
                        "[Warning]Scoreboard is frozen. The ranking may be inaccurate until it were scrolled."
                    )?;
                }
                writeln!(self.out, "{} NOW AT RANKING {}", team, rank)
            }
            Payload::Submission { team, found } => {
                writeln!(self.out, "[Info]Complete query submission.")?;
                match found {
                    Some(sub) => writeln!(
                        self.out,
                        "{} {} {} {}",
                        team, sub.problem, sub.verdict, sub.time
                    ),
                    None => writeln!(self.out, "Cannot find any submission."),
                }
            }
            Payload::Ended => writeln!(self.out, "[Info]Competition ends."),
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, outcome: &Outcome) -> anyhow::Result<()> {
        let res = match &outcome.result {
            Ok(payload) => self.print_payload(payload),
            Err(err) => writeln!(self.out, "[Error]{} failed: {}.", outcome.command, err),
        };
        res.context("failed to write output")
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.out.flush().context("failed to flush output")
    }
}

/// Writes one JSON object per outcome
pub(crate) struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        JsonRenderer { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

fn outcome_to_json(outcome: &Outcome) -> anyhow::Result<serde_json::Value> {
    let value = match &outcome.result {
        Ok(payload) => {
            let result = serde_json::to_value(payload).context("failed to serialize result")?;
            serde_json::json!({
                "command": outcome.command,
                "ok": true,
                "result": result,
            })
        }
        Err(err) => serde_json::json!({
            "command": outcome.command,
            "ok": false,
            "error": err.to_string(),
        }),
    };
    Ok(value)
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, outcome: &Outcome) -> anyhow::Result<()> {
        let value = outcome_to_json(outcome)?;
        serde_json::to_writer(&mut self.out, &value).context("failed to serialize")?;
        writeln!(self.out).context("failed to write output")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.out.flush().context("failed to flush output")
    }
}
