pub mod config_reader;
pub mod io_delimited;

use log::{debug, info, warn};

use rand::rngs::OsRng;
use rand::Rng;
use serde::{Serialize, Serializer};
use snafu::{prelude::*, Snafu};
use winner_draw::*;

use std::fs;

use crate::args::Args;
use crate::draw::config_reader::read_config;
use crate::draw::io_delimited::parse_upload;

#[derive(Debug, Snafu)]
pub enum RaffleError {
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("Error serializing the outcome of the draw"))]
    SerializingOutcome { source: serde_json::Error },
    #[snafu(display("Error writing the outcome of the draw to {path}"))]
    WritingOutcome {
        source: std::io::Error,
        path: String,
    },
}

pub type RaffleResult<T> = Result<T, RaffleError>;

/// The pool that a number of winners was checked against.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PoolKind {
    FileRows,
    ParticipantCount,
}

/// Everything that can be wrong with a submission.
///
/// These are not failures of the program: they are reported together to the user, and no
/// winner is drawn when there is at least one of them.
#[derive(Eq, PartialEq, Debug, Clone, Snafu, Serialize)]
#[serde(into = "String")]
pub enum ValidationError {
    #[snafu(display("Please enter a valid number of winners (at least 1)."))]
    InvalidWinnerCount {},
    #[snafu(display("The list of participants could not be uploaded."))]
    UploadFailed {},
    #[snafu(display("The uploaded file does not contain any valid participant data."))]
    EmptyParsedTable {},
    #[snafu(display("Please enter either a number of participants or upload a list of participants."))]
    NoParticipantSource {},
    #[snafu(display("{}", exceeds_message(*pool)))]
    WinnerCountExceedsPool { pool: PoolKind },
    #[snafu(display("The number of participants must be a positive whole number."))]
    InvalidParticipantCount {},
}

fn exceeds_message(pool: PoolKind) -> &'static str {
    match pool {
        PoolKind::FileRows => {
            "The number of winners may not exceed the number of participants in the file."
        }
        PoolKind::ParticipantCount => {
            "The number of winners may not exceed the number of participants."
        }
    }
}

impl From<ValidationError> for String {
    fn from(e: ValidationError) -> String {
        e.to_string()
    }
}

/// The participant list, as delivered to the draw.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Upload {
    NotSubmitted,
    Uploaded(Vec<u8>),
    Failed,
}

/// The raw inputs of a draw, before any validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Submission {
    pub winner_count: String,
    pub participant_count: String,
    pub upload: Upload,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Winner {
    pub label: String,
    pub value: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize)]
pub struct DrawOutcome {
    pub errors: Vec<ValidationError>,
    pub winners: Vec<Winner>,
    #[serde(serialize_with = "serialize_table")]
    pub participants: ParsedTable,
}

fn serialize_table<S: Serializer>(table: &ParsedTable, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(table.iter().map(|r| &r.fields))
}

// Reads the leading integer of the text: "3 winners" is 3, "1.5" is 1, and text without
// leading digits is 0. Values too large for usize saturate.
fn coerce_winner_count(text: &str) -> Option<usize> {
    let text = text.trim();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if negative || digits.is_empty() {
        return None;
    }
    let value = digits.parse::<usize>().unwrap_or(usize::MAX);
    Some(value).filter(|x| *x >= 1)
}

fn parse_participant_count(text: &str) -> Option<usize> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<usize>().ok().filter(|x| *x >= 1)
}

// The bounds of a draw are checked once, by the sampler. Its refusal is reported against the
// pool in use.
fn draw_error_to_validation(e: DrawError, pool: PoolKind) -> ValidationError {
    match e {
        DrawError::NoWinnersRequested => ValidationError::InvalidWinnerCount {},
        DrawError::EmptyPool => match pool {
            PoolKind::FileRows => ValidationError::EmptyParsedTable {},
            PoolKind::ParticipantCount => ValidationError::InvalidParticipantCount {},
        },
        DrawError::WinnerCountExceedsPool { .. } => ValidationError::WinnerCountExceedsPool { pool },
    }
}

/// Validates a submission and, if it is valid, draws the winners with the random source
/// of the operating system.
pub fn run_submission(submission: &Submission) -> DrawOutcome {
    run_submission_with_rng(&mut OsRng, submission)
}

pub fn run_submission_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    submission: &Submission,
) -> DrawOutcome {
    let mut outcome = DrawOutcome::default();

    let winner_count = coerce_winner_count(&submission.winner_count);
    if winner_count.is_none() {
        outcome.errors.push(ValidationError::InvalidWinnerCount {});
    }

    let participant_count_input = submission.participant_count.trim();

    let table = match &submission.upload {
        Upload::NotSubmitted => ParsedTable::default(),
        Upload::Failed => {
            outcome.errors.push(ValidationError::UploadFailed {});
            ParsedTable::default()
        }
        Upload::Uploaded(content) => {
            let table = parse_upload(content);
            info!("Read {} participant(s) from the upload", table.len());
            if table.is_empty() {
                outcome.errors.push(ValidationError::EmptyParsedTable {});
            }
            table
        }
    };

    if table.is_empty() && participant_count_input.is_empty() {
        outcome.errors.push(ValidationError::NoParticipantSource {});
    }

    let winner_count = match winner_count {
        Some(x) if outcome.errors.is_empty() => x,
        _ => {
            warn!("run_submission: errors: {:?}", outcome.errors);
            return outcome;
        }
    };

    if !table.is_empty() {
        let winners = match choose_unique_with_rng(rng, table.len(), winner_count) {
            Ok(ws) => ws,
            Err(e) => {
                warn!("run_submission: draw refused: {}", e);
                outcome
                    .errors
                    .push(draw_error_to_validation(e, PoolKind::FileRows));
                return outcome;
            }
        };
        debug!("run_submission: winning rows: {:?}", winners);
        outcome.winners = winners
            .iter()
            .map(|idx| Winner {
                label: format!("Participant #{}", idx + 1),
                value: table.get(*idx).map(|r| r.joined()).unwrap_or_default(),
            })
            .collect();
        outcome.participants = table;
    } else {
        let pool_size = match parse_participant_count(participant_count_input) {
            Some(n) => n,
            None => {
                outcome
                    .errors
                    .push(ValidationError::InvalidParticipantCount {});
                return outcome;
            }
        };
        let winners = match choose_unique_with_rng(rng, pool_size, winner_count) {
            Ok(ws) => ws,
            Err(e) => {
                warn!("run_submission: draw refused: {}", e);
                outcome
                    .errors
                    .push(draw_error_to_validation(e, PoolKind::ParticipantCount));
                return outcome;
            }
        };
        debug!("run_submission: winning numbers: {:?}", winners);
        outcome.winners = winners
            .iter()
            .enumerate()
            .map(|(rank, idx)| Winner {
                label: format!("Winner #{}", rank + 1),
                value: format!("Participant number {}", idx + 1),
            })
            .collect();
    }

    info!("Drew {} winner(s)", outcome.winners.len());
    outcome
}

/// A plain text view of the outcome, for the terminal.
pub fn render_outcome(outcome: &DrawOutcome) -> String {
    let mut lines: Vec<String> = Vec::new();
    if !outcome.errors.is_empty() {
        for e in outcome.errors.iter() {
            lines.push(format!("error: {}", e));
        }
        return lines.join("\n");
    }
    for w in outcome.winners.iter() {
        lines.push(format!("{}: {}", w.label, w.value));
    }
    if !outcome.participants.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Participants ({} entries):",
            outcome.participants.len()
        ));
        for (idx, r) in outcome.participants.iter().enumerate() {
            lines.push(format!("{:>6}  {}", idx + 1, r.joined()));
        }
    }
    lines.join("\n")
}

fn read_upload(path: &str) -> Upload {
    info!("Attempting to read participant file {:?}", path);
    match fs::read(path) {
        Ok(content) => Upload::Uploaded(content),
        Err(e) => {
            warn!("read_upload: could not read {:?}: {}", path, e);
            Upload::Failed
        }
    }
}

fn write_outcome(outcome: &DrawOutcome, out: &str) -> RaffleResult<()> {
    let pretty_js = serde_json::to_string_pretty(outcome).context(SerializingOutcomeSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing the outcome of the draw to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutcomeSnafu { path: out })?;
    }
    Ok(())
}

/// Runs a draw from the command line arguments, and reports its outcome.
pub fn run_raffle(args: &Args) -> RaffleResult<DrawOutcome> {
    let loaded = match &args.config {
        Some(path) => Some(read_config(path)?),
        None => None,
    };

    let winner_count = args
        .winners
        .clone()
        .or_else(|| loaded.as_ref().and_then(|l| l.config.winner_count_text()))
        .unwrap_or_default();
    let participant_count = args
        .participants
        .clone()
        .or_else(|| {
            loaded
                .as_ref()
                .and_then(|l| l.config.participant_count_text())
        })
        .unwrap_or_default();
    let input = args
        .input
        .clone()
        .or_else(|| loaded.as_ref().and_then(|l| l.participant_file_path()));
    let out = args
        .out
        .clone()
        .or_else(|| loaded.as_ref().and_then(|l| l.output_file_path()));

    let upload = match input {
        Some(path) => read_upload(&path),
        None => Upload::NotSubmitted,
    };

    let submission = Submission {
        winner_count,
        participant_count,
        upload,
    };
    let outcome = run_submission(&submission);

    match out {
        Some(path) => write_outcome(&outcome, &path)?,
        None if outcome.errors.is_empty() => println!("{}", render_outcome(&outcome)),
        None => eprintln!("{}", render_outcome(&outcome)),
    }
    Ok(outcome)
}
