use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub const USAGE: &str = "usage:
  reefline evaluate <water-test.json> [--aquarium-name NAME]
  reefline seed <aquarium-id>
  reefline alerts <aquarium-id>
  reefline snooze <threshold-id> <until-rfc3339>
  reefline unsnooze <threshold-id>";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("no command given")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command} requires <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("invalid timestamp {0}: expected RFC 3339")]
    InvalidTimestamp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Evaluate {
        path: PathBuf,
        aquarium_name: Option<String>,
    },
    Seed {
        aquarium_id: String,
    },
    Alerts {
        aquarium_id: String,
    },
    Snooze {
        threshold_id: String,
        until: DateTime<Utc>,
    },
    Unsnooze {
        threshold_id: String,
    },
}

impl Command {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut args = args.into_iter();
        let name = args.next().ok_or(CliError::MissingCommand)?;

        let command = match name.as_str() {
            "evaluate" => {
                let path = required(&mut args, "evaluate", "water-test.json")?;
                let mut aquarium_name = None;
                while let Some(flag) = args.next() {
                    match flag.as_str() {
                        "--aquarium-name" => {
                            aquarium_name =
                                Some(required(&mut args, "--aquarium-name", "NAME")?);
                        }
                        _ => return Err(CliError::UnexpectedArgument(flag)),
                    }
                }
                return Ok(Self::Evaluate {
                    path: PathBuf::from(path),
                    aquarium_name,
                });
            }
            "seed" => Self::Seed {
                aquarium_id: required(&mut args, "seed", "aquarium-id")?,
            },
            "alerts" => Self::Alerts {
                aquarium_id: required(&mut args, "alerts", "aquarium-id")?,
            },
            "snooze" => {
                let threshold_id = required(&mut args, "snooze", "threshold-id")?;
                let raw = required(&mut args, "snooze", "until-rfc3339")?;
                let until = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|_| CliError::InvalidTimestamp(raw.clone()))?
                    .with_timezone(&Utc);
                Self::Snooze {
                    threshold_id,
                    until,
                }
            }
            "unsnooze" => Self::Unsnooze {
                threshold_id: required(&mut args, "unsnooze", "threshold-id")?,
            },
            _ => return Err(CliError::UnknownCommand(name)),
        };

        match args.next() {
            Some(extra) => Err(CliError::UnexpectedArgument(extra)),
            None => Ok(command),
        }
    }
}

fn required(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CliError> {
    args.next()
        .ok_or(CliError::MissingArgument { command, argument })
}
