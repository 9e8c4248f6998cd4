use thiserror::Error;

pub const USAGE: &str = "\
usage: patrol-map-feed [build|check|help] [--verbose]

  build      fetch the sheet and write data.json when it changed (default)
  check      fetch, transform and validate without writing anything
  help       show this message

configuration comes from the environment (SHEET_ID, RANGE, GOOGLE_CREDENTIALS,
OUTPUT__DATA_PATH, OUTPUT__ERROR_PATH, OUTPUT__SCHEMA_PATH) layered over the
optional file named by CONFIG_PATH";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Build,
    Check,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub verbose: bool,
}

/// Parses `args` as handed over by `std::env::args`, program name first.
pub fn parse_args(args: &[String]) -> Result<Invocation, CommandError> {
    let mut command = None;
    let mut verbose = false;

    for arg in args.iter().skip(1) {
        let parsed = match arg.as_str() {
            "--verbose" | "-v" => {
                verbose = true;
                continue;
            }
            "build" => Command::Build,
            "check" => Command::Check,
            "help" | "--help" | "-h" => Command::Help,
            other => {
                return Err(CommandError::InvalidCommand {
                    details: format!("unknown argument `{}`", other),
                })
            }
        };

        if command.replace(parsed).is_some() {
            return Err(CommandError::InvalidCommand {
                details: "only one command may be given".to_string(),
            });
        }
    }

    Ok(Invocation {
        command: command.unwrap_or(Command::Build),
        verbose,
    })
}
