//! Command-line battle runner.
//!
//! Reads two pre-assembled warrior files, runs one battle, and prints the
//! two-line score report (or a single `ERROR:` line, exiting non-zero).
//! Options are applied left to right, so `--profile nano --rounds 50`
//! starts from the nano arena and then overrides the round count.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use mars_core::{run_battle_report, BattleParameters};

const HELP_TEXT: &str = "\
Usage: corewar-mars <warrior1> <warrior2> [options]

Options:
  --profile <94-nop|88|nano>  arena preset (default: 94-nop)
  --core-size <n>             cells in the core
  --cycles <n>                cycle cap per round
  --processes <n>             per-warrior process cap
  --read-limit <n>            read fold limit
  --write-limit <n>           write fold limit
  --min-distance <n>          minimum separation between warriors
  --max-length <n>            maximum warrior length
  --rounds <n>                rounds per battle
  --seed <n>                  deterministic placement seed
  --strict-1988               restrict to the ICWS'88 instruction set
  --id1 <n> / --id2 <n>       warrior ids used in the score report
  --help                      show this help";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    warrior1: PathBuf,
    warrior2: PathBuf,
    id1: i32,
    id2: i32,
    params: BattleParameters,
}

#[derive(Debug)]
enum ParseResult {
    Args(Box<CliArgs>),
    Help,
}

fn parse_value<T: FromStr>(
    flag: &str,
    args: &mut impl Iterator<Item = OsString>,
) -> Result<T, String> {
    let value = args
        .next()
        .ok_or_else(|| format!("missing value for {flag}"))?;
    let text = value.to_string_lossy();
    text.parse::<T>()
        .map_err(|_| format!("invalid value for {flag}: {text}"))
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut warriors: Vec<PathBuf> = Vec::new();
    let mut params = BattleParameters::corewar_94_nop();
    let mut id1 = 1;
    let mut id2 = 2;

    while let Some(arg) = args.next() {
        if arg == "--help" {
            return Ok(ParseResult::Help);
        }
        if arg == "--strict-1988" {
            params.strict_1988_mode = true;
            continue;
        }
        if arg == "--profile" {
            let name: String = parse_value("--profile", &mut args)?;
            let strict = params.strict_1988_mode;
            params = match name.as_str() {
                "94-nop" => BattleParameters::corewar_94_nop(),
                "88" => BattleParameters::corewar_88(),
                "nano" => BattleParameters::nano(),
                other => return Err(format!("unknown profile: {other}")),
            };
            params.strict_1988_mode |= strict;
            continue;
        }

        let handled = match arg.to_str() {
            Some("--core-size") => {
                params.core_size = parse_value("--core-size", &mut args)?;
                true
            }
            Some("--cycles") => {
                params.max_cycles = parse_value("--cycles", &mut args)?;
                true
            }
            Some("--processes") => {
                params.max_processes = parse_value("--processes", &mut args)?;
                true
            }
            Some("--read-limit") => {
                params.read_limit = parse_value("--read-limit", &mut args)?;
                true
            }
            Some("--write-limit") => {
                params.write_limit = parse_value("--write-limit", &mut args)?;
                true
            }
            Some("--min-distance") => {
                params.min_distance = parse_value("--min-distance", &mut args)?;
                true
            }
            Some("--max-length") => {
                params.max_warrior_length = parse_value("--max-length", &mut args)?;
                true
            }
            Some("--rounds") => {
                params.rounds = parse_value("--rounds", &mut args)?;
                true
            }
            Some("--seed") => {
                params.seed = Some(parse_value("--seed", &mut args)?);
                true
            }
            Some("--id1") => {
                id1 = parse_value("--id1", &mut args)?;
                true
            }
            Some("--id2") => {
                id2 = parse_value("--id2", &mut args)?;
                true
            }
            _ => false,
        };
        if handled {
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }
        if warriors.len() == 2 {
            return Err(String::from("more than two warrior paths provided"));
        }
        warriors.push(PathBuf::from(arg));
    }

    let mut warriors = warriors.into_iter();
    let (Some(warrior1), Some(warrior2)) = (warriors.next(), warriors.next()) else {
        return Err(String::from("two warrior paths are required"));
    };

    Ok(ParseResult::Args(Box::new(CliArgs {
        warrior1,
        warrior2,
        id1,
        id2,
        params,
    })))
}

fn run(args: &CliArgs) -> String {
    let read = |path: &PathBuf| {
        std::fs::read_to_string(path)
            .map_err(|e| format!("ERROR: cannot read {}: {e}", path.display()))
    };
    let warrior1 = match read(&args.warrior1) {
        Ok(text) => text,
        Err(line) => return line,
    };
    let warrior2 = match read(&args.warrior2) {
        Ok(text) => text,
        Err(line) => return line,
    };
    run_battle_report(&warrior1, args.id1, &warrior2, args.id2, &args.params)
}

fn main() -> ExitCode {
    match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        Ok(ParseResult::Args(args)) => {
            let report = run(&args);
            println!("{report}");
            if report.starts_with("ERROR:") {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{HELP_TEXT}");
            ExitCode::FAILURE
        }
    }
}
