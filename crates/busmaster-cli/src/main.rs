//! CLI entry point for the `busmaster` script runner.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use busmaster_core::{
    classify_line, decode_transaction, run, Interpreter, LineClass, MemoryPeer, MemoryScript,
    NullTrace, RunConfig, RunStatus, ScriptSource, TraceRecord, TraceSink, TransactionKind,
};
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: busmaster <command> [options]

Commands:
  run   <script> [options]  Drive the script against the memory-model peer
  check <script>            Decode the script without driving the bus

Run options:
  --max-cycles <n>  Stop after n cycles (default: unlimited)
  --trace           Print a per-cycle trace to stderr
  --ack-waits       Hold both handshake event inputs true every cycle
  -h, --help        Show this help message

Exit codes:
  0  script completed (or checked) cleanly
  1  usage or I/O error
  2  fatal script or bus fault
  3  cycle limit reached before completion

Examples:
  busmaster run stimulus.txt --trace
  busmaster run stimulus.txt --max-cycles 100000 --ack-waits
  busmaster check stimulus.txt
";

const EXIT_FAULT: u8 = 2;
const EXIT_CYCLE_LIMIT: u8 = 3;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(RunArgs),
    Check(CheckArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    script: PathBuf,
    max_cycles: Option<u64>,
    trace: bool,
    ack_waits: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct CheckArgs {
    script: PathBuf,
}

#[derive(Debug)]
enum ParsedArgs {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParsedArgs::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    match command_str.as_str() {
        "run" => parse_run_args(args).map(Command::Run).map(ParsedArgs::Command),
        "check" => parse_check_args(args)
            .map(Command::Check)
            .map(ParsedArgs::Command),
        other => Err(format!("unknown command: {other}")),
    }
}

#[allow(clippy::while_let_on_iterator)]
fn parse_run_args(mut args: impl Iterator<Item = OsString>) -> Result<RunArgs, String> {
    let mut script: Option<PathBuf> = None;
    let mut max_cycles: Option<u64> = None;
    let mut trace = false;
    let mut ack_waits = false;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg == "--trace" {
            trace = true;
            continue;
        }

        if arg == "--ack-waits" {
            ack_waits = true;
            continue;
        }

        if arg == "--max-cycles" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --max-cycles".to_string())?;
            let value = value
                .to_string_lossy()
                .parse::<u64>()
                .map_err(|_| "invalid value for --max-cycles".to_string())?;
            max_cycles = Some(value);
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if script.is_some() {
            return Err("multiple script paths provided".to_string());
        }
        script = Some(PathBuf::from(arg));
    }

    let script = script.ok_or_else(|| "missing script path".to_string())?;
    Ok(RunArgs {
        script,
        max_cycles,
        trace,
        ack_waits,
    })
}

fn parse_check_args(args: impl Iterator<Item = OsString>) -> Result<CheckArgs, String> {
    let mut script: Option<PathBuf> = None;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if script.is_some() {
            return Err("multiple script paths provided".to_string());
        }
        script = Some(PathBuf::from(arg));
    }

    let script = script.ok_or_else(|| "missing script path".to_string())?;
    Ok(CheckArgs { script })
}

struct StderrTrace;

impl TraceSink for StderrTrace {
    fn on_step(&mut self, record: TraceRecord) {
        eprintln!("cycle {:>6}: {:?}", record.cycle, record.outcome);
    }
}

fn load_script(path: &Path) -> Result<MemoryScript, u8> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(MemoryScript::from_text(&text)),
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", path.display());
            Err(1)
        }
    }
}

fn run_script(args: &RunArgs) -> Result<(), u8> {
    let script = load_script(&args.script)?;

    let mut master = Interpreter::new(script);
    let mut peer = MemoryPeer::new().with_auto_events(args.ack_waits);
    let config = RunConfig {
        max_cycles: args.max_cycles,
    };

    let report = if args.trace {
        run(&mut master, &mut peer, &config, &mut StderrTrace)
    } else {
        run(&mut master, &mut peer, &config, &mut NullTrace)
    };

    match report.status {
        RunStatus::Completed => {
            println!(
                "Completed {} ({} lines, {} cycles)",
                args.script.display(),
                master.line_number(),
                report.cycles
            );
            Ok(())
        }
        RunStatus::Faulted(fault) => {
            eprintln!("error: {fault}");
            Err(EXIT_FAULT)
        }
        RunStatus::CycleLimit => {
            eprintln!(
                "error: cycle limit reached after {} cycles at script line {}",
                report.cycles,
                master.line_number()
            );
            Err(EXIT_CYCLE_LIMIT)
        }
    }
}

fn check_script(args: &CheckArgs) -> Result<(), u8> {
    let mut script = load_script(&args.script)?;

    let mut writes = 0usize;
    let mut verifies = 0usize;
    let mut directives = 0usize;
    let mut ignored = 0usize;

    while let Some(line) = script.next_line() {
        match classify_line(&line.text) {
            LineClass::Directive(_) => directives += 1,
            LineClass::UnknownDirective => ignored += 1,
            LineClass::Command => match decode_transaction(&line.text, line.number) {
                Ok(txn) => match txn.kind {
                    TransactionKind::Write => writes += 1,
                    TransactionKind::Read => verifies += 1,
                },
                Err(fault) => {
                    eprintln!("error: {fault}");
                    return Err(EXIT_FAULT);
                }
            },
        }
    }

    println!(
        "Checked {}: {writes} writes, {verifies} verifies, {directives} directives, {ignored} ignored",
        args.script.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let parsed = match parse_args(env::args_os().skip(1)) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            eprintln!("{USAGE_TEXT}");
            return ExitCode::from(1);
        }
    };

    let result = match parsed {
        ParsedArgs::Help => {
            println!("{USAGE_TEXT}");
            Ok(())
        }
        ParsedArgs::Command(Command::Run(args)) => run_script(&args),
        ParsedArgs::Command(Command::Check(args)) => check_script(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}
