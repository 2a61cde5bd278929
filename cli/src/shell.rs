//! Line-oriented session: load a graph once, then query it repeatedly.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::config::{Settings, DEFAULT_BFS_DEPTH, DEFAULT_DEGREE_TOP};
use crate::degree::{DegreeRankingReport, MaxDegreeReport};
use crate::error::{CliError, CliResult};
use crate::load::load_graph;
use crate::neighborhood::{BfsReport, NeighborsReport};
use crate::render::{emit, emit_error};
use crate::state::Session;
use crate::status::StatsReport;

const HELP: &str = "\
commands:
  load PATH            load an edge list, replacing the current graph
  stats                node/edge counts and load summary
  max-degree           node with the most outgoing edges
  degree [N]           top N nodes by out-degree (0 = all)
  bfs START [DEPTH]    edges explored within DEPTH hops of START
  neighbors NODE       sorted out-neighbors of NODE
  help                 this message
  quit                 end the session";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Load(PathBuf),
    Stats,
    MaxDegree,
    Degree(usize),
    Bfs { start: i64, depth: i64 },
    Neighbors(i64),
    Help,
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

fn parse_arg<T: FromStr>(value: &str, name: &str) -> CliResult<T> {
    value
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("{} must be an integer, got '{}'", name, value)))
}

fn usage(text: &str) -> CliError {
    CliError::InvalidInput(format!("usage: {}", text))
}

/// Parse one session line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> CliResult<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (cmd, rest) = line
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((line, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match (cmd, args.as_slice()) {
        ("load", []) => return Err(usage("load PATH")),
        ("load", _) => ShellCommand::Load(PathBuf::from(rest)),
        ("stats", []) => ShellCommand::Stats,
        ("max-degree", []) => ShellCommand::MaxDegree,
        ("degree", []) => ShellCommand::Degree(DEFAULT_DEGREE_TOP),
        ("degree", [n]) => ShellCommand::Degree(parse_arg(n, "N")?),
        ("bfs", [start]) => ShellCommand::Bfs {
            start: parse_arg(start, "START")?,
            depth: DEFAULT_BFS_DEPTH,
        },
        ("bfs", [start, depth]) => ShellCommand::Bfs {
            start: parse_arg(start, "START")?,
            depth: parse_arg(depth, "DEPTH")?,
        },
        ("bfs", _) => return Err(usage("bfs START [DEPTH]")),
        ("neighbors", [node]) => ShellCommand::Neighbors(parse_arg(node, "NODE")?),
        ("neighbors", _) => return Err(usage("neighbors NODE")),
        ("help", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        ("stats" | "max-degree" | "degree", _) => {
            return Err(CliError::InvalidInput(format!("too many arguments for '{}'", cmd)))
        }
        (other, _) => {
            return Err(CliError::InvalidInput(format!(
                "unknown command '{}' (try 'help')",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn execute<W: Write>(
    session: &mut Session,
    command: ShellCommand,
    out: &mut W,
    settings: &Settings,
) -> CliResult<Flow> {
    let format = settings.format;
    match command {
        ShellCommand::Load(path) => match load_graph(&path, settings) {
            Ok(gs) => {
                let report = StatsReport::from_state(&gs);
                session.set_graph(gs);
                emit(out, format, &report)?;
            }
            Err(e) => {
                session.clear();
                return Err(e);
            }
        },
        ShellCommand::Stats => {
            let report = session.with_graph(StatsReport::from_state)?;
            emit(out, format, &report)?;
        }
        ShellCommand::MaxDegree => {
            let report = session.with_graph(|gs| MaxDegreeReport::compute(&gs.graph))?;
            emit(out, format, &report)?;
        }
        ShellCommand::Degree(top_n) => {
            let report = session.with_graph(|gs| DegreeRankingReport::compute(&gs.graph, top_n))?;
            emit(out, format, &report)?;
        }
        ShellCommand::Bfs { start, depth } => {
            let report = session.with_graph(|gs| BfsReport::compute(&gs.graph, start, depth))?;
            emit(out, format, &report)?;
        }
        ShellCommand::Neighbors(node) => {
            let report = session.with_graph(|gs| NeighborsReport::compute(&gs.graph, node))?;
            emit(out, format, &report)?;
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn handle_line<W: Write>(
    session: &mut Session,
    line: &str,
    out: &mut W,
    settings: &Settings,
) -> CliResult<Flow> {
    match parse_command(line)? {
        Some(command) => {
            debug!(?command, "session command");
            execute(session, command, out, settings)
        }
        None => Ok(Flow::Continue),
    }
}

/// Run a session over `input` until EOF or `quit`.
///
/// Command errors (bad input, missing graph, unreadable file) are written to
/// `out` and the session continues. A line that is not UTF-8 counts as bad
/// input. Only I/O and output failures end it early.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    settings: &Settings,
    initial: Option<&Path>,
    prompt: bool,
) -> CliResult<()> {
    let mut session = Session::new();

    if let Some(path) = initial {
        if let Err(e) = execute(&mut session, ShellCommand::Load(path.to_path_buf()), out, settings) {
            emit_error(out, settings.format, &e)?;
        }
    }

    let mut lines = input.split(b'\n');
    loop {
        if prompt {
            write!(out, "neuronet> ")?;
            out.flush()?;
        }
        let Some(bytes) = lines.next() else {
            break;
        };
        let result = match String::from_utf8(bytes?) {
            Ok(line) => handle_line(&mut session, &line, out, settings),
            Err(_) => Err(CliError::InvalidInput("command is not valid UTF-8".to_string())),
        };

        match result {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => emit_error(out, settings.format, &e)?,
        }
    }

    Ok(())
}
