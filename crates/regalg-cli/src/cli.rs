//! Command-line interface for the regalg tool
//!
//! Compiles regular expressions and the built-in lexical languages to
//! automata, tests inputs against them and prints Graphviz DOT.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use tracing::info;

use crate::languages::Language;
use crate::logging::{LogFormat, init_logging};
use regalg::{Minimization, StateGraph, regex};

/// regalg - regular languages as finite automata
#[derive(Parser, Debug)]
#[command(name = "regalg")]
#[command(about = "Build, minimize and render finite automata for regular languages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (trace|debug|info|warn|error or a filter directive)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the automaton for a regular expression as DOT
    Dot {
        /// Regular expression
        pattern: String,

        /// Minimization algorithm, or `none` for the raw construction
        #[arg(long, value_enum, default_value_t = MinimizeChoice::Hopcroft)]
        minimize: MinimizeChoice,
    },

    /// Test inputs against a regular expression
    Match {
        /// Regular expression
        pattern: String,

        /// Strings to test
        #[arg(required = true, allow_hyphen_values = true)]
        inputs: Vec<String>,
    },

    /// Build one of the built-in lexical languages
    Lang {
        #[arg(value_enum)]
        language: Language,

        /// Print the automaton as DOT instead of a summary
        #[arg(long)]
        dot: bool,

        /// Minimization algorithm, or `none` for the raw construction
        #[arg(long, value_enum, default_value_t = MinimizeChoice::Hopcroft)]
        minimize: MinimizeChoice,
    },
}

/// Minimization choices exposed on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum MinimizeChoice {
    #[default]
    Hopcroft,
    Moore,
    Brzozowski,
    None,
}

impl From<MinimizeChoice> for Option<Minimization> {
    fn from(value: MinimizeChoice) -> Self {
        match value {
            MinimizeChoice::Hopcroft => Some(Minimization::Hopcroft),
            MinimizeChoice::Moore => Some(Minimization::Moore),
            MinimizeChoice::Brzozowski => Some(Minimization::Brzozowski),
            MinimizeChoice::None => None,
        }
    }
}

/// Install logging from the CLI flags, falling back to the environment.
pub fn init(cli: &Cli) {
    if let Err(e) = init_logging(cli.log_level.as_deref(), cli.log_format) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}

/// Run a parsed command, writing results to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Dot { pattern, minimize } => dot_command(&pattern, minimize.into(), out),
        Commands::Match { pattern, inputs } => match_command(&pattern, &inputs, out),
        Commands::Lang {
            language,
            dot,
            minimize,
        } => lang_command(language, dot, minimize.into(), out),
    }
}

fn dot_command(pattern: &str, algorithm: Option<Minimization>, out: &mut impl Write) -> Result<()> {
    let graph = match algorithm {
        Some(algorithm) => regex::compile_with(pattern, algorithm)?,
        None => regex::compile(pattern)?,
    };
    info!(states = graph.num_states(), "built automaton");
    write!(out, "{}", graph.to_dot())?;
    Ok(())
}

fn match_command(pattern: &str, inputs: &[String], out: &mut impl Write) -> Result<()> {
    let graph = regex::compile_with(pattern, Minimization::default())?;
    for input in inputs {
        let verdict = if graph.accepts(input) { "accept" } else { "reject" };
        writeln!(out, "{verdict}\t{input}")?;
    }
    Ok(())
}

fn lang_command(
    language: Language,
    dot: bool,
    algorithm: Option<Minimization>,
    out: &mut impl Write,
) -> Result<()> {
    let graph = language.build(algorithm)?;
    info!(%language, states = graph.num_states(), "built language");
    if dot {
        write!(out, "{}", graph.to_dot())?;
    } else {
        writeln!(out, "{language}: {}", summary(&graph))?;
    }
    Ok(())
}

fn summary(graph: &StateGraph) -> String {
    format!(
        "{} states, {} transitions, {} accepting{}",
        graph.num_states(),
        graph.num_transitions(),
        graph.accepting_states().count(),
        if graph.is_deterministic() {
            ", deterministic"
        } else {
            ""
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dot_command() {
        let out = run_args(&["regalg", "dot", "ab*"]).unwrap();
        assert!(out.starts_with("digraph Automaton {\n"));
        assert!(out.contains("0 -> 1 [label=\"a\"]"));
        assert!(out.contains("1 -> 1 [label=\"b\"]"));
    }

    #[test]
    fn test_dot_without_minimization_keeps_epsilons() {
        let out = run_args(&["regalg", "dot", "a*", "--minimize", "none"]).unwrap();
        assert!(out.contains("style=dashed"));
    }

    #[test]
    fn test_match_command() {
        let out = run_args(&["regalg", "match", "(a|b)*ab(a|b)*", "aab", "ba"]).unwrap();
        assert_eq!(out, "accept\taab\nreject\tba\n");
    }

    #[test]
    fn test_match_accepts_signed_inputs() {
        let out = run_args(&["regalg", "match", "[+-]{0,1}(0|[1-9][0-9]*)", "-0", "007"]).unwrap();
        assert_eq!(out, "accept\t-0\nreject\t007\n");
    }

    #[test]
    fn test_match_requires_inputs() {
        assert!(Cli::try_parse_from(["regalg", "match", "a"]).is_err());
    }

    #[test]
    fn test_lang_summary() {
        let out = run_args(&["regalg", "lang", "keywords", "--minimize", "moore"]).unwrap();
        assert!(out.starts_with("keywords: "));
        assert!(out.trim_end().ends_with("deterministic"));
    }

    #[test]
    fn test_lang_dot() {
        let out = run_args(&["regalg", "lang", "list", "--dot"]).unwrap();
        assert!(out.contains("label=\"\\\\[\""));
        assert!(out.contains("doublecircle"));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let error = run_args(&["regalg", "dot", "(ab"]).unwrap_err();
        assert!(error.to_string().contains("position 0"));
    }

    #[test]
    fn test_global_logging_flags() {
        let cli = Cli::try_parse_from([
            "regalg",
            "lang",
            "integer",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Lang {
                language: Language::Integer,
                dot: false,
                minimize: MinimizeChoice::Hopcroft,
            }
        ));
    }
}
