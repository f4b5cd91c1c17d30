use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use searchq::config::CONFIG;
use searchq::runner::QueryRunner;

/// Query the local search service and print its JSON response.
#[derive(Debug, Parser)]
#[command(name = "searchq", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Search query; prompts on stdin when omitted. Extra values are ignored.
    #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    query: Vec<String>,
}

/// Puts an escape after the program name so every user argument, `--`
/// included, lands in `query` verbatim.
fn escaped_args<I, T>(raw: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut raw = raw.into_iter().map(Into::into);
    let mut args: Vec<OsString> = raw.next().into_iter().collect();
    args.push(OsString::from("--"));
    args.extend(raw);
    args
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(escaped_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            // Only reachable on arguments that are not valid UTF-8.
            println!("Error: {}", e.kind().as_str().unwrap_or("invalid arguments"));
            return ExitCode::from(1);
        }
    };

    // Diagnostics go to stderr so stdout only carries results.
    tracing_subscriber::fmt()
        .with_max_level(CONFIG.log_level)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let mut runner = match QueryRunner::new(CONFIG.request_timeout) {
        Ok(runner) => runner,
        Err(e) => {
            println!("Error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let code = runner.run(&cli.query, &mut input, &mut out).await;
    let _ = out.flush();

    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Vec<String> {
        Cli::try_parse_from(escaped_args(args.iter().copied()))
            .unwrap()
            .query
    }

    #[test]
    fn test_flag_lookalikes_are_queries() {
        for q in ["--help", "-h", "-V", "--version", "-x", "--"] {
            assert_eq!(parse(&["searchq", q]), vec![q.to_string()], "argument {q:?}");
        }
    }

    #[test]
    fn test_first_argument_leads() {
        assert_eq!(parse(&["searchq", "rust", "--", "ignored"]), vec!["rust", "--", "ignored"]);
        assert_eq!(parse(&["searchq", "--", "x"]), vec!["--", "x"]);
    }

    #[test]
    fn test_no_argument_is_empty() {
        assert!(parse(&["searchq"]).is_empty());
    }
}
