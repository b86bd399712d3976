// Fri Jan 16 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "js-variant-bridge")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Evaluate JavaScript with QuickJS and print the result as JSON", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// JSON session config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub pretty: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate inline code and print the converted result
    Eval(EvalArgs),
    /// Run a script file as a top-level program
    Run(RunArgs),
}

#[derive(Parser, Debug)]
pub struct EvalArgs {
    pub code: String,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    pub path: PathBuf,

    /// Code evaluated after the file, printed like `eval`
    #[arg(short, long)]
    pub then: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eval() {
        let args = Args::try_parse_from(["js-variant-bridge", "eval", "1 + 1", "--pretty"]).unwrap();
        assert!(args.pretty);
        assert_eq!(args.log_level, "warn");
        match args.command {
            Command::Eval(eval) => assert_eq!(eval.code, "1 + 1"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_run() {
        let args = Args::try_parse_from([
            "js-variant-bridge", "--config", "bridge.json", "run", "main.js", "--then", "result",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("bridge.json")));
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.path, PathBuf::from("main.js"));
                assert_eq!(run.then.as_deref(), Some("result"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
