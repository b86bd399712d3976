// Fri Jan 16 2026 - Alex

use super::args::{Args, Command, EvalArgs, RunArgs};
use crate::config::SessionConfig;
use crate::scripting::{Session, Variant};
use crate::utils::logging;
use colored::Colorize;

pub struct CommandHandler {
    pretty: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        logging::init_logger(logging::level_from_str(&args.log_level));

        if args.no_color {
            colored::control::set_override(false);
        }
        self.pretty = args.pretty;

        let config = match &args.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        let mut session = Session::with_config(config)?;

        match args.command {
            Command::Eval(eval_args) => self.handle_eval(&mut session, eval_args),
            Command::Run(run_args) => self.handle_run(&mut session, run_args),
        }
    }

    fn handle_eval(&self, session: &mut Session, args: EvalArgs) -> anyhow::Result<()> {
        log::info!("Executing eval command");
        let result = session.eval(&args.code);
        self.print_result(session, result)
    }

    fn handle_run(&self, session: &mut Session, args: RunArgs) -> anyhow::Result<()> {
        log::info!("Executing run command for {:?}", args.path);

        if !session.load_file(&args.path) {
            anyhow::bail!("{}", session.get_error());
        }
        eprintln!("{}", format!("Loaded {}", args.path.display()).green());

        match args.then {
            Some(code) => {
                let result = session.eval(&code);
                self.print_result(session, result)
            }
            None => Ok(()),
        }
    }

    /// `Null` with a recorded error is a failure; a genuine `null` result is printed.
    fn print_result(&self, session: &Session, result: Variant) -> anyhow::Result<()> {
        if result.is_null() && !session.get_error().is_empty() {
            anyhow::bail!("{}", session.get_error());
        }
        println!("{}", result.to_json_string(self.pretty)?);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
