// Fri Jan 16 2026 - Alex

use clap::Parser;
use colored::Colorize;
use js_variant_bridge::ui::cli::{Args, CommandHandler};

fn main() {
    let args = Args::parse();

    if let Err(e) = CommandHandler::new().execute(args) {
        eprintln!("{} {}", "[!]".red(), e.to_string().red());
        std::process::exit(1);
    }
}
