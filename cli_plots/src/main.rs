use clap::Parser;
use logging::{DEFAULT, debug, o};
use std::process;
use suews_plot::Cli;

fn main() {
    let log = DEFAULT.new(o!("function" => "main"));
    debug!(log, "Starting up");

    let cli = Cli::parse();

    if let Err(err) = suews_plot::run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
