use clap::Parser;
use mfl_cli::args::Args;
use mfl_cli::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.output.verbose, args.output.quiet);

    match mfl_cli::run(&args) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("mfl: {e}");
            ExitCode::from(e.exit_status())
        }
    }
}
