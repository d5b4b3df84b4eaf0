use affviz::cli;
use affviz::logging::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    ExitCode::from(cli::run(std::env::args().skip(1), &mut std::io::stdout()))
}
