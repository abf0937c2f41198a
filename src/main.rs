use colored::Colorize;
use tracing_subscriber::EnvFilter;

use propath::cli::CommandLineInterface;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "propath=debug",
        _ => "propath=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let command_line_interface = CommandLineInterface::load();
    init_tracing(command_line_interface.verbose);
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
