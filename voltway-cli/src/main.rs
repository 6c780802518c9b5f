//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = voltway_cli::run() {
        eprintln!("voltway: {err}");
        std::process::exit(1);
    }
}
