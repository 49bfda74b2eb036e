/// Spindle CLI
///
/// Drives the runtime's built-in modules, index translation, and platform
/// configuration from the shell. Useful for debugging guest-visible errors.

use spindle_core::cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
