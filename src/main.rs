use colored::Colorize;
use std::process;

fn main() {
    if let Err(e) = cmdshell::cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if cmdshell::error::is_input_error(&e) {
            eprintln!("Run 'cmdshell help' for usage.");
        }
        process::exit(1);
    }
}
