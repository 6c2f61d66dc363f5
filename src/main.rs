//! bookshelf entry point
//!
//! Parses arguments and hands off to the CLI module. Any error is printed to
//! stderr and the process exits non-zero.

use bookshelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
