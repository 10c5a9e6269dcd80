//! Baleada Utilities CLI

use baleada_utilities::{Cli, UtilitiesError};
use std::process;

fn main() {
    let mut cli = Cli::new();

    match cli.run() {
        Ok(()) => {}
        Err(UtilitiesError::Io(e)) => {
            eprintln!("IO Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
