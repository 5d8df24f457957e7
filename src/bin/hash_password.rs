//! Prints an Argon2 hash for the `ADMIN_PASSWORD_HASH` setting
//!
//! Usage: `hash_password <password>` or pipe the password on stdin.

use std::io::{self, BufRead};
use std::process::ExitCode;

use showcase::auth::hash_password;

fn main() -> ExitCode {
    let password = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut line = String::new();
            if let Err(err) = io::stdin().lock().read_line(&mut line) {
                eprintln!("failed to read password: {}", err);
                return ExitCode::FAILURE;
            }
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        eprintln!("usage: hash_password <password>");
        return ExitCode::FAILURE;
    }

    match hash_password(&password) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
