mod caller;
mod error;
mod git;
mod ops;
mod prompt;
mod repo;
mod store;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::process;

use error::{Fatal, Result};

// The two prompt strings git passes verbatim as the helper's argument.
const USERNAME_REQUEST: &str = "Username: ";
const PASSWORD_REQUEST: &str = "Password: ";

enum Request {
    Username,
    Password,
}

/// Exactly one argument, with exactly one of the two recognized values.
/// Anything else is the usage error, which shares its message with the
/// caller-trust refusal.
fn parse_request(args: &[String]) -> Result<Request> {
    match args {
        [arg] if arg.as_str() == USERNAME_REQUEST => Ok(Request::Username),
        [arg] if arg.as_str() == PASSWORD_REQUEST => Ok(Request::Password),
        _ => Err(Fatal::Usage),
    }
}

fn run() -> Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args)?;

    let mut table = caller::SystemTable::new();
    let config = git::GitConfig;
    let mut store = store::Keychain;
    let mut prompt = prompt::TerminalPrompt;

    match request {
        Request::Username => ops::get_username(&mut table, &config, &mut store, &mut prompt),
        Request::Password => ops::get_password(&mut table, &config, &mut store, &mut prompt),
    }
}

/// Fatal messages go to the person at the keyboard, not into whatever git
/// redirected our output streams to.
fn report_fatal(err: &Fatal) {
    let message = format!("fatal: {err}\n");
    match OpenOptions::new().write(true).open("/dev/tty") {
        Ok(mut tty) => {
            let _ = tty.write_all(message.as_bytes());
        }
        Err(_) => eprint!("{message}"),
    }
}

fn main() {
    match run() {
        Ok(value) => {
            // Raw credential text on stdout, no trailing newline: git
            // consumes it as-is.
            print!("{value}");
            let _ = io::stdout().flush();
        }
        Err(err) => {
            report_fatal(&err);
            process::exit(-1);
        }
    }
}

// --- Tests --------------------------------------------------------------
