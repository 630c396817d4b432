//! memory binary
//!
//! Answers one get/set request from standard input.

use std::fs::File;
use std::io::{self, Write};
use std::os::fd::AsFd;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use memory::protocol::INVALID_MESSAGE;
use memory::transfer::write_fully;
use memory::{Config, Session, Status};
use tracing_subscriber::{fmt, EnvFilter};

/// Answer one get/set request read from standard input
///
/// Only `--help` and `--version` are recognised. Any other argument is
/// rejected like a malformed request: `Invalid Command` and exit status 1.
#[derive(Parser, Debug)]
#[command(name = "memory")]
#[command(about = "Answer one get/set request read from standard input")]
#[command(version)]
struct Args {}

fn main() -> ExitCode {
    // stderr belongs to the protocol; diagnostics only when RUST_LOG asks for them
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(true)
            .init();
    }

    if let Err(e) = Args::try_parse() {
        return match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                ExitCode::SUCCESS
            }
            _ => {
                tracing::debug!("rejected arguments: {}", e);
                reject()
            }
        };
    }

    tracing::debug!("memory v{}", memory::VERSION);

    // Read fd 0 directly: a buffered StdinLock would take bytes past the set
    // body off the descriptor, where a process sharing stdin expects them
    let input = match io::stdin().as_fd().try_clone_to_owned() {
        Ok(fd) => File::from(fd),
        Err(e) => {
            tracing::warn!("failed to open standard input: {}", e);
            return reject();
        }
    };

    let session = Session::new(
        input,
        io::stdout().lock(),
        io::stderr().lock(),
        Config::default(),
    );
    let status = session.run();

    ExitCode::from(status.exit_code())
}

/// Fail the invocation before a session starts, the way a bad request does
fn reject() -> ExitCode {
    let mut stderr = io::stderr().lock();
    let _ = write_fully(&mut stderr, INVALID_MESSAGE).and_then(|()| stderr.flush());
    ExitCode::from(Status::Invalid.exit_code())
}
