//! Binary entrypoint that serves the chat dashboard.

use std::process::ExitCode;

use chat_dashboard::start;

/// Start the HTTP host with configuration taken from the environment.
fn main() -> ExitCode {
    start::run()
}
