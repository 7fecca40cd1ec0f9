use std::process::ExitCode;

fn main() -> ExitCode {
    subvention_desk::run()
}
