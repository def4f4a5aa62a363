// bparser CLI entry point

use bparser_cli::{output, router::CommandRouter, VerbosityLevel};

fn main() {
    if let Err(e) = CommandRouter::route() {
        output::print_error(&e.report(VerbosityLevel::current()));
        std::process::exit(1);
    }
}
