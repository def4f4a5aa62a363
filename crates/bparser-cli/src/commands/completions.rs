// Generate shell completion scripts

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use super::Command;
use crate::{error::CliResult, router::Cli};

pub struct CompletionsCommand {
    shell: Shell,
}

impl CompletionsCommand {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    /// Write the script for the chosen shell
    pub fn write_to(&self, out: &mut dyn io::Write) {
        let mut command = Cli::command();
        generate(self.shell, &mut command, "bparser", out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self) -> CliResult<()> {
        self.write_to(&mut io::stdout());
        Ok(())
    }
}
