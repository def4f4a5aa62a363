// Show the active filter letter bindings

use std::path::PathBuf;

use super::{load_settings, Command};
use crate::{error::CliResult, output::OutputStyle};

/// List filter letters and the transforms they are bound to
pub struct FiltersCommand {
    config: Option<PathBuf>,
}

impl FiltersCommand {
    pub fn new(config: Option<PathBuf>) -> Self {
        Self { config }
    }

    pub fn bindings(&self) -> CliResult<Vec<(char, String)>> {
        let filters = load_settings(self.config.as_deref())?.filter_set()?;
        Ok(filters
            .bindings()
            .map(|(letter, name)| (letter, name.to_string()))
            .collect())
    }
}

impl Command for FiltersCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        println!("{}", style.header("Filter letters"));
        for (letter, name) in self.bindings()? {
            println!("{}", style.key_value(&letter.to_string(), &name));
        }
        Ok(())
    }
}
