// Render templates against a parts map

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use bparser::{Parser, ParserStats};
use tracing::{debug, info};

use super::{load_settings, Command};
use crate::{
    data::{load_parts, parse_assignment},
    error::{CliError, CliResult},
    logging::VerbosityLevel,
    output::{print_warning, OutputStyle},
};

/// Where a template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Given on the command line
    Inline(String),
    /// Read from a file
    File(PathBuf),
    /// Read from standard input
    Stdin,
}

impl TemplateSource {
    fn read(&self) -> CliResult<String> {
        match self {
            TemplateSource::Inline(text) => Ok(text.clone()),
            TemplateSource::File(path) => Ok(fs::read_to_string(path)?),
            TemplateSource::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    /// Inline templates get a newline after them; file contents carry their own
    fn terminator(&self) -> &'static str {
        match self {
            TemplateSource::Inline(_) => "\n",
            TemplateSource::File(_) | TemplateSource::Stdin => "",
        }
    }
}

/// Render templates with one shared parser
pub struct RenderCommand {
    sources: Vec<TemplateSource>,
    parts_file: Option<PathBuf>,
    assignments: Vec<String>,
    config: Option<PathBuf>,
    no_cache: bool,
    show_stats: bool,
}

impl RenderCommand {
    pub fn new(sources: Vec<TemplateSource>) -> Self {
        Self {
            sources,
            parts_file: None,
            assignments: Vec::new(),
            config: None,
            no_cache: false,
            show_stats: false,
        }
    }

    pub fn with_parts_file(mut self, parts_file: Option<PathBuf>) -> Self {
        self.parts_file = parts_file;
        self
    }

    pub fn with_assignments(mut self, assignments: Vec<String>) -> Self {
        self.assignments = assignments;
        self
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    pub fn with_no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    pub fn with_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }

    /// Build the parser from settings, the parts file and `--set` values
    pub fn build_parser(&self) -> CliResult<Parser> {
        let mut settings = load_settings(self.config.as_deref())?;
        if self.no_cache {
            settings.enable_cache = false;
        }

        let mut parts = match &self.parts_file {
            Some(path) => load_parts(path)?,
            None => Default::default(),
        };
        for assignment in &self.assignments {
            let (key, value) = parse_assignment(assignment)?;
            parts.insert(key, value);
        }

        if parts.is_empty() && VerbosityLevel::Normal.should_output() {
            print_warning("No parts given; every token will be left as is");
        }

        Ok(settings.build_parser(parts)?)
    }

    /// Render every source in order with one parser
    pub fn render(&self) -> CliResult<(Vec<String>, ParserStats)> {
        if self.sources.is_empty() {
            return Err(CliError::InvalidArgument {
                message: "no templates given; pass TEMPLATE, --file or --stdin".to_string(),
            });
        }

        let mut parser = self.build_parser()?;
        let mut rendered = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            debug!(source = ?source, "Rendering template");
            let template = source.read()?;
            let mut output = parser.run(&template)?;
            output.push_str(source.terminator());
            rendered.push(output);
        }

        let stats = parser.stats();
        info!(
            templates = rendered.len(),
            scans = stats.scans,
            "Rendered templates"
        );
        Ok((rendered, stats))
    }
}

impl Command for RenderCommand {
    fn execute(&self) -> CliResult<()> {
        let (rendered, stats) = self.render()?;
        for output in rendered {
            print!("{}", output);
        }

        if self.show_stats {
            let style = OutputStyle::default();
            eprintln!("{}", style.header("Parser statistics"));
            eprintln!("{}", style.key_value("scans", &stats.scans.to_string()));
            for (name, cache) in [("templates", stats.templates), ("tokens", stats.tokens)] {
                eprintln!(
                    "{}",
                    style.key_value(
                        name,
                        &format!(
                            "{} hits, {} misses, {} entries",
                            cache.hits, cache.misses, cache.entries
                        )
                    )
                );
            }
        }

        Ok(())
    }
}
