// List the tokens a template contains

use std::path::PathBuf;

use super::{load_settings, Command};
use crate::error::CliResult;

/// One recognized token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub token: String,
    pub key: String,
    pub filters: Option<String>,
    pub start: usize,
    pub end: usize,
}

/// Show the tokens recognized under the active settings, without resolving them
pub struct TokensCommand {
    template: String,
    config: Option<PathBuf>,
}

impl TokensCommand {
    pub fn new(template: String) -> Self {
        Self {
            template,
            config: None,
        }
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    pub fn list(&self) -> CliResult<Vec<TokenRow>> {
        let parser = load_settings(self.config.as_deref())?.build_parser(Default::default())?;
        let rows = parser
            .tokens(&self.template)?
            .into_iter()
            .map(|occurrence| TokenRow {
                token: occurrence.full_match.to_string(),
                key: occurrence.key.to_string(),
                filters: occurrence.filters.map(str::to_string),
                start: occurrence.start,
                end: occurrence.end,
            })
            .collect();
        Ok(rows)
    }
}

impl Command for TokensCommand {
    fn execute(&self) -> CliResult<()> {
        for row in self.list()? {
            println!(
                "{}..{}\t{}\t{}\t{}",
                row.start,
                row.end,
                row.token,
                row.key,
                row.filters.as_deref().unwrap_or("-")
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_tokens_in_order() {
        let rows = TokensCommand::new("a {one} b {two-lU} {}".to_string())
            .list()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].token, "{one}");
        assert_eq!(rows[0].filters, None);
        assert_eq!((rows[0].start, rows[0].end), (2, 7));
        assert_eq!(rows[1].key, "two");
        assert_eq!(rows[1].filters.as_deref(), Some("lU"));
    }
}
