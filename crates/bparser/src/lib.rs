#![warn(missing_docs)]

//! Bracket placeholder parser
//!
//! Substitutes `{key}` tokens in templates with values from a shared parts
//! map, optionally piping each value through a chain of single-letter filters
//! (`{key-su}` singularizes, then underscores). Work is memoized per template
//! and per token, so one parser can serve many templates over the same data.
//!
//! ```
//! use bparser::{value::parts_from, Parser, ParserConfig};
//!
//! let mut parser = Parser::with_parts(
//!     ParserConfig::default(),
//!     parts_from([("model", "blogPosts")]),
//! )
//! .unwrap();
//!
//! assert_eq!(parser.run("struct {model-sc};").unwrap(), "struct BlogPost;");
//! assert_eq!(parser.run("table {model-u}").unwrap(), "table blog_posts");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod filters;
pub mod grammar;
pub mod inflector;
pub mod parser;
pub mod settings;
pub mod value;

pub use cache::{CacheStats, MemoCache};
pub use crate::config::ParserConfig;
pub use error::{FilterError, ParserError, Result};
pub use filters::{BuiltinFilter, Filter, FilterSet};
pub use grammar::{Occurrence, Occurrences, TokenPattern};
pub use parser::{Parser, ParserBuilder, ParserStats};
pub use settings::{FilterBinding, ParserSettings, SettingsLoader};
pub use value::{Parts, Value};
