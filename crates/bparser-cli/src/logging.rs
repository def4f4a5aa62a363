// Logging and verbosity control

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::Level;

/// Global verbosity level
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Errors only
    Quiet = 0,
    /// Warnings and errors
    Normal = 1,
    /// Info events from the parser
    Verbose = 2,
    /// Per-template debug events
    VeryVerbose = 3,
    /// Per-token trace events
    Trace = 4,
}

impl VerbosityLevel {
    /// Map CLI flags to a level
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return VerbosityLevel::Quiet;
        }
        match verbose {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Get the current verbosity level
    pub fn current() -> Self {
        match VERBOSITY.load(Ordering::Relaxed) {
            0 => VerbosityLevel::Quiet,
            1 => VerbosityLevel::Normal,
            2 => VerbosityLevel::Verbose,
            3 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Set the verbosity level
    pub fn set(level: Self) {
        VERBOSITY.store(level as u8, Ordering::Relaxed);
    }

    /// Check if we should output at this level
    pub fn should_output(&self) -> bool {
        self <= &Self::current()
    }

    /// Maximum tracing level emitted at this verbosity
    pub fn tracing_level(self) -> Level {
        match self {
            VerbosityLevel::Quiet => Level::ERROR,
            VerbosityLevel::Normal => Level::WARN,
            VerbosityLevel::Verbose => Level::INFO,
            VerbosityLevel::VeryVerbose => Level::DEBUG,
            VerbosityLevel::Trace => Level::TRACE,
        }
    }
}

/// Initialize logging based on CLI flags
///
/// Events go to stderr so rendered output on stdout stays clean. Calling this
/// twice keeps the first subscriber.
pub fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::fmt;

    let level = VerbosityLevel::from_flags(verbose, quiet);
    VerbosityLevel::set(level);

    let detailed = level >= VerbosityLevel::VeryVerbose;
    let _ = fmt()
        .with_max_level(level.tracing_level())
        .with_target(detailed)
        .with_file(detailed)
        .with_line_number(detailed)
        .with_writer(std::io::stderr)
        .try_init();
}
