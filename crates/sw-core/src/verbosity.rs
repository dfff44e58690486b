//! Run verbosity level

use crate::error::{CoreError, CoreResult};

/// How much informational output a run emits.
///
/// The level changes only the granularity of logging around each phase; it
/// never changes which operations execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Info and above
    #[default]
    Normal,
    /// Debug and above
    Verbose,
}

impl Verbosity {
    /// Build from the two CLI-style flags.
    ///
    /// Setting both at once is a configuration error, caught before any
    /// database contact.
    pub fn from_flags(verbose: bool, quiet: bool) -> CoreResult<Self> {
        match (verbose, quiet) {
            (true, true) => Err(CoreError::ConfigInvalid {
                message: "verbose and quiet are mutually exclusive".to_string(),
            }),
            (true, false) => Ok(Self::Verbose),
            (false, true) => Ok(Self::Quiet),
            (false, false) => Ok(Self::Normal),
        }
    }

    /// Filter level for the log facade
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Error,
            Self::Normal => log::LevelFilter::Info,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}
