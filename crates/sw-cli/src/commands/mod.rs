//! CLI command implementations

pub(crate) mod new;
pub(crate) mod status;
pub(crate) mod up;
