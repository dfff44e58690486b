//! sw-engine - Migration orchestration engine for Stepwise
//!
//! Composes the applied-migration ledger, the per-step executor, and the
//! run orchestrator on top of the `sw-db` database abstraction.

pub mod error;
pub mod executor;
pub mod ledger;
pub mod orchestrator;
pub mod subprocess;

pub use error::{EngineError, EngineResult};
pub use executor::RunContext;
pub use ledger::Ledger;
pub use orchestrator::{Orchestrator, RunSummary};
