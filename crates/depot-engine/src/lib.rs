mod engine;
mod report;
mod script;
mod unpack;

pub use engine::TransitionEngine;
pub use report::{PackageReport, TransitionOutcome};
pub use script::{LifecycleMode, LifecycleRunner, ProcessLifecycleRunner, LIFECYCLE_SCRIPT};
pub use unpack::{CommandUnpacker, Unpacker};
