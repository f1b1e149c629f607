pub mod scheduler;
pub mod simulate;
pub mod watch;

pub use scheduler::TickScheduler;
pub use simulate::{SimulateConfig, SimulateMode, SimulationReport};
pub use watch::WatchMode;
