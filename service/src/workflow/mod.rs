//! Scripted upgrade stages

pub mod simulator;
pub mod stage;

pub use simulator::Simulator;
pub use stage::UpgradeStage;

/// Stage label written on every event
pub const UPGRADE_STAGE: &str = "Upgrade";

/// Status written on every simulated sub-step
pub const STATUS_SUCCESS: &str = "SUCCESS";
