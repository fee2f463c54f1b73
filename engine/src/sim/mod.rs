mod forces;
mod manager;
mod types;

pub use forces::{AIR_RHO, SEA_WATER_RHO};
pub use manager::{Manager, SimOptions};
pub use types::{AgentState, ForceBreakdown, FullState, SailSide, StepDebug};
