//! Step-based sailboat dynamics.
//!
//! The engine owns the boat's kinematic state and 2D integrator, the
//! stochastic wind/current environment, foil coefficient tables and the
//! orchestrator that turns a `[sail_angle, rudder_angle]` command into one
//! fixed-timestep advance. Rendering, manual control and navigation
//! algorithms are external consumers of the state snapshots produced here.

pub mod math;

mod error;
pub use error::{ConfigError, SimError};

mod config;
pub use config::{BoatConfig, EnvConfig};

mod foil;
pub use foil::{FoilCoeffs, FoilKind, FoilSet, FoilTable};

mod boat;
pub use boat::Boat;

mod environment;
pub use environment::{Environment, Gust};

pub mod sim;
pub use sim::{AgentState, ForceBreakdown, FullState, Manager, SailSide, SimOptions, StepDebug};

mod state_log;
pub use state_log::{LogPhase, StateLog, StateRecord};

pub mod builtins;
