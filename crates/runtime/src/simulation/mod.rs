//! Session state and the turn engine that advances it.
//!
//! - [`GameSession`] owns every piece of mutable simulation state
//! - [`TurnEngine`] resolves one [`PlayerIntent`] per tick through the
//!   [`TurnPhase`] state machine
//! - [`transition`] handles descents, portals, and companion placement

mod intent;
mod messages;
mod phase;
mod session;
mod tick;
pub mod transition;

pub use intent::PlayerIntent;
pub use messages::MessageLog;
pub use phase::{PhaseTransitionError, TurnPhase};
pub use session::{GameSession, SessionConfig};
pub use tick::{TickReport, TurnEngine};
pub use transition::{descent_heal, find_free_near};
