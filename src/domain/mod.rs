//! Domain layer: identities, player records, the session registry, and
//! the outbound event system.
//!
//! Nothing in here performs I/O. The registry is a plain owned value;
//! the event bus only moves values between tasks.

pub mod event_bus;
pub mod game_event;
pub mod player;
pub mod player_id;
pub mod session_registry;
pub mod team;

pub use event_bus::EventBus;
pub use game_event::{Delivery, Recipient, ServerEvent};
pub use player::{PlayerRecord, Vec3};
pub use player_id::PlayerId;
pub use session_registry::{HitOutcome, SessionRegistry};
pub use team::{Team, TeamCounts};
