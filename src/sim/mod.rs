//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical one-second steps only; wall time stays in `crate::clock`
//! - Seeded RNG only
//! - No storage or platform dependencies

pub mod hit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use hit::{HitReport, resolve_hit};
pub use state::{Dirt, DirtKind, FieldBounds, Phase, Session, Tool};
pub use tick::{PowerUp, Transition, activate_power_up, advance_level, retry, start, tick};
