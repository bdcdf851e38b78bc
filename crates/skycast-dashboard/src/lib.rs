//! Skycast dashboard: state, reducer and the async runtime that drives it.
//!
//! Events flow in, the pure reducer produces the next state plus effects,
//! and the runtime executes the effects as background tasks whose outcomes
//! come back as events.

pub mod commands;
pub mod effects;
pub mod error_mapping;
pub mod events;
pub mod reducer;
pub mod render;
pub mod runtime;
pub mod sequence;
pub mod state;

pub use commands::{help_text, parse_line, Input};
pub use effects::DashboardEffect;
pub use events::{CurrentQuery, DashboardEvent};
pub use reducer::{update, Transition};
pub use render::render;
pub use runtime::Dashboard;
pub use sequence::{RequestCategory, RequestSequencer, Ticket};
pub use state::{DashboardSettings, DashboardState, Notification};
