//! Spin core for Spinwheel: winner resolution, eased rotation, the spin
//! state machine, and the option/statistics model around it.
//!
//! Nothing here reads a clock or touches a terminal. Frontends feed absolute
//! millisecond timestamps into [`WheelSession::tick`] and draw the returned
//! [`WheelView`].

/// Tunable durations, turn ranges and option limits.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Pulse animation on the winning segment.
pub mod highlight;
/// The spin state machine.
pub mod machine;
/// Notices and confirmation prompts.
pub mod notice;
/// Wheel options and the color palette.
pub mod option;
/// Typed documents kept in a store.
pub mod persist;
/// Frame geometry for frontends.
pub mod render;
/// Mapping a settled angle to the winning segment.
pub mod resolver;
/// Spin planning and easing.
pub mod rotation;
/// Bulk selection of option indices.
pub mod selection;
/// The session facade frontends drive.
pub mod session;
/// Win counts.
pub mod stats;
/// Key/value storage backends.
pub mod store;
/// The ordered option list.
pub mod wheel;

/// Re-export configuration.
pub use config::WheelConfig;
/// Re-export error types.
pub use error::{WheelError, WheelResult};
/// Re-export state machine types.
pub use machine::{PulseFrame, Resolution, SpinMachine, SpinRequest, SpinState, Step};
/// Re-export notice types.
pub use notice::{AlwaysConfirm, Confirm, NeverConfirm, Notice, Severity};
/// Re-export option types.
pub use option::WheelOption;
/// Re-export persisted document types.
pub use persist::{SavedWheel, SavedWheels, Settings};
/// Re-export render types.
pub use render::{SegmentView, WheelView};
/// Re-export the session.
pub use session::WheelSession;
/// Re-export statistics.
pub use stats::StatisticsLog;
/// Re-export storage backends.
pub use store::{FileStore, MemoryStore, Store};
/// Re-export the option list.
pub use wheel::{AddReport, Wheel};
