//! Power tracking and device-state reconciliation for Sony Bravia televisions
//!
//! This crate sits between a home-automation host and [`bravia_api`]. It
//! polls the set, keeps a projection of what the host's virtual devices
//! should show (status label, source, control and channel selectors,
//! volume), and turns host commands into device requests.
//!
//! ```rust,no_run
//! use bravia_state::{AdapterConfig, DeviceUpdate, TvController};
//!
//! let config = AdapterConfig::new("192.168.1.191", "sony").with_volume_control(true);
//! let mut controller = TvController::new(config)?;
//!
//! let mut updates: Vec<DeviceUpdate> = Vec::new();
//! controller.on_heartbeat(&mut updates);
//! for update in &updates {
//!     println!("unit {} -> {} {:?}", update.unit.number(), update.n_value, update.s_value);
//! }
//! # Ok::<(), bravia_state::StateError>(())
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod levels;
pub mod logging;
pub mod playing_time;
pub mod power;
pub mod projection;
pub mod publisher;
pub mod reconciler;

pub use config::AdapterConfig;
pub use controller::TvController;
pub use error::{Result, StateError};
pub use levels::{ControlLevel, SourceLevel};
pub use logging::{init_logging, init_logging_from_env, LoggingMode};
pub use playing_time::{calc_time, playing_time, PlayingTime};
pub use power::{PowerState, PowerTracker};
pub use projection::{DeviceProjection, Label};
pub use publisher::{DeviceDefinition, DeviceKind, DevicePublisher, DeviceUnit, DeviceUpdate};
pub use reconciler::Reconciler;
