//! Bravia JSON-RPC operations organized by service
//!
//! This module contains the individual API operations, organized by the
//! endpoint they are posted to.

pub mod audio;
pub mod av_content;
pub mod system;

pub use audio::*;
pub use av_content::*;
pub use system::*;
