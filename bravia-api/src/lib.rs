//! High-level Sony Bravia API for television control
//!
//! This crate provides a type-safe API for the "IP control" interface of
//! Sony Bravia televisions. It speaks both dialects the sets expose:
//!
//! - JSON-RPC requests to `/sony/system`, `/sony/avContent` and `/sony/audio`
//!   (see [`operations`] and [`BraviaClient::execute`])
//! - IR remote-control emulation through SOAP envelopes posted to `/sony/IRCC`
//!   (see [`IrCommand`] and [`BraviaClient::send_command`])
//!
//! Requests are authenticated with a pre-shared key sent in the `X-Auth-PSK`
//! header. It uses the private `transport` crate for the HTTP exchange.
//!
//! ```rust,no_run
//! use bravia_api::BraviaClient;
//!
//! let mut client = BraviaClient::new("192.168.1.191", "sony");
//!
//! let playing = client.get_playing_info()?;
//! println!("Now showing: {:?}", playing.title);
//!
//! client.set_volume_level(20)?;
//! client.mute()?;
//! # Ok::<(), bravia_api::ApiError>(())
//! ```

pub mod client;
pub mod command;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod operations;
pub mod request;
pub mod service;
pub mod wol;

pub use client::{BraviaClient, BraviaClientBuilder};
pub use command::{CommandTable, IrCommand};
pub use error::{ApiError, Result};
pub use operation::BraviaOperation;
pub use service::{Service, ServiceInfo};
pub use transport::{HttpResponse, HttpTransport, Transport, TransportError, DEFAULT_TIMEOUT};
