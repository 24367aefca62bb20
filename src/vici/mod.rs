//! strongSwan VICI control protocol.
//!
//! - [`message`] - message tree and element encoding
//! - [`packet`] - packet types and length framing
//! - [`client`] - Unix socket client
//! - [`load_pool`] - the `load-pool` request and its reply

mod client;
mod load_pool;
mod message;
mod packet;

use thiserror::Error;

// Re-export public types and functions
pub use client::ViciClient;
pub use load_pool::{load_pool, load_pool_request, LoadPoolReply, LOAD_POOL};
pub use message::{Message, Value};
pub use packet::{Packet, MAX_PACKET_LEN};

#[derive(Error, Debug)]
pub enum ViciError {
    #[error("Connection to {path} failed: {source}")]
    Connect {
        path: String,
        source: std::io::Error,
    },

    #[error("VICI socket I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("name '{0}' is longer than 255 bytes")]
    NameTooLong(String),

    #[error("value of '{key}' is {len} bytes, limit is 65535")]
    ValueTooLong { key: String, len: usize },

    #[error("packet of {0} bytes is too large")]
    PacketTooLarge(usize),

    #[error("Unable to parse return message: {0}")]
    Decode(String),

    #[error("unexpected packet type {0}")]
    UnexpectedPacket(u8),

    #[error("daemon does not know command '{0}'")]
    UnknownCommand(String),

    #[error("{0}")]
    Rejected(String),
}
