//! The `load-pool` command.

use super::{Message, Packet, ViciClient, ViciError};
use crate::models::PoolAddress;

pub const LOAD_POOL: &str = "load-pool";

/// Build `load-pool { <pool_name> { addrs = <address> } }`.
pub fn load_pool_request(pool_name: &str, address: &PoolAddress) -> Packet {
    Packet::request(
        LOAD_POOL,
        Message::new().section(pool_name, Message::new().key_value("addrs", address.as_str())),
    )
}

/// Daemon verdict on a `load-pool` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPoolReply {
    Success(String),
    Failure(String),
}

impl LoadPoolReply {
    /// The first key-value decides: a value starting with `y` is success.
    /// Failures carry `errmsg` when the daemon sent one.
    pub fn from_message(message: &Message) -> LoadPoolReply {
        match message.first_key_value() {
            Some((_, value)) if value.starts_with('y') => LoadPoolReply::Success(value),
            Some((_, value)) => {
                LoadPoolReply::Failure(message.get_str("errmsg").unwrap_or(value))
            }
            None => LoadPoolReply::Failure("no reply".to_string()),
        }
    }
}

/// Register `address` as pool `pool_name`. Returns the daemon's success value.
pub async fn load_pool(
    client: &mut ViciClient,
    pool_name: &str,
    address: &PoolAddress,
) -> Result<String, ViciError> {
    let request = load_pool_request(pool_name, address);
    let reply = client.submit(&request).await?;
    match LoadPoolReply::from_message(&reply) {
        LoadPoolReply::Success(value) => {
            log::info!("pool '{pool_name}' loaded with {address}");
            Ok(value)
        }
        LoadPoolReply::Failure(message) => {
            log::warn!("pool '{pool_name}' rejected: {message}");
            Err(ViciError::Rejected(message))
        }
    }
}
