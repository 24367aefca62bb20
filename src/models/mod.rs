//! Domain models for pool derivation.
//!
//! - [`PoolConfiguration`] - the input record
//! - [`PrefixAddress`] - canonical prefix text split into head and site hextet
//! - [`PoolAddress`] - the derived pool subnet

mod pool_address;
mod pool_config;
mod prefix;

// Re-export public types
pub use pool_address::PoolAddress;
pub use pool_config::PoolConfiguration;
pub use prefix::{
    bit_length, format_hextet, is_canonical_prefix, site_clearing_mask, PrefixAddress,
    PREFIX_TEXT_LEN, SITE_FIELD_BITS,
};
