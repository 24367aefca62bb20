//! Configuration validation.
//!
//! Checks run in a fixed order and the first failure is returned. A
//! [`ValidatedConfig`] can only be obtained from [`validate`].

use crate::models::{bit_length, PoolConfiguration, PrefixAddress};
use thiserror::Error;

/// Upper bound (exclusive) for the delegated prefix length.
pub const MAX_PREFIX_SIZE: u8 = 64;

/// Smallest pool suffix length the daemon accepts.
pub const MIN_POOL_SIZE: u8 = 97;

/// Longest pool name a VICI section name can carry.
pub const MAX_POOL_NAME_LEN: usize = 255;

/// First violated invariant of a [`PoolConfiguration`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("prefix_size {prefix_size} must be smaller than 64")]
    PrefixSizeTooLarge { prefix_size: u8 },

    #[error("pool_size {pool_size} must be at least 97")]
    PoolSizeTooSmall { pool_size: u8 },

    #[error("prefix_address '{address}' is not 21 characters of [0-9a-fA-F:]")]
    MalformedAddress { address: String },

    #[error("sla_size {sla_size} exceeds the {available} bits left by prefix_size")]
    SlaSizeExceedsAvailableBits { sla_size: u8, available: u8 },

    #[error("sla_id {sla_id:#x} needs {needed} bits but sla_size is {sla_size}")]
    SlaIdExceedsSlaSize { sla_id: u16, needed: u32, sla_size: u8 },

    #[error("{0}")]
    IncompleteDelegationFields(&'static str),

    #[error("pool_name must be 1 to 255 bytes, got {len}")]
    InvalidPoolName { len: usize },
}

/// Policy knobs that are not part of the configuration record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Accept a configuration with neither `prefix_size` nor `sla_size`.
    pub allow_undelegated: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            allow_undelegated: true,
        }
    }
}

/// Proof that a configuration passed every check. Input to the deriver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pool_name: String,
    prefix: PrefixAddress,
    pool_size: u8,
    sla_size: u8,
    sla_id: u16,
}

impl ValidatedConfig {
    pub fn pool_name(&self) -> &str {
        &self.pool_name
    }

    pub fn prefix(&self) -> &PrefixAddress {
        &self.prefix
    }

    pub fn pool_size(&self) -> u8 {
        self.pool_size
    }

    pub fn sla_size(&self) -> u8 {
        self.sla_size
    }

    pub fn sla_id(&self) -> u16 {
        self.sla_id
    }
}

/// Validate with the default policy (no-delegation mode allowed).
pub fn validate(config: &PoolConfiguration) -> Result<ValidatedConfig, ValidationError> {
    validate_with(config, ValidationPolicy::default())
}

/// Validate `config`, stopping at the first violated invariant.
pub fn validate_with(
    config: &PoolConfiguration,
    policy: ValidationPolicy,
) -> Result<ValidatedConfig, ValidationError> {
    let prefix_size = config.prefix_size.unwrap_or(0);
    let sla_size = config.sla_size.unwrap_or(0);

    if prefix_size >= MAX_PREFIX_SIZE {
        return Err(ValidationError::PrefixSizeTooLarge { prefix_size });
    }

    if config.pool_size < MIN_POOL_SIZE {
        return Err(ValidationError::PoolSizeTooSmall {
            pool_size: config.pool_size,
        });
    }

    let prefix = PrefixAddress::parse(&config.prefix_address).ok_or_else(|| {
        ValidationError::MalformedAddress {
            address: config.prefix_address.clone(),
        }
    })?;

    let available = MAX_PREFIX_SIZE - prefix_size;
    if sla_size > available {
        return Err(ValidationError::SlaSizeExceedsAvailableBits {
            sla_size,
            available,
        });
    }

    let needed = bit_length(u64::from(config.sla_id));
    if needed > u32::from(sla_size) {
        return Err(ValidationError::SlaIdExceedsSlaSize {
            sla_id: config.sla_id,
            needed,
            sla_size,
        });
    }

    match (config.prefix_size, config.sla_size) {
        (Some(_), None) => {
            return Err(ValidationError::IncompleteDelegationFields(
                "prefix_size is set but sla_size is missing",
            ))
        }
        (None, Some(_)) => {
            return Err(ValidationError::IncompleteDelegationFields(
                "sla_size is set but prefix_size is missing",
            ))
        }
        _ => {}
    }
    if config.is_undelegated() && !policy.allow_undelegated {
        return Err(ValidationError::IncompleteDelegationFields(
            "prefix_size and sla_size are required",
        ));
    }

    // reported after every delegation check
    let name_len = config.pool_name.len();
    if name_len == 0 || name_len > MAX_POOL_NAME_LEN {
        return Err(ValidationError::InvalidPoolName { len: name_len });
    }

    log::debug!(
        "validated pool '{}' prefix={} prefix_size={prefix_size} sla_size={sla_size} sla_id={:#x}",
        config.pool_name,
        config.prefix_address,
        config.sla_id
    );

    Ok(ValidatedConfig {
        pool_name: config.pool_name.clone(),
        prefix,
        pool_size: config.pool_size,
        sla_size,
        sla_id: config.sla_id,
    })
}
