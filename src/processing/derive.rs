//! Pool subnet derivation.

use super::validate::ValidatedConfig;
use crate::models::{format_hextet, site_clearing_mask, PoolAddress};

/// Embed the SLA id into the site hextet and append the pool size.
///
/// The low `sla_size` bits of the site hextet are replaced by `sla_id`, the
/// bits above are kept. Output shape is `<head><site>::/<pool_size>`.
///
/// # Examples
/// ```
/// use dynamic_prefix_pool::models::PoolConfiguration;
/// use dynamic_prefix_pool::processing::{derive, validate};
///
/// let config = PoolConfiguration {
///     pool_name: "roadwarrior".to_string(),
///     prefix_address: "2001:0db8:0000:1234::".to_string(),
///     prefix_size: Some(48),
///     pool_size: 120,
///     sla_size: Some(8),
///     sla_id: 0x5,
/// };
/// let validated = validate(&config).unwrap();
/// assert_eq!(derive(&validated).as_str(), "2001:0db8:0000:1205::/120");
/// ```
pub fn derive(config: &ValidatedConfig) -> PoolAddress {
    let prefix = config.prefix();
    let mask = site_clearing_mask(config.sla_size());
    let site = (prefix.site() & mask) | config.sla_id();

    log::debug!(
        "site hextet {:04x} & {mask:04x} | {:x} => {site:04x}",
        prefix.site(),
        config.sla_id()
    );

    PoolAddress::new(format!(
        "{head}{site}::/{pool_size}",
        head = prefix.head(),
        site = format_hextet(site),
        pool_size = config.pool_size()
    ))
}
