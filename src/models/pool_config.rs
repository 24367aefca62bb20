//! Pool configuration as supplied by the command line layer.

/// Input record for one pool registration. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfiguration {
    /// Name of the pool section sent to the daemon.
    pub pool_name: String,
    /// Canonical prefix text, e.g. `2001:0db8:0000:1234::`.
    pub prefix_address: String,
    /// Bits delegated by the upstream provider (None when not delegated).
    pub prefix_size: Option<u8>,
    /// CIDR suffix length published for the pool.
    pub pool_size: u8,
    /// Bits of the site hextet reserved for the SLA id (None when unused).
    pub sla_size: Option<u8>,
    /// SLA id embedded into the site hextet.
    pub sla_id: u16,
}

impl PoolConfiguration {
    /// True when neither `prefix_size` nor `sla_size` is set.
    pub fn is_undelegated(&self) -> bool {
        self.prefix_size.is_none() && self.sla_size.is_none()
    }
}
