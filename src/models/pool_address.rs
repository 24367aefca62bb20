//! Derived pool subnet text.

use std::fmt;

/// Pool subnet registered with the daemon, e.g. `2001:0db8:0000:1205::/120`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolAddress(String);

impl PoolAddress {
    pub(crate) fn new(address: String) -> PoolAddress {
        PoolAddress(address)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PoolAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
