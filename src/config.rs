//! Defaults and command line arguments.

use crate::models::PoolConfiguration;
use crate::processing::ValidationPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Largest pool strongSwan will add.
pub const DEFAULT_POOL_SIZE: u8 = 97;

/// Default charon VICI socket.
pub const DEFAULT_VICI_SOCKET: &str = "/var/run/charon.vici";

/// log4rs file read from the working directory.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Register a DHCPv6-PD derived address pool with strongSwan", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long, env = "POOL_NAME", value_parser = clap::builder::NonEmptyStringValueParser::new(), help = "Name of the pool to load")]
    pub pool_name: String,

    #[arg(short = 'p', long, env = "PREFIX_ADDRESS", help = "Delegated prefix, e.g. 2001:0db8:0000:1234::")]
    pub prefix_address: String,

    #[arg(short = 's', long, env = "POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE, value_parser = clap::value_parser!(u8).range(..=128), help = "CIDR suffix length of the pool")]
    pub pool_size: u8,

    #[arg(short = 'd', long, env = "PREFIX_SIZE", help = "Prefix length delegated by the provider")]
    pub prefix_size: Option<u8>,

    #[arg(short = 'l', long, env = "SLA_SIZE", help = "Bits of the site hextet reserved for the SLA id")]
    pub sla_size: Option<u8>,

    #[arg(short = 'i', long, env = "SLA_ID", default_value = "0", value_parser = parse_sla_id, help = "SLA id, decimal or 0x hex")]
    pub sla_id: u16,

    #[arg(long, env = "REQUIRE_DELEGATION", help = "Reject configurations without prefix and SLA sizes")]
    pub require_delegation: bool,

    #[arg(long, env = "VICI_SOCKET", default_value = DEFAULT_VICI_SOCKET, help = "VICI socket path")]
    pub socket: PathBuf,

    #[arg(long, help = "Print the load-pool request instead of sending it")]
    pub dry_run: bool,

    #[arg(long, env = "LOG_CONFIG", default_value = DEFAULT_LOG_CONFIG, help = "log4rs configuration file")]
    pub log_config: PathBuf,
}

impl Args {
    pub fn pool_configuration(&self) -> PoolConfiguration {
        PoolConfiguration {
            pool_name: self.pool_name.clone(),
            prefix_address: self.prefix_address.clone(),
            prefix_size: self.prefix_size,
            pool_size: self.pool_size,
            sla_size: self.sla_size,
            sla_id: self.sla_id,
        }
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            allow_undelegated: !self.require_delegation,
        }
    }
}

fn parse_sla_id(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid SLA id '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sla_id() {
        assert_eq!(parse_sla_id("5").unwrap(), 5);
        assert_eq!(parse_sla_id("0x1f").unwrap(), 0x1f);
        assert_eq!(parse_sla_id("0XFFFF").unwrap(), 0xFFFF);
        assert!(parse_sla_id("65536").is_err());
        assert!(parse_sla_id("0xg").is_err());
        assert!(parse_sla_id("-1").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from([
            "dynamic-prefix-pool",
            "-n",
            "rw",
            "-p",
            "2001:0db8:0000:1234::",
            "--socket",
            "/tmp/test.vici",
        ])
        .unwrap();
        let config = args.pool_configuration();
        assert_eq!(config.pool_name, "rw");
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.prefix_size, None);
        assert_eq!(config.sla_size, None);
        assert_eq!(config.sla_id, 0);
        assert!(args.validation_policy().allow_undelegated);
    }

    #[test]
    fn test_args_delegation() {
        let args = Args::try_parse_from([
            "dynamic-prefix-pool",
            "--pool-name",
            "rw",
            "--prefix-address",
            "2001:0db8:0000:1234::",
            "-s",
            "120",
            "-d",
            "48",
            "-l",
            "8",
            "-i",
            "0x5",
            "--require-delegation",
        ])
        .unwrap();
        let config = args.pool_configuration();
        assert_eq!(config.pool_size, 120);
        assert_eq!(config.prefix_size, Some(48));
        assert_eq!(config.sla_size, Some(8));
        assert_eq!(config.sla_id, 5);
        assert!(!args.validation_policy().allow_undelegated);
    }

    #[test]
    fn test_args_rejected() {
        assert!(Args::try_parse_from(["dynamic-prefix-pool", "-p", "2001:0db8:0000:1234::"]).is_err());
        assert!(Args::try_parse_from(["dynamic-prefix-pool", "-n", "", "-p", "x"]).is_err());
        assert!(
            Args::try_parse_from(["dynamic-prefix-pool", "-n", "rw", "-p", "x", "-s", "129"])
                .is_err()
        );
    }
}
