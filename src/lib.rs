//! Derive an IPv6 pool subnet from a delegated prefix and load it into
//! strongSwan over VICI.

pub mod config;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod vici;

use config::Args;
use models::{PoolAddress, PoolConfiguration};
use processing::{derive, validate_with, ValidatedConfig, ValidationError, ValidationPolicy};
use std::error::Error;
use std::path::Path;
use vici::ViciClient;

/// Validate `config` and derive its pool address.
pub fn prepare_pool(
    config: &PoolConfiguration,
    policy: ValidationPolicy,
) -> Result<(ValidatedConfig, PoolAddress), ValidationError> {
    let validated = validate_with(config, policy).inspect_err(|e| {
        log::warn!("configuration for pool '{}' rejected: {e}", config.pool_name);
    })?;
    let address = derive(&validated);
    Ok((validated, address))
}

/// Connect to the daemon at `socket` and load the pool. Returns the daemon's
/// success value.
pub async fn register_pool(
    socket: &Path,
    pool_name: &str,
    address: &PoolAddress,
) -> Result<String, vici::ViciError> {
    let mut client = ViciClient::connect(socket).await?;
    vici::load_pool(&mut client, pool_name, address).await
}

/// Full run for parsed command line arguments.
pub async fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.pool_configuration();
    let (validated, address) = prepare_pool(&config, args.validation_policy())?;
    output::print_address_pool(&address);

    if args.dry_run {
        output::print_request(&vici::load_pool_request(validated.pool_name(), &address));
        return Ok(());
    }

    let value = register_pool(&args.socket, validated.pool_name(), &address).await?;
    output::print_received(&value);
    Ok(())
}
