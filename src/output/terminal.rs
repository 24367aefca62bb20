//! Terminal output for the operator.

use crate::models::PoolAddress;
use crate::vici::Packet;
use colored::Colorize;
use std::fmt::Display;

/// Format the derived pool line, address in bold.
///
/// # Arguments
/// * `address` - The derived pool subnet
///
/// # Returns
/// `address_pool: <address>`
pub fn format_address_pool(address: &PoolAddress) -> String {
    format!("address_pool: {}", address.as_str().bold())
}

/// Format the daemon's success value in green.
///
/// # Arguments
/// * `value` - Value of the first key in the daemon reply
///
/// # Returns
/// `Received message: <value>`
pub fn format_received(value: &str) -> String {
    format!("Received message: {}", value.green())
}

/// Format a validation or transport failure with a red `ERROR:` tag.
pub fn format_failure(error: &dyn Display) -> String {
    format!("{} {error}", "ERROR:".on_red())
}

/// Print [`format_address_pool`] to stdout.
pub fn print_address_pool(address: &PoolAddress) {
    println!("{}", format_address_pool(address));
}

/// Print the request in its nested `load-pool { ... }` form.
pub fn print_request(request: &Packet) {
    println!("{request}");
}

/// Print [`format_received`] to stdout.
pub fn print_received(value: &str) {
    println!("{}", format_received(value));
}

/// Print [`format_failure`] to stdout.
pub fn print_failure(error: &dyn Display) {
    println!("{}", format_failure(error));
}
