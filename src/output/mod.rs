//! Console diagnostics.
//!
//! - [`terminal`] - coloured status lines

mod terminal;

pub use terminal::{
    format_address_pool, format_failure, format_received, print_address_pool, print_failure,
    print_received, print_request,
};
