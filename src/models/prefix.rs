//! Canonical delegated-prefix text and the 16-bit site hextet helpers.
//!
//! The prefix is accepted in one fixed textual shape: 21 characters of hex
//! digits and `:`, laid out as `hhhh:hhhh:hhhh:SSSS::`. The first three
//! hextets plus separator form the head, `SSSS` is the site hextet.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Exact length of the canonical prefix text.
pub const PREFIX_TEXT_LEN: usize = 21;

/// Width of the site hextet in bits.
pub const SITE_FIELD_BITS: u8 = 16;

const HEAD: Range<usize> = 0..15;
const SITE_HEXTET: Range<usize> = 15..19;

static PREFIX_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_prefix_shape_regex() -> &'static Regex {
    PREFIX_SHAPE_REGEX.get_or_init(|| {
        Regex::new(&format!(r"^[0-9A-Fa-f:]{{{PREFIX_TEXT_LEN}}}$")).expect("Invalid Regex")
    })
}

/// Structural check only: length 21 and every char in `[0-9A-Fa-f:]`.
///
/// Does not verify that the text parses as eight hextets.
pub fn is_canonical_prefix(text: &str) -> bool {
    get_prefix_shape_regex().is_match(text)
}

/// Mask that keeps the bits above the low `sla_size` bits of the site hextet.
///
/// `sla_size == 0` keeps everything, `sla_size >= 16` keeps nothing.
pub fn site_clearing_mask(sla_size: u8) -> u16 {
    u16::MAX.checked_shl(u32::from(sla_size)).unwrap_or(0)
}

/// Number of bits needed to represent `value` (0 for 0).
pub fn bit_length(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Lower-case hex, zero padded to 4 digits.
pub fn format_hextet(value: u16) -> String {
    format!("{value:04x}")
}

/// Value of the leading hex digits of `text`, stopping at the first non-hex
/// char. Empty or non-hex input gives 0.
fn leading_hex_value(text: &str) -> u16 {
    text.chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u16, |acc, d| (acc << 4) | d as u16)
}

/// A prefix that passed [`is_canonical_prefix`], split into its semantic fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefixAddress {
    head: String,
    site: u16,
}

impl PrefixAddress {
    /// Split canonical prefix text. Returns `None` if the shape check fails.
    pub fn parse(text: &str) -> Option<PrefixAddress> {
        if !is_canonical_prefix(text) {
            return None;
        }
        let head = text.get(HEAD)?;
        let site = text.get(SITE_HEXTET)?;
        Some(PrefixAddress {
            head: head.to_string(),
            site: leading_hex_value(site),
        })
    }

    /// The delegated part, copied unchanged into the pool address.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// The site hextet as found in the input.
    pub fn site(&self) -> u16 {
        self.site
    }
}
