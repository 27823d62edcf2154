//! Call-site normalization.
//!
//! Frames that differ only by instruction pointer collapse into one key:
//! `created by foo.bar 0x4a2f10` becomes `created by foo.bar`.

use crate::utils::config::ADDRESS_MARKER;

/// Strip an address suffix from a frame name
///
/// Cuts the name just before the first `0x`, and also drops the character
/// preceding it when there is one.
pub fn normalize_call_site(name: &str) -> String {
    let Some(idx) = name.find(ADDRESS_MARKER) else {
        return name.to_string();
    };

    let head = &name[..idx];
    let cut = head
        .char_indices()
        .next_back()
        .map(|(pos, _)| pos)
        .unwrap_or(idx);

    name[..cut].to_string()
}
