use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::Catalog;
use crate::models::{OrderCandidate, Size};

static SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(small|medium|large)\b").expect("valid size regex"));

/// Looks for a menu pizza name (anywhere in the text) and a standalone size
/// word. Both must be present. The first pizza in menu order wins, and the
/// first size word in the text wins.
pub fn extract_order_candidate(catalog: &Catalog, text: &str) -> Option<OrderCandidate> {
    let lower = text.to_lowercase();

    let name = catalog
        .offerings()
        .iter()
        .find(|offering| lower.contains(&offering.name.to_lowercase()))?
        .name
        .clone();

    let size = SIZE_PATTERN
        .find(&lower)
        .and_then(|found| Size::parse(found.as_str()))?;

    Some(OrderCandidate { name, size })
}
