//! Region resolution. Maps a free-text domain to its canonical market region.

/// Known domain spellings and the canonical region each maps to.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("USA", "USA"),
    ("US", "USA"),
    ("United States", "USA"),
    ("EU", "EU"),
    ("Europe", "EU"),
    ("European Union", "EU"),
    ("India", "India"),
    ("Singapore", "Singapore"),
    ("Australia", "Australia"),
    ("Canada", "Canada"),
    ("UK", "UK"),
    ("United Kingdom", "UK"),
];

/// Canonical region for a free-text domain. Unknown domains pass through unchanged.
pub fn resolve_region(domain: &str) -> String {
    let key = domain.trim();
    REGION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, region)| (*region).to_string())
        .unwrap_or_else(|| domain.to_string())
}
