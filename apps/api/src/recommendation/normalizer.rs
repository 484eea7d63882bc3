//! Taxonomy normalizer. Maps a free-text role to a taxonomy-native occupation code.

use crate::models::skill::Taxonomy;

/// (lower-cased role, taxonomy, occupation code)
const OCCUPATION_CODES: &[(&str, Taxonomy, &str)] = &[
    ("data scientist", Taxonomy::Onet, "15-2051.00"),
    ("data scientist", Taxonomy::Esco, "252901"),
    ("software engineer", Taxonomy::Onet, "15-1252.00"),
    ("software engineer", Taxonomy::Esco, "251202"),
];

/// Returns the occupation code for `role` in `taxonomy`, or `role` unchanged on a miss.
///
/// Lookup is case-insensitive and ignores surrounding whitespace. The code only sharpens
/// the retrieval query; nothing downstream is gated on it.
pub fn normalize(role: &str, taxonomy: Taxonomy) -> String {
    let key = role.trim().to_lowercase();
    OCCUPATION_CODES
        .iter()
        .find(|(title, t, _)| *title == key && *t == taxonomy)
        .map(|(_, _, code)| (*code).to_string())
        .unwrap_or_else(|| role.to_string())
}
