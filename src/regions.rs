//! Region name to news-API country code lookup.
//!
//! Matching is case-insensitive and ignores surrounding whitespace. Any name
//! not in the table, and the explicit worldwide names, resolve to `None`,
//! meaning "no country filter".

/// Region names (lower-case) and their two-letter country codes.
const REGIONS: &[(&str, &str)] = &[
    ("usa", "us"),
    ("us", "us"),
    ("united states", "us"),
    ("uk", "gb"),
    ("united kingdom", "gb"),
    ("britain", "gb"),
    ("india", "in"),
    ("canada", "ca"),
    ("australia", "au"),
    ("germany", "de"),
    ("france", "fr"),
    ("japan", "jp"),
    ("brazil", "br"),
    ("singapore", "sg"),
    ("pakistan", "pk"),
    ("ireland", "ie"),
    ("new zealand", "nz"),
    ("south africa", "za"),
    ("nigeria", "ng"),
    ("kenya", "ke"),
    ("philippines", "ph"),
];

/// Names that explicitly request an unrestricted search.
const UNRESTRICTED: &[&str] = &["global", "world", "worldwide", "international", "any"];

/// Resolve a region name to a country code.
pub fn country_code(region: &str) -> Option<&'static str> {
    let needle = region.trim().to_lowercase();
    if UNRESTRICTED.contains(&needle.as_str()) {
        return None;
    }
    REGIONS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, code)| *code)
}
