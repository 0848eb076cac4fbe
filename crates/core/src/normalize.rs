/// Variant markers that never change which item a name refers to.
pub const VARIANT_PREFIXES: [&str; 3] = ["Souvenir ", "StatTrak™ ", "★ "];

/// Strips variant prefixes from the front of a display name, in any order
/// and any number of times, then trims. Markers later in the name are kept,
/// so "... Souvenir Package" containers keep their full name.
pub fn normalize_name(raw: &str) -> String {
    let mut rest = raw.trim_start();

    while let Some(stripped) = VARIANT_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped.trim_start();
    }

    rest.trim_end().to_string()
}
