use once_cell::sync::Lazy;
use regex::Regex;

// Lazy left side so the first `|` decides the split; a trailing " (...)"
// wear condition is matched but not captured.
static SKIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s?\|\s?(.*?)(?:\s\(.*\))?$").expect("valid skin pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinSplit<'a> {
    pub base: &'a str,
    pub skin: &'a str,
}

/// Splits `"<base> | <skin> (<condition>)"`. Returns `None` for vanilla
/// names, or when either side is empty after trimming.
pub fn split_skin(name: &str) -> Option<SkinSplit<'_>> {
    let captures = SKIN_PATTERN.captures(name)?;
    let base = captures.get(1)?.as_str().trim();
    let skin = captures.get(2)?.as_str().trim();

    if base.is_empty() || skin.is_empty() {
        return None;
    }

    Some(SkinSplit { base, skin })
}
