use std::collections::BTreeSet;

use crate::taxonomy::Taxonomy;

/// Category keys offered by the lookup UI and their labels.
pub const CATEGORY_LABELS: [(&str, &str); 8] = [
    ("weapon", "Weapon Skin"),
    ("knife", "Knife / Gloves"),
    ("sticker", "Sticker"),
    ("music", "Music Kit"),
    ("graffiti", "Graffiti"),
    ("container", "Case / Capsule"),
    ("tool", "Tool / Tag"),
    ("agent", "Agent"),
];

/// Wear conditions, best to worst.
pub const CONDITIONS: [&str; 5] = [
    "Factory New",
    "Minimal Wear",
    "Field-Tested",
    "Well-Worn",
    "Battle-Scarred",
];

const INDENT: &str = "    ";

/// Renders the taxonomy as a self-contained ES module. Output depends only
/// on the taxonomy contents.
pub fn render_module(taxonomy: &Taxonomy) -> String {
    let mut out = String::new();

    render_categories(&mut out);
    render_list(&mut out, "CONDITIONS", CONDITIONS.iter().copied());

    let buckets: [(&str, &BTreeSet<String>); 9] = [
        ("WEAPONS", &taxonomy.weapons),
        ("KNIVES", &taxonomy.knives),
        ("GLOVES", &taxonomy.gloves),
        ("STICKERS", &taxonomy.stickers),
        ("MUSIC_KITS", &taxonomy.music_kits),
        ("GRAFFITI", &taxonomy.graffiti),
        ("CONTAINERS", &taxonomy.containers),
        ("TOOLS", &taxonomy.tools),
        ("AGENTS", &taxonomy.agents),
    ];
    for (name, values) in buckets {
        render_list(&mut out, name, values.iter().map(String::as_str));
    }

    render_weapon_skins(&mut out, taxonomy);
    render_list(
        &mut out,
        "GENERIC_SKINS",
        taxonomy.generic_skins.iter().map(String::as_str),
    );

    out
}

fn render_categories(out: &mut String) {
    let entries = CATEGORY_LABELS
        .iter()
        .map(|(key, label)| format!("{INDENT}{key}: {}", quote(label)))
        .collect::<Vec<_>>();

    out.push_str("export const CATEGORIES = {\n");
    out.push_str(&entries.join(",\n"));
    out.push_str("\n};\n\n");
}

fn render_list<'a>(out: &mut String, name: &str, values: impl Iterator<Item = &'a str>) {
    let entries = values
        .map(|value| format!("{INDENT}{}", quote(value)))
        .collect::<Vec<_>>();

    out.push_str(&format!("export const {name} = [\n"));
    if !entries.is_empty() {
        out.push_str(&entries.join(",\n"));
        out.push('\n');
    }
    out.push_str("];\n\n");
}

fn render_weapon_skins(out: &mut String, taxonomy: &Taxonomy) {
    let entries = taxonomy
        .weapon_skins
        .iter()
        .map(|(weapon, skins)| {
            let skins = skins.iter().map(|skin| quote(skin)).collect::<Vec<_>>();
            format!("{INDENT}{}: [{}]", quote(weapon), skins.join(", "))
        })
        .collect::<Vec<_>>();

    out.push_str("export const WEAPON_SKINS = {\n");
    if !entries.is_empty() {
        out.push_str(&entries.join(",\n"));
        out.push('\n');
    }
    out.push_str("};\n\n");
}

fn quote(value: &str) -> String {
    // A string always serializes.
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}
