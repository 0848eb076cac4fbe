//! Ranked classification rules.
//!
//! Every record is offered to [`RULES`] in order and the first rule whose
//! predicate holds decides the record's bucket. The last rule (weapons)
//! accepts everything, so each record gets exactly one outcome.

use crate::models::{Bucket, ItemRecord, Outcome, Placement, SkipReason};
use crate::normalize::normalize_name;
use crate::pattern::split_skin;

pub const STICKER_PREFIX: &str = "Sticker | ";

/// Normalized view of a record: the inputs every rule predicate reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView<'a> {
    pub name: String,
    pub id: &'a str,
    pub category: &'a str,
}

impl<'a> RecordView<'a> {
    pub fn from_record(record: &'a ItemRecord) -> Self {
        Self {
            name: normalize_name(record.display_name()),
            id: record.identifier(),
            category: record.category_label(),
        }
    }

    pub fn new(name: &str, id: &'a str, category: &'a str) -> Self {
        Self {
            name: normalize_name(name),
            id,
            category,
        }
    }
}

pub struct Rule {
    pub bucket: Bucket,
    pub matches: fn(&RecordView<'_>) -> bool,
    pub place: fn(&RecordView<'_>) -> Outcome,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("bucket", &self.bucket).finish()
    }
}

pub static RULES: [Rule; 9] = [
    Rule {
        bucket: Bucket::Agent,
        matches: |view: &RecordView<'_>| view.id.starts_with("agent-") || view.category == "Agents",
        place: |view: &RecordView<'_>| whole_name(Bucket::Agent, view),
    },
    Rule {
        bucket: Bucket::MusicKit,
        matches: |view: &RecordView<'_>| {
            view.id.starts_with("music_kit-") || view.name.starts_with("Music Kit |")
        },
        place: |view: &RecordView<'_>| whole_name(Bucket::MusicKit, view),
    },
    Rule {
        bucket: Bucket::Sticker,
        matches: |view: &RecordView<'_>| {
            view.id.starts_with("sticker-") || view.name.starts_with("Sticker |")
        },
        place: place_sticker,
    },
    Rule {
        bucket: Bucket::Graffiti,
        matches: |view: &RecordView<'_>| {
            view.id.starts_with("graffiti-")
                || view.name.starts_with("Graffiti |")
                || view.name.starts_with("Sealed Graffiti |")
        },
        place: |view: &RecordView<'_>| whole_name(Bucket::Graffiti, view),
    },
    Rule {
        bucket: Bucket::Container,
        matches: |view: &RecordView<'_>| {
            view.id.starts_with("crate-") || matches!(view.category, "Container" | "Case" | "Gift")
        },
        place: |view: &RecordView<'_>| whole_name(Bucket::Container, view),
    },
    Rule {
        bucket: Bucket::Tool,
        matches: |view: &RecordView<'_>| view.id.starts_with("tool-") || view.category == "Tool",
        place: |view: &RecordView<'_>| whole_name(Bucket::Tool, view),
    },
    Rule {
        bucket: Bucket::Glove,
        matches: |view: &RecordView<'_>| view.category == "Gloves" || view.id.starts_with("glove-"),
        place: |view: &RecordView<'_>| split_or_vanilla(Bucket::Glove, view),
    },
    Rule {
        bucket: Bucket::Knife,
        matches: |view: &RecordView<'_>| view.category == "Knives" || view.id.contains("knife"),
        place: |view: &RecordView<'_>| split_or_vanilla(Bucket::Knife, view),
    },
    Rule {
        bucket: Bucket::Weapon,
        matches: |_: &RecordView<'_>| true,
        place: place_weapon,
    },
];

/// Classifies one record. Empty names are skipped before any rule runs.
pub fn classify_record(record: &ItemRecord) -> Outcome {
    classify_view(&RecordView::from_record(record))
}

pub fn classify_view(view: &RecordView<'_>) -> Outcome {
    if view.name.is_empty() {
        return Outcome::Skipped {
            reason: SkipReason::EmptyName,
        };
    }

    match matching_rule(view) {
        Some(rule) => (rule.place)(view),
        None => Outcome::Skipped {
            reason: SkipReason::VanillaWeapon,
        },
    }
}

pub fn matching_rule(view: &RecordView<'_>) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(view))
}

fn whole_name(bucket: Bucket, view: &RecordView<'_>) -> Outcome {
    Outcome::Placed(Placement::plain(bucket, view.name.clone()))
}

fn place_sticker(view: &RecordView<'_>) -> Outcome {
    let name = view.name.strip_prefix(STICKER_PREFIX).unwrap_or(&view.name);
    Outcome::Placed(Placement::plain(Bucket::Sticker, name))
}

fn split_or_vanilla(bucket: Bucket, view: &RecordView<'_>) -> Outcome {
    match split_skin(&view.name) {
        Some(split) => Outcome::Placed(Placement::skinned(bucket, split.base, split.skin)),
        None => whole_name(bucket, view),
    }
}

// Skin-less weapons have no bucket of their own.
fn place_weapon(view: &RecordView<'_>) -> Outcome {
    match split_skin(&view.name) {
        Some(split) => Outcome::Placed(Placement::skinned(Bucket::Weapon, split.base, split.skin)),
        None => Outcome::Skipped {
            reason: SkipReason::VanillaWeapon,
        },
    }
}
