use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry of the raw item catalog. Only the fields the classifier reads
/// are modelled; everything else in the source document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub market_hash_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ItemRecord {
    /// Display name, preferring the market hash name. A present but empty
    /// market hash name still falls back to `name`.
    pub fn display_name(&self) -> &str {
        [&self.market_hash_name, &self.name]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find(|value| !value.trim().is_empty())
            .unwrap_or("")
    }

    pub fn identifier(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn category_label(&self) -> &str {
        self.category
            .as_ref()
            .and_then(|category| category.name.as_deref())
            .unwrap_or("")
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Agent,
    MusicKit,
    Sticker,
    Graffiti,
    Container,
    Tool,
    Glove,
    Knife,
    Weapon,
}

impl Bucket {
    pub const ALL: [Bucket; 9] = [
        Bucket::Agent,
        Bucket::MusicKit,
        Bucket::Sticker,
        Bucket::Graffiti,
        Bucket::Container,
        Bucket::Tool,
        Bucket::Glove,
        Bucket::Knife,
        Bucket::Weapon,
    ];
}

/// Where a single record lands. `skin` is only set for the weapon-like
/// buckets when the name carried a `| Skin` segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub bucket: Bucket,
    pub name: String,
    pub skin: Option<String>,
}

impl Placement {
    pub fn plain(bucket: Bucket, name: impl Into<String>) -> Self {
        Self {
            bucket,
            name: name.into(),
            skin: None,
        }
    }

    pub fn skinned(bucket: Bucket, name: impl Into<String>, skin: impl Into<String>) -> Self {
        Self {
            bucket,
            name: name.into(),
            skin: Some(skin.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyName,
    VanillaWeapon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Placed(Placement),
    Skipped { reason: SkipReason },
}

/// Per-run tallies of what the classifier did with each record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub records_seen: usize,
    pub placed: std::collections::BTreeMap<Bucket, usize>,
    pub skipped_empty_name: usize,
    pub dropped_vanilla_weapons: usize,
}

impl ClassificationReport {
    pub fn record(&mut self, outcome: &Outcome) {
        self.records_seen += 1;
        match outcome {
            Outcome::Placed(placement) => {
                *self.placed.entry(placement.bucket).or_default() += 1;
            }
            Outcome::Skipped {
                reason: SkipReason::EmptyName,
            } => self.skipped_empty_name += 1,
            Outcome::Skipped {
                reason: SkipReason::VanillaWeapon,
            } => self.dropped_vanilla_weapons += 1,
        }
    }

    pub fn placed_total(&self) -> usize {
        self.placed.values().sum()
    }
}
