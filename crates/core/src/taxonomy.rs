use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{Bucket, ClassificationReport, ItemRecord, Outcome, Placement};
use crate::rules::classify_record;

/// Accumulated result of one classification pass. Sets are ordered so the
/// renderer can emit them without a separate sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub weapons: BTreeSet<String>,
    pub knives: BTreeSet<String>,
    pub gloves: BTreeSet<String>,
    pub stickers: BTreeSet<String>,
    pub music_kits: BTreeSet<String>,
    pub graffiti: BTreeSet<String>,
    pub containers: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub agents: BTreeSet<String>,
    pub weapon_skins: BTreeMap<String, BTreeSet<String>>,
    pub generic_skins: BTreeSet<String>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, bucket: Bucket) -> &BTreeSet<String> {
        match bucket {
            Bucket::Agent => &self.agents,
            Bucket::MusicKit => &self.music_kits,
            Bucket::Sticker => &self.stickers,
            Bucket::Graffiti => &self.graffiti,
            Bucket::Container => &self.containers,
            Bucket::Tool => &self.tools,
            Bucket::Glove => &self.gloves,
            Bucket::Knife => &self.knives,
            Bucket::Weapon => &self.weapons,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut BTreeSet<String> {
        match bucket {
            Bucket::Agent => &mut self.agents,
            Bucket::MusicKit => &mut self.music_kits,
            Bucket::Sticker => &mut self.stickers,
            Bucket::Graffiti => &mut self.graffiti,
            Bucket::Container => &mut self.containers,
            Bucket::Tool => &mut self.tools,
            Bucket::Glove => &mut self.gloves,
            Bucket::Knife => &mut self.knives,
            Bucket::Weapon => &mut self.weapons,
        }
    }

    /// Folds one placement in. Skins feed the generic list for every
    /// skinned bucket; only weapons also get a per-type skin list.
    pub fn absorb(&mut self, placement: Placement) {
        let Placement { bucket, name, skin } = placement;

        if let Some(skin) = skin {
            if bucket == Bucket::Weapon {
                self.weapon_skins
                    .entry(name.clone())
                    .or_default()
                    .insert(skin.clone());
            }
            self.generic_skins.insert(skin);
        }

        self.bucket_mut(bucket).insert(name);
    }

    pub fn skins_for(&self, weapon: &str) -> Option<&BTreeSet<String>> {
        self.weapon_skins.get(weapon)
    }
}

/// Runs the whole classification phase over records in input order.
pub fn build_taxonomy<'a, I>(records: I) -> (Taxonomy, ClassificationReport)
where
    I: IntoIterator<Item = &'a ItemRecord>,
{
    let mut taxonomy = Taxonomy::new();
    let mut report = ClassificationReport::default();

    for record in records {
        let outcome = classify_record(record);
        report.record(&outcome);
        if let Outcome::Placed(placement) = outcome {
            taxonomy.absorb(placement);
        }
    }

    (taxonomy, report)
}
