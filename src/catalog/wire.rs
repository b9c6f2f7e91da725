//! JSON shapes returned by the PokeAPI `pokemon` and `pokemon-species`
//! resources. Only the fields the explorer displays are decoded.

use serde::Deserialize;

use super::{Descriptor, DescriptorEntry, Entity, Stat};

/// `{ "name": ..., "url": ... }` reference used all over the API.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    pub stats: Vec<RawStat>,
    #[serde(default)]
    pub sprites: RawSprites,
    pub species: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawAbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSpecies {
    #[serde(default)]
    pub flavor_text_entries: Vec<RawFlavorText>,
}

#[derive(Debug, Deserialize)]
pub struct RawFlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

impl RawSprites {
    /// Official artwork when present, otherwise the default sprite.
    fn image_url(self) -> Option<String> {
        self.other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default)
            .or(self.front_default)
    }
}

impl From<RawSpecies> for Descriptor {
    fn from(raw: RawSpecies) -> Self {
        Descriptor {
            entries: raw
                .flavor_text_entries
                .into_iter()
                .map(|e| DescriptorEntry {
                    language: e.language.name,
                    text: e.flavor_text,
                })
                .collect(),
        }
    }
}

impl RawPokemon {
    pub fn into_entity(self, descriptor: Option<Descriptor>) -> Entity {
        Entity {
            id: self.id,
            name: self.name,
            categories: self.types.into_iter().map(|t| t.kind.name).collect(),
            image_url: self.sprites.image_url(),
            height: self.height,
            weight: self.weight,
            base_experience: self.base_experience,
            abilities: self.abilities.into_iter().map(|a| a.ability.name).collect(),
            stats: self
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
            descriptor,
        }
    }
}
