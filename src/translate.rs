//! Static display tables for category (type) and stat codes.

use serde::{Deserialize, Serialize};

/// Display locale. Selects label tables, the descriptor language and the
/// placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    /// Language code matched against descriptor entries.
    pub fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "pt" => Some(Self::Pt),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn description_placeholder(self) -> &'static str {
        match self {
            Self::Pt => "Descrição não disponível.",
            Self::En => "No description available.",
        }
    }
}

/// Every category code the API knows about, in the order the picker shows them.
pub const CATEGORY_CODES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

const CATEGORY_PT: [(&str, &str); 18] = [
    ("normal", "Normal"),
    ("fire", "Fogo"),
    ("water", "Água"),
    ("electric", "Elétrico"),
    ("grass", "Planta"),
    ("ice", "Gelo"),
    ("fighting", "Luta"),
    ("poison", "Veneno"),
    ("ground", "Terra"),
    ("flying", "Voador"),
    ("psychic", "Psíquico"),
    ("bug", "Inseto"),
    ("rock", "Pedra"),
    ("ghost", "Fantasma"),
    ("dragon", "Dragão"),
    ("dark", "Sombrio"),
    ("steel", "Aço"),
    ("fairy", "Fada"),
];

const STAT_PT: [(&str, &str); 6] = [
    ("hp", "HP"),
    ("attack", "Ataque"),
    ("defense", "Defesa"),
    ("special-attack", "Ataque Especial"),
    ("special-defense", "Defesa Especial"),
    ("speed", "Velocidade"),
];

const STAT_EN: [(&str, &str); 6] = [
    ("hp", "HP"),
    ("attack", "Attack"),
    ("defense", "Defense"),
    ("special-attack", "Sp. Attack"),
    ("special-defense", "Sp. Defense"),
    ("speed", "Speed"),
];

fn lookup(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == code).map(|(_, v)| *v)
}

/// Label for a category code. Untranslated codes come back unchanged.
pub fn category_label(code: &str, locale: Locale) -> String {
    match locale {
        Locale::Pt => lookup(&CATEGORY_PT, code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string()),
        Locale::En => {
            if CATEGORY_CODES.contains(&code) {
                capitalize(code)
            } else {
                code.to_string()
            }
        }
    }
}

/// Label for a stat code. Untranslated codes come back unchanged.
pub fn stat_label(code: &str, locale: Locale) -> String {
    let table: &[(&str, &str)] = match locale {
        Locale::Pt => &STAT_PT,
        Locale::En => &STAT_EN,
    };
    lookup(table, code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
