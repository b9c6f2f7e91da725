//! Entity → view-model transforms. Nothing here touches the terminal; the
//! `ui` module draws these.

use crate::catalog::Entity;
use crate::translate::{Locale, capitalize, category_label, stat_label};

/// A translated category badge. `code` is kept so the UI can colour it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub code: String,
    pub label: String,
}

/// Summary card shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub number: String,
    pub name: String,
    pub badges: Vec<Badge>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatBar {
    pub label: String,
    pub value: u32,
    /// Bar width in percent, `min(value / 2, 100)`.
    pub percent: f64,
}

/// Expanded view shown in the modal.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub image_url: Option<String>,
    pub badges: Vec<Badge>,
    pub description: String,
    pub height_m: f64,
    pub weight_kg: f64,
    pub base_experience: Option<u32>,
    pub abilities: Vec<String>,
    pub stats: Vec<StatBar>,
}

/// `#001`-style number, padded to at least three digits.
pub fn format_number(id: u32) -> String {
    format!("#{:03}", id)
}

pub fn stat_percent(value: u32) -> f64 {
    (value as f64 / 2.0).min(100.0)
}

fn badges(entity: &Entity, locale: Locale) -> Vec<Badge> {
    entity
        .categories
        .iter()
        .map(|code| Badge {
            code: code.clone(),
            label: category_label(code, locale),
        })
        .collect()
}

impl CardView {
    pub fn from_entity(entity: &Entity, locale: Locale) -> Self {
        Self {
            number: format_number(entity.id),
            name: capitalize(&entity.name),
            badges: badges(entity, locale),
            image_url: entity.image_url.clone(),
        }
    }
}

impl DetailView {
    pub fn from_entity(entity: &Entity, locale: Locale) -> Self {
        let description = entity
            .descriptor
            .as_ref()
            .and_then(|d| d.select(locale.code()))
            .unwrap_or_else(|| locale.description_placeholder().to_string());

        Self {
            title: format!("{} {}", format_number(entity.id), capitalize(&entity.name)),
            image_url: entity.image_url.clone(),
            badges: badges(entity, locale),
            description,
            height_m: entity.height as f64 / 10.0,
            weight_kg: entity.weight as f64 / 10.0,
            base_experience: entity.base_experience,
            abilities: entity.abilities.iter().map(|a| capitalize(a)).collect(),
            stats: entity
                .stats
                .iter()
                .map(|s| StatBar {
                    label: stat_label(&s.name, locale),
                    value: s.value,
                    percent: stat_percent(s.value),
                })
                .collect(),
        }
    }

    /// Plain-text rendering used by the `show` subcommand.
    pub fn to_text(&self, locale: Locale) -> String {
        let labels = TextLabels::for_locale(locale);
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        if !self.badges.is_empty() {
            let joined: Vec<&str> = self.badges.iter().map(|b| b.label.as_str()).collect();
            out.push_str(&format!("[{}]\n", joined.join("] [")));
        }
        if let Some(url) = &self.image_url {
            out.push_str(&format!("{}\n", url));
        }
        out.push_str(&format!("\n{}\n", self.description));
        out.push_str(&format!(
            "\n{}: {} m   {}: {} kg   {}: {}\n",
            labels.height,
            self.height_m,
            labels.weight,
            self.weight_kg,
            labels.base_experience,
            self.base_experience
                .map(|x| x.to_string())
                .unwrap_or_else(|| "-".to_string())
        ));
        out.push_str(&format!("{}: {}\n\n", labels.abilities, self.abilities.join(", ")));

        let label_width = self.stats.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
        for stat in &self.stats {
            let filled = (stat.percent / 5.0).round() as usize;
            out.push_str(&format!(
                "{:<width$} {:>3} {}{}\n",
                stat.label,
                stat.value,
                "█".repeat(filled),
                "░".repeat(20 - filled.min(20)),
                width = label_width
            ));
        }
        out
    }
}

/// Section headings for the detail view.
pub struct TextLabels {
    pub description: &'static str,
    pub info: &'static str,
    pub height: &'static str,
    pub weight: &'static str,
    pub base_experience: &'static str,
    pub abilities: &'static str,
    pub stats: &'static str,
}

impl TextLabels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Pt => Self {
                description: "Descrição",
                info: "Informações",
                height: "Altura",
                weight: "Peso",
                base_experience: "Experiência Base",
                abilities: "Habilidades",
                stats: "Estatísticas Base",
            },
            Locale::En => Self {
                description: "Description",
                info: "Information",
                height: "Height",
                weight: "Weight",
                base_experience: "Base Experience",
                abilities: "Abilities",
                stats: "Base Stats",
            },
        }
    }
}
