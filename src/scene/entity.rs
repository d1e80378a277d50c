//! Entity records consumed from the external data layer.
//!
//! Records arrive loosely typed (missing positions, odd color strings). They
//! are normalized into [`Entity`] once, on sync; missing fields get the
//! documented defaults below and the entity is flagged `degraded`, which caps
//! its detail level.

use serde::{Deserialize, Serialize};

use crate::core::types::{Result, Vec3};
use crate::core::Error;

/// Position used when a record has none (or a non-finite one).
pub const DEFAULT_POSITION: Vec3 = Vec3::ZERO;

/// Weathered-granite grey used when a record's color is absent or unparseable.
pub const DEFAULT_COLOR: [f32; 3] = [0.62, 0.62, 0.66];

/// Entity record as supplied by collaborators.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "color")]
    pub color_tag: Option<String>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>, position: [f32; 3], category: Category, color_tag: &str) -> Self {
        Self {
            id: id.into(),
            position: Some(position),
            category: Some(category.tag().to_string()),
            color_tag: Some(color_tag.to_string()),
        }
    }
}

/// Broad entity family; selects the shape palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Memorial marker (headstone, cross, lantern).
    #[default]
    Marker,
    Monument,
    Residential,
    Commercial,
    Landmark,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Marker,
        Category::Monument,
        Category::Residential,
        Category::Commercial,
        Category::Landmark,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Category::Marker => "marker",
            Category::Monument => "monument",
            Category::Residential => "residential",
            Category::Commercial => "commercial",
            Category::Landmark => "landmark",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|c| c.tag().eq_ignore_ascii_case(tag))
    }
}

/// Normalized, read-only entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: String,
    pub position: Vec3,
    pub category: Category,
    pub color_tag: String,
    /// Linear RGB parsed from `color_tag`.
    pub color: [f32; 3],
    /// A field was missing or invalid and a default was substituted.
    pub degraded: bool,
}

impl Entity {
    /// Normalize a record. Only an empty id is rejected: without a stable id
    /// the entity cannot be keyed.
    pub fn from_record(record: &EntityRecord) -> Result<Self> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(Error::InvalidEntity {
                id: record.id.clone(),
                reason: "empty id".into(),
            });
        }

        let mut degraded = false;

        let position = match record.position {
            Some(p) if p.iter().all(|c| c.is_finite()) => Vec3::from_array(p),
            other => {
                log::warn!("entity '{id}': position {other:?} invalid, using default");
                degraded = true;
                DEFAULT_POSITION
            }
        };

        let category = match record.category.as_deref() {
            None => Category::default(),
            Some(tag) => Category::from_tag(tag).unwrap_or_else(|| {
                log::warn!("entity '{id}': unknown category '{tag}', using marker");
                Category::default()
            }),
        };

        let color_tag = record.color_tag.clone().unwrap_or_default();
        let color = match parse_color_tag(&color_tag) {
            Some(c) => c,
            None => {
                log::warn!("entity '{id}': color '{color_tag}' invalid, using default");
                degraded = true;
                DEFAULT_COLOR
            }
        };

        Ok(Self {
            id: id.to_string(),
            position,
            category,
            color_tag,
            color,
            degraded,
        })
    }
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into RGB in `[0, 1]`.
///
/// ```
/// use vigil::scene::entity::parse_color_tag;
///
/// assert_eq!(parse_color_tag("#ff0000"), Some([1.0, 0.0, 0.0]));
/// assert_eq!(parse_color_tag("0f0"), Some([0.0, 1.0, 0.0]));
/// assert_eq!(parse_color_tag("teal"), None);
/// ```
pub fn parse_color_tag(tag: &str) -> Option<[f32; 3]> {
    let hex = tag.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let expand = |i: usize| {
                let c = &hex[i..i + 1];
                channel(&format!("{c}{c}"))
            };
            Some([expand(0)?, expand(1)?, expand(2)?])
        }
        _ => None,
    }
}
