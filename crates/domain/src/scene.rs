//! The four preset scenes and their fixed slot bindings.
//!
//! Each named scene is bound 1:1 to one flash-scene slot and one codec
//! variant. The table is closed: no renaming, no new scenes.
//!
//! | Scene | Slot | DPS position | Variant |
//! |-----------|------|--------------|-------------------|
//! | soft | 1 | 6 | one-colour |
//! | colourful | 2 | 7 | six-colour |
//! | exciting | 3 | 8 | one-colour, reversed decode |
//! | wonderful | 4 | 9 | six-colour |

use serde::{Deserialize, Serialize};

use crate::flash_scene::SceneVariant;
use crate::schema::{DP_FLASH_SCENE_1, DP_MODE, wire_key};

/// One of the four preset flash scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    Soft,
    Colourful,
    Exciting,
    Wonderful,
}

impl Scene {
    /// All scenes in slot order.
    pub const ALL: [Self; 4] = [Self::Soft, Self::Colourful, Self::Exciting, Self::Wonderful];

    /// The 1-based flash-scene slot this scene is stored in.
    #[must_use]
    pub const fn slot(self) -> u8 {
        match self {
            Self::Soft => 1,
            Self::Colourful => 2,
            Self::Exciting => 3,
            Self::Wonderful => 4,
        }
    }

    /// Zero-based index into [`SchemaRecord::flash_scenes`](crate::schema::SchemaRecord).
    #[must_use]
    pub const fn slot_index(self) -> usize {
        self.slot() as usize - 1
    }

    /// The DPS position holding this scene's record.
    #[must_use]
    pub const fn dps_index(self) -> usize {
        DP_FLASH_SCENE_1 + self.slot_index()
    }

    /// The 1-based string key used when writing this scene's record.
    #[must_use]
    pub fn dps_key(self) -> String {
        wire_key(self.dps_index())
    }

    /// The wire shape of this scene's record.
    #[must_use]
    pub const fn variant(self) -> SceneVariant {
        match self {
            Self::Soft => SceneVariant::OneColour,
            Self::Colourful => SceneVariant::SixColour,
            Self::Exciting => SceneVariant::OneColourReversed,
            Self::Wonderful => SceneVariant::SixColour,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Colourful => "colourful",
            Self::Exciting => "exciting",
            Self::Wonderful => "wonderful",
        }
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Scene {
    type Err = UnknownSceneError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "soft" => Ok(Self::Soft),
            "colourful" => Ok(Self::Colourful),
            "exciting" => Ok(Self::Exciting),
            "wonderful" => Ok(Self::Wonderful),
            other => Err(UnknownSceneError(other.to_string())),
        }
    }
}

/// The name does not belong to the fixed four-scene table.
#[derive(Debug, thiserror::Error)]
#[error("unknown scene {0:?}")]
pub struct UnknownSceneError(pub String);

/// The work-mode value selecting preset `index`, where 0 selects plain scene
/// mode and 1–4 select a flash scene. Outside that range there is nothing to
/// select and `None` is returned (callers treat it as a no-op).
#[must_use]
pub fn select_mode_value(index: u8) -> Option<(String, String)> {
    let value = match index {
        0 => "scene".to_string(),
        1..=4 => format!("scene_{index}"),
        _ => return None,
    };
    Some((wire_key(DP_MODE), value))
}
