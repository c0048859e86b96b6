//! Scene editing — merge partial overrides onto a decoded record and
//! re-encode it for transmission.

use std::collections::BTreeMap;

use crate::colour::Rgb;
use crate::flash_scene::{self, SceneRecord, SceneVariant};
use crate::percent::clamp_percent;
use crate::scene::Scene;

/// Caller-supplied partial overrides for one scene.
///
/// Any field left unset keeps the previously decoded value. `colour` applies
/// to one-colour scenes, `colours` to six-colour scenes; the field that does
/// not match the scene's variant is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneOverrides {
    /// Brightness percentage, clamped to `[0, 100]`.
    pub brightness: Option<i64>,
    /// Saturation percentage, clamped to `[0, 100]`.
    pub saturation: Option<i64>,
    /// Speed percentage, clamped to `[0, 100]`.
    pub speed: Option<i64>,
    /// Replacement colour for a one-colour scene.
    pub colour: Option<Rgb>,
    /// Replacement colours for a six-colour scene.
    pub colours: ColourOverrides,
}

/// How replacement colours for a six-colour scene are addressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColourOverrides {
    /// No colour changes.
    #[default]
    None,
    /// Positional: list index + 1 is the 1-based grid position. Entries
    /// beyond position 6 are ignored.
    Ordered(Vec<Rgb>),
    /// Explicit 1-based grid position to colour. Out-of-domain positions
    /// (0 or above 6) are ignored; the remaining entries still apply.
    Indexed(BTreeMap<u8, Rgb>),
}

/// A re-encoded scene record, keyed for the transport write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneWrite {
    /// 1-based string DPS key of the scene's slot.
    pub key: String,
    /// The encoded record.
    pub hex: String,
}

/// Rebuild `scene`'s record from `current` plus `overrides` and encode it.
///
/// Returns `None` when the merged record is incomplete, i.e. the slot had no
/// decoded record and the overrides do not supply every field. Encoding
/// always uses direct R,G,B channel order, including for the scene whose
/// decode path is reversed.
#[must_use]
pub fn edit(
    scene: Scene,
    current: Option<&SceneRecord>,
    overrides: &SceneOverrides,
) -> Option<SceneWrite> {
    let record = rebuild(scene, current, overrides)?;
    Some(SceneWrite {
        key: scene.dps_key(),
        hex: flash_scene::encode(&record),
    })
}

/// Merge `overrides` onto the previously decoded record for `scene`.
#[must_use]
pub fn rebuild(
    scene: Scene,
    current: Option<&SceneRecord>,
    overrides: &SceneOverrides,
) -> Option<SceneRecord> {
    match scene.variant() {
        SceneVariant::OneColour | SceneVariant::OneColourReversed => {
            rebuild_one_colour(current, overrides)
        }
        SceneVariant::SixColour => rebuild_six_colour(current, overrides),
    }
}

fn rebuild_one_colour(
    current: Option<&SceneRecord>,
    overrides: &SceneOverrides,
) -> Option<SceneRecord> {
    let existing = match current {
        Some(SceneRecord::OneColour {
            brightness,
            saturation,
            speed,
            colour,
        }) => Some((*brightness, *saturation, *speed, *colour)),
        _ => None,
    };

    Some(SceneRecord::OneColour {
        brightness: merged_percent(overrides.brightness, existing.map(|e| e.0))?,
        saturation: merged_percent(overrides.saturation, existing.map(|e| e.1))?,
        speed: merged_percent(overrides.speed, existing.map(|e| e.2))?,
        colour: overrides.colour.or(existing.map(|e| e.3))?,
    })
}

fn rebuild_six_colour(
    current: Option<&SceneRecord>,
    overrides: &SceneOverrides,
) -> Option<SceneRecord> {
    let existing = match current {
        Some(SceneRecord::SixColour {
            brightness,
            saturation,
            speed,
            colours,
        }) => Some((*brightness, *saturation, *speed, *colours)),
        _ => None,
    };

    let mut colours = match existing {
        Some((_, _, _, colours)) => colours,
        // Without a decoded record the overrides must supply the full grid.
        None => match &overrides.colours {
            ColourOverrides::Ordered(list) if list.len() >= 6 => {
                let mut grid = [Rgb::new(0, 0, 0); 6];
                grid.copy_from_slice(&list[..6]);
                grid
            }
            _ => return None,
        },
    };

    match &overrides.colours {
        ColourOverrides::None => {}
        ColourOverrides::Ordered(list) => {
            for (index, colour) in list.iter().enumerate().take(6) {
                colours[index] = *colour;
            }
        }
        ColourOverrides::Indexed(map) => {
            for (&position, &colour) in map {
                if (1..=6).contains(&position) {
                    colours[usize::from(position) - 1] = colour;
                }
            }
        }
    }

    Some(SceneRecord::SixColour {
        brightness: merged_percent(overrides.brightness, existing.map(|e| e.0))?,
        saturation: merged_percent(overrides.saturation, existing.map(|e| e.1))?,
        speed: merged_percent(overrides.speed, existing.map(|e| e.2))?,
        colours,
    })
}

fn merged_percent(supplied: Option<i64>, existing: Option<u8>) -> Option<u8> {
    supplied.map(clamp_percent).or(existing)
}
