//! Fixed DPS schema — binds positional data points to named fields.
//!
//! The index table below is a compatibility contract with the bulb firmware.
//! Positions must never be reordered; an off-by-one silently selects the
//! wrong field on the device (wrong colour, wrong scene).

use serde::Serialize;
use serde_json::Value;

use crate::scene::Scene;

/// Power switch (bool).
pub const DP_SWITCH: usize = 0;
/// Work mode string (`white`, `colour`, `scene`, `scene_1`…`scene_4`).
pub const DP_MODE: usize = 1;
/// White-mode brightness, raw device byte.
pub const DP_BRIGHTNESS: usize = 2;
/// White-mode colour temperature, raw device byte.
pub const DP_TEMPERATURE: usize = 3;
/// Colour-mode value, hex string.
pub const DP_COLOUR: usize = 4;
/// Scene-mode colour value, hex string.
pub const DP_SCENE: usize = 5;
/// First flash-scene record, hex string.
pub const DP_FLASH_SCENE_1: usize = 6;
/// Second flash-scene record, hex string.
pub const DP_FLASH_SCENE_2: usize = 7;
/// Third flash-scene record, hex string.
pub const DP_FLASH_SCENE_3: usize = 8;
/// Fourth flash-scene record, hex string.
pub const DP_FLASH_SCENE_4: usize = 9;

/// The wire key for a DPS position (1-based, stringly typed on the wire).
#[must_use]
pub fn wire_key(index: usize) -> String {
    (index + 1).to_string()
}

/// A status reply mapped onto the fixed schema. Values are still wire-level:
/// raw bytes and undecoded hex strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaRecord {
    pub switch: Option<bool>,
    pub mode: Option<String>,
    pub brightness: Option<u8>,
    pub temperature: Option<u8>,
    pub colour: Option<String>,
    pub scene: Option<String>,
    /// The four flash-scene hex strings in slot order (1–4).
    pub flash_scenes: [Option<String>; 4],
}

impl SchemaRecord {
    /// Map a dense positional vector onto the schema.
    ///
    /// Positions that are missing, gap-filled, or hold a value of the wrong
    /// type degrade to `None`. An empty vector yields an empty record.
    #[must_use]
    pub fn from_dps(dps: &[Option<Value>]) -> Self {
        Self {
            switch: bool_at(dps, DP_SWITCH),
            mode: string_at(dps, DP_MODE),
            brightness: byte_at(dps, DP_BRIGHTNESS),
            temperature: byte_at(dps, DP_TEMPERATURE),
            colour: string_at(dps, DP_COLOUR),
            scene: string_at(dps, DP_SCENE),
            flash_scenes: [
                string_at(dps, DP_FLASH_SCENE_1),
                string_at(dps, DP_FLASH_SCENE_2),
                string_at(dps, DP_FLASH_SCENE_3),
                string_at(dps, DP_FLASH_SCENE_4),
            ],
        }
    }

    /// The undecoded flash-scene hex string for `scene`'s slot.
    #[must_use]
    pub fn flash_scene(&self, scene: Scene) -> Option<&str> {
        self.flash_scenes[scene.slot_index()].as_deref()
    }

    /// Whether every field is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn value_at<'a>(dps: &'a [Option<Value>], index: usize) -> Option<&'a Value> {
    dps.get(index)?.as_ref()
}

fn bool_at(dps: &[Option<Value>], index: usize) -> Option<bool> {
    value_at(dps, index)?.as_bool()
}

fn string_at(dps: &[Option<Value>], index: usize) -> Option<String> {
    value_at(dps, index)?.as_str().map(str::to_owned)
}

fn byte_at(dps: &[Option<Value>], index: usize) -> Option<u8> {
    value_at(dps, index)?
        .as_u64()
        .and_then(|value| u8::try_from(value).ok())
}
