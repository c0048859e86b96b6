//! Semantic device state, projected from the wire-level schema.

use serde::{Deserialize, Serialize};

use crate::colour::Rgb;
use crate::flash_scene::{self, SceneRecord};
use crate::percent::device_to_brightness;
use crate::scene::Scene;
use crate::schema::SchemaRecord;

/// The bulb's operating mode.
///
/// The firmware reports `scene_1`…`scene_4` while a flash scene is active;
/// those all project to [`Scene`](Self::Scene) since which scene is running
/// is visible through [`DeviceState::scenes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    White,
    Colour,
    Scene,
}

impl WorkMode {
    /// Parse a reported work-mode string. Unknown values degrade to `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "white" => Some(Self::White),
            "colour" => Some(Self::Colour),
            _ if raw.starts_with("scene") => Some(Self::Scene),
            _ => None,
        }
    }

    /// The wire value written when selecting this mode.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Colour => "colour",
            Self::Scene => "scene",
        }
    }
}

impl std::fmt::Display for WorkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Decoded per-scene records, keyed by scene name. A slot whose record was
/// absent or malformed stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStates {
    pub soft: Option<SceneRecord>,
    pub colourful: Option<SceneRecord>,
    pub exciting: Option<SceneRecord>,
    pub wonderful: Option<SceneRecord>,
}

impl SceneStates {
    #[must_use]
    pub fn get(&self, scene: Scene) -> Option<&SceneRecord> {
        match scene {
            Scene::Soft => self.soft.as_ref(),
            Scene::Colourful => self.colourful.as_ref(),
            Scene::Exciting => self.exciting.as_ref(),
            Scene::Wonderful => self.wonderful.as_ref(),
        }
    }

    fn set(&mut self, scene: Scene, record: SceneRecord) {
        let slot = match scene {
            Scene::Soft => &mut self.soft,
            Scene::Colourful => &mut self.colourful,
            Scene::Exciting => &mut self.exciting,
            Scene::Wonderful => &mut self.wonderful,
        };
        *slot = Some(record);
    }
}

/// The externally visible device state. Every field is optional: whatever
/// the device did not report (or reported malformed) is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Power switch.
    pub on: Option<bool>,
    /// Operating mode.
    pub mode: Option<WorkMode>,
    /// White-mode brightness as a percentage.
    pub brightness: Option<u8>,
    /// White-mode colour temperature as a percentage.
    pub temperature: Option<u8>,
    /// Colour-mode colour.
    pub colour: Option<Rgb>,
    /// Scene-mode colour.
    pub scene: Option<Rgb>,
    /// Decoded flash-scene records.
    pub scenes: SceneStates,
}

impl DeviceState {
    /// Project a schema record onto the semantic state.
    ///
    /// Raw brightness/temperature bytes are decoded to percentages, colour
    /// hex strings to RGB triples (the colour DP may hold either the plain
    /// 6-char form or the 14-char value a colour-mode write produces), and
    /// each flash-scene slot through its bound codec variant. An empty
    /// schema yields an empty state.
    #[must_use]
    pub fn project(schema: &SchemaRecord) -> Self {
        if schema.is_empty() {
            return Self::default();
        }

        let mut scenes = SceneStates::default();
        for scene in Scene::ALL {
            if let Some(hex) = schema.flash_scene(scene)
                && let Some(record) = flash_scene::decode(scene.variant(), hex)
            {
                scenes.set(scene, record);
            }
        }

        Self {
            on: schema.switch,
            mode: schema.mode.as_deref().and_then(WorkMode::parse),
            brightness: schema.brightness.map(device_to_brightness),
            temperature: schema.temperature.map(device_to_brightness),
            colour: schema.colour.as_deref().and_then(Rgb::from_device_hex),
            scene: schema.scene.as_deref().and_then(Rgb::from_device_hex),
            scenes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaRecord;
    use serde_json::json;

    fn full_schema() -> SchemaRecord {
        SchemaRecord::from_dps(&[
            Some(json!(true)),
            Some(json!("white")),
            Some(json!(90)),
            Some(json!(50)),
            Some(json!("000000")),
            Some(json!("000000")),
            Some(json!("24d10101ff0000")),
            Some(json!("78ac0106692626695d26266926266269332669692661")),
            Some(json!("311b0101ff0000")),
            Some(json!("ffff0106ff0000ffe60009ff0000f7fffffffff700ff")),
        ])
    }

    #[test]
    fn should_project_full_schema_end_to_end() {
        let state = DeviceState::project(&full_schema());

        assert_eq!(state.on, Some(true));
        assert_eq!(state.mode, Some(WorkMode::White));
        assert_eq!(state.brightness, Some(device_to_brightness(90)));
        assert_eq!(state.temperature, Some(device_to_brightness(50)));
        assert_eq!(state.colour, Some(Rgb::new(0, 0, 0)));
        assert_eq!(state.scene, Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn should_populate_all_four_scenes_with_their_bound_variants() {
        let state = DeviceState::project(&full_schema());

        assert!(matches!(
            state.scenes.get(Scene::Soft),
            Some(SceneRecord::OneColour { .. })
        ));
        assert!(matches!(
            state.scenes.get(Scene::Colourful),
            Some(SceneRecord::SixColour { .. })
        ));
        assert!(matches!(
            state.scenes.get(Scene::Exciting),
            Some(SceneRecord::OneColour { .. })
        ));
        assert!(matches!(
            state.scenes.get(Scene::Wonderful),
            Some(SceneRecord::SixColour { .. })
        ));
    }

    #[test]
    fn should_reverse_channels_only_for_the_exciting_slot() {
        let state = DeviceState::project(&full_schema());

        // Both slots hold byte order ff 00 00; soft reads it as red while
        // exciting reads it back-to-front as blue.
        let Some(SceneRecord::OneColour { colour: soft, .. }) = state.scenes.get(Scene::Soft)
        else {
            panic!("expected a soft record");
        };
        let Some(SceneRecord::OneColour { colour: exciting, .. }) =
            state.scenes.get(Scene::Exciting)
        else {
            panic!("expected an exciting record");
        };

        assert_eq!(*soft, Rgb::new(255, 0, 0));
        assert_eq!(*exciting, Rgb::new(0, 0, 255));
    }

    #[test]
    fn should_leave_scene_slot_absent_when_record_is_malformed() {
        let mut schema = full_schema();
        schema.flash_scenes[0] = Some("deadbeef".to_string());
        let state = DeviceState::project(&schema);

        assert_eq!(state.scenes.get(Scene::Soft), None);
        assert!(state.scenes.get(Scene::Colourful).is_some());
    }

    #[test]
    fn should_decode_the_device_colour_value_from_the_colour_dp() {
        let mut schema = full_schema();
        schema.colour = Some("320a32012ccc32".to_string());
        let state = DeviceState::project(&schema);

        assert_eq!(state.colour, Some(Rgb::new(50, 10, 50)));
    }

    #[test]
    fn should_leave_colour_absent_when_hex_is_wrong_width() {
        let mut schema = full_schema();
        schema.colour = Some("320a3201".to_string());
        let state = DeviceState::project(&schema);

        assert_eq!(state.colour, None);
    }

    #[test]
    fn should_project_scene_mode_reports_to_the_scene_variant() {
        let mut schema = full_schema();
        schema.mode = Some("scene_3".to_string());
        assert_eq!(
            DeviceState::project(&schema).mode,
            Some(WorkMode::Scene)
        );

        schema.mode = Some("scene".to_string());
        assert_eq!(DeviceState::project(&schema).mode, Some(WorkMode::Scene));
    }

    #[test]
    fn should_degrade_unknown_mode_to_absent() {
        let mut schema = full_schema();
        schema.mode = Some("disco".to_string());
        assert_eq!(DeviceState::project(&schema).mode, None);
    }

    #[test]
    fn should_return_empty_state_for_empty_schema() {
        assert_eq!(DeviceState::project(&SchemaRecord::default()), DeviceState::default());
    }
}
