//! Bulb service — the facade over one device transport.
//!
//! The read side runs the full decode pipeline (raw status → positional
//! vector → schema → semantic state); the write side encodes semantic
//! requests into DPS payloads. The facade owns its transport and exposes
//! only this surface, nothing is forwarded reflectively.

use bulbctl_domain::colour::{NamedColour, Rgb};
use bulbctl_domain::editor::{self, SceneOverrides};
use bulbctl_domain::percent::brightness_to_device;
use bulbctl_domain::scene::{Scene, select_mode_value};
use bulbctl_domain::schema::{
    self, DP_BRIGHTNESS, DP_COLOUR, DP_MODE, DP_SWITCH, DP_TEMPERATURE, SchemaRecord,
};
use bulbctl_domain::state::{DeviceState, WorkMode};
use bulbctl_domain::status::{RawStatus, normalize_dps};

use crate::error::BulbError;
use crate::ports::{BulbTransport, DpsWrite};

/// Facade for a single bulb, generic over the transport that reaches it.
pub struct BulbService<T> {
    transport: T,
}

impl<T: BulbTransport> BulbService<T> {
    /// Create a new service owning the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    // ── Read side ───────────────────────────────────────────────────────

    /// Raw status from a single device query. Values are not decoded.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    pub async fn status(&self) -> Result<RawStatus, BulbError> {
        self.transport.read_status().await
    }

    /// The current status mapped onto the fixed schema (undecoded values).
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    pub async fn schema(&self) -> Result<SchemaRecord, BulbError> {
        let status = self.status().await?;
        let dps = normalize_dps(&status.dps);
        Ok(SchemaRecord::from_dps(&dps))
    }

    /// The current semantic device state. An unanswered query (empty
    /// status) projects to an empty state rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    #[tracing::instrument(skip(self))]
    pub async fn state(&self) -> Result<DeviceState, BulbError> {
        Ok(DeviceState::project(&self.schema().await?))
    }

    /// Current white-mode brightness percentage, freshly read.
    ///
    /// A pre-captured [`DeviceState`] exposes the same value directly.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    pub async fn brightness(&self) -> Result<Option<u8>, BulbError> {
        Ok(self.state().await?.brightness)
    }

    /// Current colour-mode colour, freshly read.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    pub async fn colour(&self) -> Result<Option<Rgb>, BulbError> {
        Ok(self.state().await?.colour)
    }

    /// Current white-mode colour temperature percentage, freshly read.
    /// (Colour temperature, not heat.)
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    pub async fn temperature(&self) -> Result<Option<u8>, BulbError> {
        Ok(self.state().await?.temperature)
    }

    // ── Write side ──────────────────────────────────────────────────────

    /// Switch the bulb on.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn turn_on(&self) -> Result<(), BulbError> {
        self.set_power(true).await
    }

    /// Switch the bulb off.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn turn_off(&self) -> Result<(), BulbError> {
        self.set_power(false).await
    }

    async fn set_power(&self, on: bool) -> Result<(), BulbError> {
        let write = DpsWrite::from([(schema::wire_key(DP_SWITCH), serde_json::json!(on))]);
        self.transport.send(write).await
    }

    /// Set white-mode brightness (percent, clamped to `[0, 100]`).
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn set_brightness(&self, percent: i64) -> Result<(), BulbError> {
        let write = DpsWrite::from([(
            schema::wire_key(DP_BRIGHTNESS),
            serde_json::json!(brightness_to_device(percent)),
        )]);
        self.transport.send(write).await
    }

    /// Set white-mode colour temperature (percent, clamped to `[0, 100]`).
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn set_temperature(&self, percent: i64) -> Result<(), BulbError> {
        let write = DpsWrite::from([(
            schema::wire_key(DP_TEMPERATURE),
            serde_json::json!(brightness_to_device(percent)),
        )]);
        self.transport.send(write).await
    }

    /// Switch to white mode, optionally updating brightness/temperature.
    ///
    /// Arguments left `None` keep the device's current values (read back
    /// from the bulb); a value the device never reported is omitted from
    /// the payload.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached
    /// or the payload cannot be delivered.
    #[tracing::instrument(skip(self))]
    pub async fn set_white(
        &self,
        brightness: Option<i64>,
        temperature: Option<i64>,
    ) -> Result<(), BulbError> {
        let state = self.state().await?;

        let mut write = DpsWrite::from([(
            schema::wire_key(DP_MODE),
            serde_json::json!(WorkMode::White.wire_value()),
        )]);
        if let Some(pct) = brightness.or(state.brightness.map(i64::from)) {
            write.insert(
                schema::wire_key(DP_BRIGHTNESS),
                serde_json::json!(brightness_to_device(pct)),
            );
        }
        if let Some(pct) = temperature.or(state.temperature.map(i64::from)) {
            write.insert(
                schema::wire_key(DP_TEMPERATURE),
                serde_json::json!(brightness_to_device(pct)),
            );
        }

        self.transport.send(write).await
    }

    /// Switch to colour mode showing the given colour.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn set_colour(&self, colour: Rgb) -> Result<(), BulbError> {
        let write = DpsWrite::from([
            (
                schema::wire_key(DP_MODE),
                serde_json::json!(WorkMode::Colour.wire_value()),
            ),
            (
                schema::wire_key(DP_COLOUR),
                serde_json::json!(colour.to_device_hex()),
            ),
        ]);
        self.transport.send(write).await
    }

    /// Switch to colour mode showing one of the fixed named colours.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn set_named_colour(&self, colour: NamedColour) -> Result<(), BulbError> {
        self.set_colour(colour.rgb()).await
    }

    /// Select a preset scene by index (0 selects plain scene mode, 1–4 a
    /// flash scene). Indices outside 0–4 are a no-op: nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self))]
    pub async fn set_scene(&self, index: u8) -> Result<(), BulbError> {
        let Some((key, value)) = select_mode_value(index) else {
            tracing::debug!(index, "scene index out of range, nothing sent");
            return Ok(());
        };
        let write = DpsWrite::from([(key, serde_json::json!(value))]);
        self.transport.send(write).await
    }

    /// Edit one scene's stored record: read the current state, merge the
    /// overrides onto the decoded record, and write the re-encoded slot.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached
    /// or the payload cannot be delivered.
    #[tracing::instrument(skip(self, overrides))]
    pub async fn edit_scene(
        &self,
        scene: Scene,
        overrides: &SceneOverrides,
    ) -> Result<(), BulbError> {
        let state = self.state().await?;
        self.edit_scene_with(scene, overrides, &state).await
    }

    /// Like [`edit_scene`](Self::edit_scene) but reusing a pre-captured
    /// state snapshot, avoiding a redundant device read.
    ///
    /// A merge that cannot produce a complete record (the slot was never
    /// decoded and the overrides are partial) is a no-op: nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    #[tracing::instrument(skip(self, overrides, state))]
    pub async fn edit_scene_with(
        &self,
        scene: Scene,
        overrides: &SceneOverrides,
        state: &DeviceState,
    ) -> Result<(), BulbError> {
        let Some(write) = editor::edit(scene, state.scenes.get(scene), overrides) else {
            tracing::warn!(%scene, "no decoded record and incomplete overrides, nothing sent");
            return Ok(());
        };
        let payload = DpsWrite::from([(write.key, serde_json::json!(write.hex))]);
        self.transport.send(payload).await
    }
}
