//! Virtual adapter — a simulated bulb answering the transport port from an
//! in-memory DPS table.
//!
//! Reads snapshot the table; writes apply their entries key by key, so a
//! read after a write observes what a real device would report back. This
//! makes the whole decode/encode pipeline drivable in tests and demos
//! without hardware.

use std::collections::BTreeMap;

use bulbctl_app::error::BulbError;
use bulbctl_app::ports::{BulbTransport, DpsWrite};
use bulbctl_domain::status::RawStatus;
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// An in-memory bulb: a device id plus a mutable DPS table.
pub struct VirtualBulb {
    device_id: String,
    dps: Mutex<BTreeMap<String, Value>>,
}

impl VirtualBulb {
    /// Create an empty bulb that reports no data points, behaving like a
    /// device that never answers with anything useful.
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            dps: Mutex::new(BTreeMap::new()),
        }
    }

    /// Create a bulb pre-seeded with a realistic status capture: switched
    /// on, white mode at raw 90/50, all four flash-scene slots populated.
    #[must_use]
    pub fn seeded(device_id: impl Into<String>) -> Self {
        let dps = BTreeMap::from([
            ("1".to_string(), json!(true)),
            ("2".to_string(), json!("white")),
            ("3".to_string(), json!(90)),
            ("4".to_string(), json!(50)),
            ("5".to_string(), json!("000000")),
            ("6".to_string(), json!("000000")),
            ("7".to_string(), json!("24d10101ff0000")),
            (
                "8".to_string(),
                json!("78ac0106692626695d26266926266269332669692661"),
            ),
            ("9".to_string(), json!("311b0101ff0000")),
            (
                "10".to_string(),
                json!("ffff0106ff0000ffe60009ff0000f7fffffffff700ff"),
            ),
        ]);
        Self {
            device_id: device_id.into(),
            dps: Mutex::new(dps),
        }
    }

    /// Snapshot the current DPS table.
    pub async fn dps(&self) -> BTreeMap<String, Value> {
        self.dps.lock().await.clone()
    }
}

impl BulbTransport for VirtualBulb {
    async fn read_status(&self) -> Result<RawStatus, BulbError> {
        let dps = self.dps.lock().await.clone();
        Ok(RawStatus {
            device_id: Some(self.device_id.clone()),
            dps,
        })
    }

    async fn send(&self, write: DpsWrite) -> Result<(), BulbError> {
        let mut dps = self.dps.lock().await;
        for (key, value) in write {
            dps.insert(key, value);
        }
        Ok(())
    }
}

/// Simulated connectivity failure of a [`FlakyBulb`].
#[derive(Debug, thiserror::Error)]
#[error("simulated connection reset")]
pub struct ConnectionReset;

/// A bulb whose first `failures` calls fail with a connection reset, then
/// behaves like the wrapped bulb. Useful for exercising retry policies
/// against a realistic device.
pub struct FlakyBulb {
    inner: VirtualBulb,
    failures: u32,
    calls: Mutex<u32>,
}

impl FlakyBulb {
    #[must_use]
    pub fn new(inner: VirtualBulb, failures: u32) -> Self {
        Self {
            inner,
            failures,
            calls: Mutex::new(0),
        }
    }

    async fn failing(&self) -> bool {
        let mut calls = self.calls.lock().await;
        *calls += 1;
        *calls <= self.failures
    }
}

impl BulbTransport for FlakyBulb {
    async fn read_status(&self) -> Result<RawStatus, BulbError> {
        if self.failing().await {
            return Err(BulbError::transport(ConnectionReset));
        }
        self.inner.read_status().await
    }

    async fn send(&self, write: DpsWrite) -> Result<(), BulbError> {
        if self.failing().await {
            return Err(BulbError::transport(ConnectionReset));
        }
        self.inner.send(write).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulbctl_app::retry::{RetryPolicy, Retrying};
    use bulbctl_app::services::BulbService;
    use bulbctl_domain::colour::Rgb;
    use bulbctl_domain::editor::SceneOverrides;
    use bulbctl_domain::flash_scene::SceneRecord;
    use bulbctl_domain::percent::device_to_brightness;
    use bulbctl_domain::scene::Scene;
    use bulbctl_domain::state::WorkMode;

    fn seeded_service() -> BulbService<VirtualBulb> {
        BulbService::new(VirtualBulb::seeded("virtual-1"))
    }

    #[tokio::test]
    async fn should_project_the_seeded_capture() {
        let svc = seeded_service();
        let state = svc.state().await.unwrap();

        assert_eq!(state.on, Some(true));
        assert_eq!(state.mode, Some(WorkMode::White));
        assert_eq!(state.brightness, Some(device_to_brightness(90)));
        assert_eq!(state.temperature, Some(device_to_brightness(50)));
        for scene in Scene::ALL {
            assert!(state.scenes.get(scene).is_some());
        }
    }

    #[tokio::test]
    async fn should_project_an_empty_bulb_to_the_empty_state() {
        let svc = BulbService::new(VirtualBulb::new("virtual-blank"));
        let state = svc.state().await.unwrap();
        assert_eq!(state, bulbctl_domain::state::DeviceState::default());
    }

    #[tokio::test]
    async fn should_observe_a_colour_write_on_the_next_read() {
        let svc = seeded_service();
        svc.set_colour(Rgb::new(50, 10, 50)).await.unwrap();

        let status = svc.status().await.unwrap();
        assert_eq!(status.dps.get("2"), Some(&json!("colour")));
        assert_eq!(status.dps.get("5"), Some(&json!("320a32012ccc32")));

        // The 14-char colour value the write produced decodes back to the
        // same triple on the next read.
        let state = svc.state().await.unwrap();
        assert_eq!(state.mode, Some(WorkMode::Colour));
        assert_eq!(state.colour, Some(Rgb::new(50, 10, 50)));
    }

    #[tokio::test]
    async fn should_observe_a_power_toggle_on_the_next_read() {
        let svc = seeded_service();
        svc.turn_off().await.unwrap();
        assert_eq!(svc.state().await.unwrap().on, Some(false));

        svc.turn_on().await.unwrap();
        assert_eq!(svc.state().await.unwrap().on, Some(true));
    }

    #[tokio::test]
    async fn should_round_trip_a_scene_edit_through_the_table() {
        let svc = seeded_service();
        let overrides = SceneOverrides {
            speed: Some(10),
            ..SceneOverrides::default()
        };
        svc.edit_scene(Scene::Soft, &overrides).await.unwrap();

        let state = svc.state().await.unwrap();
        let Some(SceneRecord::OneColour { speed, colour, .. }) = state.scenes.get(Scene::Soft)
        else {
            panic!("expected a one-colour record");
        };
        assert_eq!(*speed, 10);
        // The untouched fields survive the re-encode.
        assert_eq!(*colour, Rgb::new(255, 0, 0));
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: std::time::Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn should_recover_through_retries_against_a_flaky_bulb() {
        let flaky = FlakyBulb::new(VirtualBulb::seeded("virtual-flaky"), 2);
        let svc = BulbService::new(Retrying::new(flaky, fast_policy(3)));

        let state = svc.state().await.unwrap();
        assert_eq!(state.on, Some(true));
    }

    #[tokio::test]
    async fn should_degrade_to_empty_state_while_the_bulb_stays_down() {
        let flaky = FlakyBulb::new(VirtualBulb::seeded("virtual-down"), 10);
        let svc = BulbService::new(Retrying::new(flaky, fast_policy(2)));

        let state = svc.state().await.unwrap();
        assert_eq!(state, bulbctl_domain::state::DeviceState::default());
    }

    #[tokio::test]
    async fn should_keep_unrelated_slots_untouched_by_an_edit() {
        let svc = seeded_service();
        let before = svc.status().await.unwrap();
        let overrides = SceneOverrides {
            brightness: Some(42),
            ..SceneOverrides::default()
        };
        svc.edit_scene(Scene::Exciting, &overrides).await.unwrap();

        let after = svc.status().await.unwrap();
        assert_ne!(before.dps.get("9"), after.dps.get("9"));
        for key in ["7", "8", "10"] {
            assert_eq!(before.dps.get(key), after.dps.get(key));
        }
    }
}
