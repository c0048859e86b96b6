//! Percentage ↔ device-byte conversions for brightness, saturation and speed.
//!
//! The bulb stores brightness and saturation on a non-linear 0–255 scale that
//! was determined empirically against real hardware: a fixed offset around 27
//! plus a linear ramp over the remaining range. The mappings are lossy, a
//! value pushed through encode and decode can come back off by one percent.
//! Speed is a plain linear complement and round-trips exactly.
//!
//! All percentage inputs are clamped to `[0, 100]` before use; out-of-range
//! values never error.

/// Empirical offset of the brightness byte ramp.
const BRIGHTNESS_OFFSET: f64 = 26.9;

/// Empirical offset of the saturation byte ramp.
const SATURATION_OFFSET: f64 = 27.0;

/// Rounding nudge applied when encoding saturation, so values sitting on a
/// step boundary land on the byte the bulb itself produces.
const SATURATION_NUDGE: f64 = 0.000_01;

/// Clamp an arbitrary integer into the `[0, 100]` percentage domain.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn ramp(offset: f64) -> f64 {
    (255.0 - offset) / 100.0
}

/// Encode a brightness percentage as the device byte.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn brightness_to_device(percent: i64) -> u8 {
    let pct = f64::from(clamp_percent(percent));
    (BRIGHTNESS_OFFSET + ramp(BRIGHTNESS_OFFSET) * pct).round() as u8
}

/// Decode a device brightness byte back to a percentage.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn device_to_brightness(byte: u8) -> u8 {
    let pct = (f64::from(byte) - BRIGHTNESS_OFFSET) / ramp(BRIGHTNESS_OFFSET);
    clamp_percent(pct.round() as i64 + 1)
}

/// Encode a saturation percentage as the device byte.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn saturation_to_device(percent: i64) -> u8 {
    let pct = f64::from(clamp_percent(percent));
    (SATURATION_OFFSET + ramp(SATURATION_OFFSET) * pct + SATURATION_NUDGE).round() as u8
}

/// Decode a device saturation byte back to a percentage.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn device_to_saturation(byte: u8) -> u8 {
    let pct = (f64::from(byte) - SATURATION_OFFSET) / ramp(SATURATION_OFFSET) + 0.5;
    clamp_percent(pct.round() as i64)
}

/// Encode a speed percentage as the device byte (linear complement).
#[must_use]
pub fn speed_to_device(percent: i64) -> u8 {
    101 - clamp_percent(percent)
}

/// Decode a device speed byte back to a percentage.
#[must_use]
pub fn device_to_speed(byte: u8) -> u8 {
    clamp_percent(101 - i64::from(byte))
}
