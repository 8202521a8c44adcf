use crate::weather::Weather;

/// Inclusive range of a slider control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl SliderRange {
    pub const fn new(min: u8, max: u8, default: u8) -> Self {
        Self { min, max, default }
    }

    /// Pull a raw value to the nearest end of the range, as the slider would.
    pub fn clamp(&self, raw: i64) -> u8 {
        raw.clamp(self.min as i64, self.max as i64) as u8
    }
}

pub const SEVERITY: SliderRange = SliderRange::new(0, 4, 2);
pub const START_HOUR: SliderRange = SliderRange::new(0, 23, 9);
/// 0 = Monday.
pub const DAY_OF_WEEK: SliderRange = SliderRange::new(0, 6, 2);

/// The nine values collected from the form.
///
/// Free numerics are passed through untouched: negative distance or
/// temperature is accepted and reaches the model as-is. `weather` stays a
/// plain label so that open input can be encoded (and rejected) downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficInputs {
    pub distance_mi: f64,
    pub severity: u8,
    pub temperature_f: f64,
    pub congestion_speed_mph: f64,
    pub start_hour: u8,
    pub visibility_mi: f64,
    pub delay_typical_mins: f64,
    pub day_of_week: u8,
    pub weather: String,
}

impl Default for TrafficInputs {
    fn default() -> Self {
        Self {
            distance_mi: 5.0,
            severity: SEVERITY.default,
            temperature_f: 75.0,
            congestion_speed_mph: 20.0,
            start_hour: START_HOUR.default,
            visibility_mi: 8.0,
            delay_typical_mins: 5.0,
            day_of_week: DAY_OF_WEEK.default,
            weather: Weather::DEFAULT.label().to_string(),
        }
    }
}
