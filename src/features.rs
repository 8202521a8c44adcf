//! The row handed to the model.
//!
//! Column names, field order and the flattening into a vector all come out of
//! the single `feature_record!` invocation below, so the struct and the
//! ordering the model sees cannot drift apart.

use crate::{error::EncodingError, inputs::TrafficInputs, weather};

macro_rules! feature_record {
    ($( $(#[$meta:meta])* $vis:vis $field:ident : $ty:ty => $column:literal ),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct FeatureRecord {
            $( $(#[$meta])* $vis $field: $ty, )+
        }

        /// Column names in the order the model expects them.
        pub const FEATURE_COLUMNS: &[&str] = &[$($column),+];

        impl FeatureRecord {
            /// Values in column order.
            pub fn values(&self) -> [f64; FEATURE_COUNT] {
                [$(self.$field as f64),+]
            }

            /// `(column, value)` pairs in column order.
            pub fn named(&self) -> [(&'static str, f64); FEATURE_COUNT] {
                [$(($column, self.$field as f64)),+]
            }
        }
    };
}

feature_record! {
    pub distance_mi: f64 => "Distance(mi)",
    pub congestion_speed_mph: f64 => "Congestion_Speed",
    pub delay_typical_mins: f64 => "DelayFromTypicalTraffic(mins)",
    /// Not collected; always 0.
    delay_free_flow_mins: f64 => "DelayFromFreeFlowSpeed(mins)",
    pub severity: u8 => "Severity",
    pub start_hour: u8 => "StartHour",
    pub start_day_of_week: u8 => "StartDayOfWeek",
    pub temperature_f: f64 => "Temperature(F)",
    pub visibility_mi: f64 => "Visibility(mi)",
    pub weather_code: u8 => "Weather_Conditions",
}

pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

impl FeatureRecord {
    /// Encode the weather label and lay the inputs out in column order.
    pub fn assemble(inputs: &TrafficInputs) -> Result<Self, EncodingError> {
        let weather_code = weather::encode(&inputs.weather)?;
        Ok(Self {
            distance_mi: inputs.distance_mi,
            congestion_speed_mph: inputs.congestion_speed_mph,
            delay_typical_mins: inputs.delay_typical_mins,
            delay_free_flow_mins: 0.0,
            severity: inputs.severity,
            start_hour: inputs.start_hour,
            start_day_of_week: inputs.day_of_week,
            temperature_f: inputs.temperature_f,
            visibility_mi: inputs.visibility_mi,
            weather_code,
        })
    }

    /// All-zero row, used to warm the model up after loading.
    pub fn zeros() -> Self {
        Self {
            distance_mi: 0.0,
            congestion_speed_mph: 0.0,
            delay_typical_mins: 0.0,
            delay_free_flow_mins: 0.0,
            severity: 0,
            start_hour: 0,
            start_day_of_week: 0,
            temperature_f: 0.0,
            visibility_mi: 0.0,
            weather_code: 0,
        }
    }

    pub fn delay_free_flow_mins(&self) -> f64 {
        self.delay_free_flow_mins
    }

    /// Row as float32, the dtype the model was exported with.
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.values().map(|v| v as f32)
    }
}
