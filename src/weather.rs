use std::str::FromStr;

use crate::error::EncodingError;

/// Weather labels in the order the model was fit with. The code of a label is
/// its index here; never reorder or insert in the middle.
pub const WEATHER_CONDITIONS: [&str; 22] = [
    "Clear",
    "Sunny",
    "Mostly Sunny",
    "Partly Sunny",
    "Partly Cloudy",
    "Mostly Cloudy",
    "Cloudy",
    "Overcast",
    "Fair",
    "Hazy",
    "Smoke",
    "Fog",
    "Foggy",
    "Mist",
    "Misty",
    "Rain",
    "Light Rain",
    "Moderate Rain",
    "Heavy Rain",
    "Snow",
    "Light Snow",
    "Heavy Snow",
];

/// A member of the weather enumeration, stored as its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weather(u8);

impl Weather {
    /// First label in the list; what the selector shows initially.
    pub const DEFAULT: Weather = Weather(0);

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        WEATHER_CONDITIONS[self.0 as usize]
    }
}

impl FromStr for Weather {
    type Err = EncodingError;

    /// Exact, case-sensitive match against the label list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WEATHER_CONDITIONS
            .iter()
            .position(|w| *w == s)
            .map(|i| Weather(i as u8))
            .ok_or_else(|| EncodingError::UnknownWeather(s.to_string()))
    }
}

/// Weather label -> integer code.
pub fn encode(label: &str) -> Result<u8, EncodingError> {
    label.parse::<Weather>().map(Weather::code)
}
