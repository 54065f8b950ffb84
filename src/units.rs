//! Display units for room areas.

/// Length unit a plan is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    Feet,
    Meters,
}

impl LengthUnit {
    /// Document units per unit length.
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Feet => 15.24,
            Self::Meters => 50.0,
        }
    }

    #[must_use]
    pub fn area_suffix(self) -> &'static str {
        match self {
            Self::Feet => "ft²",
            Self::Meters => "m²",
        }
    }
}

/// Formats an area in document units², rounded to one decimal.
#[must_use]
pub fn format_area(area: f64, unit: LengthUnit) -> String {
    let scale = unit.scale();
    let value = (area / (scale * scale) * 10.0).round() / 10.0;
    format!("{value:.1} {}", unit.area_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_in_both_units() {
        assert_eq!(format_area(2500.0, LengthUnit::Meters), "1.0 m²");
        assert_eq!(format_area(15.24 * 15.24 * 12.34, LengthUnit::Feet), "12.3 ft²");
        assert_eq!(format_area(0.0, LengthUnit::Feet), "0.0 ft²");
    }
}
