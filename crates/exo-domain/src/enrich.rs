//! Read-only exoplanet enrichment: habitability, travel time, and Earth
//! comparison, computed from already-loaded fields with no I/O.

use serde::Serialize;

/// Lower bound of the habitable temperature band, in kelvin.
pub const HABITABLE_MIN_K: f32 = 180.0;

/// Upper bound of the habitable temperature band, in kelvin.
pub const HABITABLE_MAX_K: f32 = 310.0;

/// Radius/mass within this distance of 1.0 counts as "similar to Earth".
const EARTH_SIMILARITY_TOLERANCE: f32 = 0.1;

/// Physical fields consumed by the enrichment chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalProfile {
    pub temperature_k: Option<f32>,
    pub distance_ly: Option<f32>,
    pub radius_earths: Option<f32>,
    pub mass_earths: Option<f32>,
    pub orbital_period_days: Option<f32>,
}

/// Derived, read-only view attached to detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct Enrichment {
    pub potentially_habitable: bool,
    pub travel_time_years: Option<f32>,
    pub speed_fraction: f32,
    pub radius_vs_earth: String,
    pub mass_vs_earth: String,
    pub orbital_period: String,
}

impl Enrichment {
    pub fn compute(profile: PhysicalProfile, speed_fraction: f32) -> Self {
        Self {
            potentially_habitable: is_potentially_habitable(profile.temperature_k),
            travel_time_years: travel_time_years(profile.distance_ly, speed_fraction),
            speed_fraction,
            radius_vs_earth: radius_vs_earth(profile.radius_earths),
            mass_vs_earth: mass_vs_earth(profile.mass_earths),
            orbital_period: format_orbital_period(profile.orbital_period_days),
        }
    }
}

/// Habitability heuristic: equilibrium temperature within 180–310 K inclusive.
pub fn is_potentially_habitable(temperature_k: Option<f32>) -> bool {
    matches!(temperature_k, Some(t) if (HABITABLE_MIN_K..=HABITABLE_MAX_K).contains(&t))
}

/// Travel time in years at a fraction of light speed. `None` when the
/// distance is unknown or the fraction is non-positive.
pub fn travel_time_years(distance_ly: Option<f32>, speed_fraction: f32) -> Option<f32> {
    if speed_fraction <= 0.0 {
        return None;
    }
    distance_ly.map(|d| d / speed_fraction)
}

/// Radius relative to Earth, as a display string.
pub fn radius_vs_earth(radius_earths: Option<f32>) -> String {
    compare_to_earth(radius_earths, "size unknown", "larger", "smaller")
}

/// Mass relative to Earth, as a display string.
pub fn mass_vs_earth(mass_earths: Option<f32>) -> String {
    compare_to_earth(mass_earths, "mass unknown", "more massive", "less massive")
}

fn compare_to_earth(value: Option<f32>, unknown: &str, above: &str, below: &str) -> String {
    let Some(v) = value else {
        return unknown.to_owned();
    };
    if (v - 1.0).abs() < EARTH_SIMILARITY_TOLERANCE {
        "similar to Earth".to_owned()
    } else if v > 1.0 {
        format!("{:.1}x {above} than Earth", v)
    } else {
        format!("{:.1}x {below} than Earth", 1.0 / v)
    }
}

/// Orbital period in the most readable unit: days below 100 days, years above.
pub fn format_orbital_period(orbital_period_days: Option<f32>) -> String {
    match orbital_period_days {
        None => "unknown".to_owned(),
        Some(d) if d < 100.0 => format!("{d:.1} days"),
        Some(d) => format!("{:.2} years", d / 365.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_habitable_band_boundaries() {
        assert!(is_potentially_habitable(Some(180.0)));
        assert!(is_potentially_habitable(Some(310.0)));
        assert!(is_potentially_habitable(Some(288.0)));
    }

    #[test]
    fn should_reject_outside_habitable_band() {
        assert!(!is_potentially_habitable(Some(179.9)));
        assert!(!is_potentially_habitable(Some(310.1)));
        assert!(!is_potentially_habitable(None));
    }

    #[test]
    fn should_compute_travel_time_at_speed_fraction() {
        assert_eq!(travel_time_years(Some(42.0), 0.1), Some(420.0));
        assert_eq!(travel_time_years(Some(10.0), 1.0), Some(10.0));
    }

    #[test]
    fn should_not_compute_travel_time_without_distance_or_speed() {
        assert_eq!(travel_time_years(None, 0.1), None);
        assert_eq!(travel_time_years(Some(42.0), 0.0), None);
        assert_eq!(travel_time_years(Some(42.0), -1.0), None);
    }

    #[test]
    fn should_describe_radius_relative_to_earth() {
        assert_eq!(radius_vs_earth(None), "size unknown");
        assert_eq!(radius_vs_earth(Some(1.05)), "similar to Earth");
        assert_eq!(radius_vs_earth(Some(2.5)), "2.5x larger than Earth");
        assert_eq!(radius_vs_earth(Some(0.5)), "2.0x smaller than Earth");
    }

    #[test]
    fn should_describe_mass_relative_to_earth() {
        assert_eq!(mass_vs_earth(None), "mass unknown");
        assert_eq!(mass_vs_earth(Some(0.95)), "similar to Earth");
        assert_eq!(mass_vs_earth(Some(3.0)), "3.0x more massive than Earth");
        assert_eq!(mass_vs_earth(Some(0.25)), "4.0x less massive than Earth");
    }

    #[test]
    fn should_format_orbital_period_in_days_or_years() {
        assert_eq!(format_orbital_period(None), "unknown");
        assert_eq!(format_orbital_period(Some(12.3)), "12.3 days");
        assert_eq!(format_orbital_period(Some(365.0)), "1.00 years");
        assert_eq!(format_orbital_period(Some(730.0)), "2.00 years");
    }

    #[test]
    fn should_compute_full_enrichment() {
        let profile = PhysicalProfile {
            temperature_k: Some(273.0),
            distance_ly: Some(42.0),
            radius_earths: Some(1.0),
            mass_earths: Some(1.0),
            orbital_period_days: Some(365.0),
        };
        let e = Enrichment::compute(profile, 0.1);
        assert!(e.potentially_habitable);
        assert_eq!(e.travel_time_years, Some(420.0));
        assert_eq!(e.radius_vs_earth, "similar to Earth");
        assert_eq!(e.mass_vs_earth, "similar to Earth");
        assert_eq!(e.orbital_period, "1.00 years");
    }
}
