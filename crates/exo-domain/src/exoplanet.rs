//! Exoplanet listing filter and sort types.

use serde::{Deserialize, Serialize};

use crate::pagination::Sort;

/// Optional filters for the exoplanet summary listing. All bounds are
/// inclusive; the name filter is a case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExoplanetFilter {
    pub name: Option<String>,
    pub min_temp: Option<f32>,
    pub max_temp: Option<f32>,
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl ExoplanetFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Sort order for the exoplanet summary listing.
///
/// Requires a custom `Deserialize` impl because the wire format is a single
/// hyphenated string (e.g. `"id-desc"`) rather than a nested enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExoplanetSortBy {
    Id(Sort),
    Name(Sort),
    Distance(Sort),
    Temperature(Sort),
    YearDiscovered(Sort),
}

impl Default for ExoplanetSortBy {
    fn default() -> Self {
        Self::Id(Sort::Desc)
    }
}

impl<'de> Deserialize<'de> for ExoplanetSortBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "id-desc" => Ok(Self::Id(Sort::Desc)),
            "id-asc" => Ok(Self::Id(Sort::Asc)),
            "name-desc" => Ok(Self::Name(Sort::Desc)),
            "name-asc" => Ok(Self::Name(Sort::Asc)),
            "distance-desc" => Ok(Self::Distance(Sort::Desc)),
            "distance-asc" => Ok(Self::Distance(Sort::Asc)),
            "temperature-desc" => Ok(Self::Temperature(Sort::Desc)),
            "temperature-asc" => Ok(Self::Temperature(Sort::Asc)),
            "year-discovered-desc" => Ok(Self::YearDiscovered(Sort::Desc)),
            "year-discovered-asc" => Ok(Self::YearDiscovered(Sort::Asc)),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &[
                    "id-desc",
                    "id-asc",
                    "name-desc",
                    "name-asc",
                    "distance-desc",
                    "distance-asc",
                    "temperature-desc",
                    "temperature-asc",
                    "year-discovered-desc",
                    "year-discovered-asc",
                ],
            )),
        }
    }
}

impl Serialize for ExoplanetSortBy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self {
            Self::Id(Sort::Desc) => "id-desc",
            Self::Id(Sort::Asc) => "id-asc",
            Self::Name(Sort::Desc) => "name-desc",
            Self::Name(Sort::Asc) => "name-asc",
            Self::Distance(Sort::Desc) => "distance-desc",
            Self::Distance(Sort::Asc) => "distance-asc",
            Self::Temperature(Sort::Desc) => "temperature-desc",
            Self::Temperature(Sort::Asc) => "temperature-asc",
            Self::YearDiscovered(Sort::Desc) => "year-discovered-desc",
            Self::YearDiscovered(Sort::Asc) => "year-discovered-asc",
        };
        serializer.serialize_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_str(s: &str) -> ExoplanetSortBy {
        serde_json::from_str(&format!("\"{s}\"")).unwrap()
    }

    #[test]
    fn should_deserialize_all_sort_by_variants() {
        assert_eq!(from_str("id-desc"), ExoplanetSortBy::Id(Sort::Desc));
        assert_eq!(from_str("id-asc"), ExoplanetSortBy::Id(Sort::Asc));
        assert_eq!(from_str("name-asc"), ExoplanetSortBy::Name(Sort::Asc));
        assert_eq!(
            from_str("distance-desc"),
            ExoplanetSortBy::Distance(Sort::Desc)
        );
        assert_eq!(
            from_str("temperature-asc"),
            ExoplanetSortBy::Temperature(Sort::Asc)
        );
        assert_eq!(
            from_str("year-discovered-desc"),
            ExoplanetSortBy::YearDiscovered(Sort::Desc)
        );
    }

    #[test]
    fn should_serialize_sort_by_variants() {
        assert_eq!(
            serde_json::to_string(&ExoplanetSortBy::Id(Sort::Desc)).unwrap(),
            "\"id-desc\""
        );
        assert_eq!(
            serde_json::to_string(&ExoplanetSortBy::YearDiscovered(Sort::Asc)).unwrap(),
            "\"year-discovered-asc\""
        );
    }

    #[test]
    fn should_default_sort_by_to_id_desc() {
        assert_eq!(ExoplanetSortBy::default(), ExoplanetSortBy::Id(Sort::Desc));
    }

    #[test]
    fn should_reject_unknown_sort_by_variant() {
        assert!(serde_json::from_str::<ExoplanetSortBy>("\"mass-asc\"").is_err());
    }

    #[test]
    fn should_report_empty_filter() {
        assert!(ExoplanetFilter::default().is_empty());
        assert!(
            !ExoplanetFilter {
                min_temp: Some(180.0),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
