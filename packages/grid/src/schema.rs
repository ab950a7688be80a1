//! Column resolution for risk grid tables.
//!
//! Column naming varies across upstream dataset exports; the aliases here
//! are resolved case-insensitively exactly once per table, and every later
//! stage works with positional indices.

use crate::GridError;

/// Header spellings accepted for the latitude column.
pub const LAT_ALIASES: [&str; 2] = ["lat", "latitude"];

/// Header spellings accepted for the longitude column.
pub const LON_ALIASES: [&str; 3] = ["lon", "long", "longitude"];

/// Resolved column positions for one risk grid table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSchema {
    /// Latitude column index.
    pub latitude: usize,
    /// Longitude column index.
    pub longitude: usize,
    /// Risk score column index.
    pub risk_score: usize,
    /// Pre-banded risk level column index, when present.
    pub risk_level: Option<usize>,
    /// Forecast date column index, when present.
    pub date: Option<usize>,
}

impl GridSchema {
    /// Resolves the lat/lon/score columns from a header row.
    ///
    /// Matching is case-insensitive; the first header matching an alias
    /// wins. `risk_level` and `date` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Schema`] when no latitude alias, no longitude
    /// alias, or no `risk_score` column is present.
    pub fn detect(headers: &[String]) -> Result<Self, GridError> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        let latitude = find_alias(&lowered, &LAT_ALIASES).ok_or_else(|| GridError::Schema {
            message: format!(
                "no latitude column found; accepted aliases: {}",
                LAT_ALIASES.join(", ")
            ),
        })?;

        let longitude = find_alias(&lowered, &LON_ALIASES).ok_or_else(|| GridError::Schema {
            message: format!(
                "no longitude column found; accepted aliases: {}",
                LON_ALIASES.join(", ")
            ),
        })?;

        let risk_score =
            find_alias(&lowered, &["risk_score"]).ok_or_else(|| GridError::Schema {
                message: "no risk_score column found".to_string(),
            })?;

        Ok(Self {
            latitude,
            longitude,
            risk_score,
            risk_level: find_alias(&lowered, &["risk_level"]),
            date: find_alias(&lowered, &["date"]),
        })
    }
}

/// Index of the first header matching any alias.
fn find_alias(lowered_headers: &[String], aliases: &[&str]) -> Option<usize> {
    lowered_headers
        .iter()
        .position(|header| aliases.contains(&header.as_str()))
}

#[cfg(test)]
mod tests {
    use super::GridSchema;
    use crate::GridError;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn detects_canonical_headers() {
        let schema =
            GridSchema::detect(&headers(&["lat", "lon", "risk_score", "risk_level", "date"]))
                .unwrap();
        assert_eq!(schema.latitude, 0);
        assert_eq!(schema.longitude, 1);
        assert_eq!(schema.risk_score, 2);
        assert_eq!(schema.risk_level, Some(3));
        assert_eq!(schema.date, Some(4));
    }

    #[test]
    fn detects_long_form_aliases_case_insensitively() {
        let schema =
            GridSchema::detect(&headers(&["Latitude", "LONGITUDE", "Risk_Score"])).unwrap();
        assert_eq!(schema.latitude, 0);
        assert_eq!(schema.longitude, 1);
        assert_eq!(schema.risk_score, 2);
        assert_eq!(schema.risk_level, None);
        assert_eq!(schema.date, None);
    }

    #[test]
    fn accepts_long_spelling_for_longitude() {
        let schema = GridSchema::detect(&headers(&["lat", "long", "risk_score"])).unwrap();
        assert_eq!(schema.longitude, 1);
    }

    #[test]
    fn missing_latitude_is_a_schema_error() {
        let err = GridSchema::detect(&headers(&["y", "lon", "risk_score"])).unwrap_err();
        assert!(matches!(err, GridError::Schema { .. }));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn missing_longitude_is_a_schema_error() {
        let err = GridSchema::detect(&headers(&["lat", "x", "risk_score"])).unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn missing_risk_score_is_a_schema_error() {
        let err = GridSchema::detect(&headers(&["lat", "lon", "score"])).unwrap_err();
        assert!(err.to_string().contains("risk_score"));
    }

    #[test]
    fn ignores_surrounding_whitespace_in_headers() {
        let schema = GridSchema::detect(&headers(&[" lat ", " lon ", " risk_score "])).unwrap();
        assert_eq!(schema.risk_score, 2);
    }
}
