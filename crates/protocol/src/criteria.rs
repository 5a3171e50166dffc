//! Filter criteria value objects, one per view.
//!
//! Every field is a raw string exactly as a filter form would submit it; a blank
//! field means "no constraint". Interpretation (threshold parsing, date windows)
//! belongs to the engine, so malformed values still round-trip unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCriteria {
    pub search_term: String,
    pub category: String,
    /// Minimum average rating, e.g. `"4"`.
    #[serde(alias = "rating")]
    pub min_rating: String,
    /// One of `positive`, `negative`, `neutral`.
    pub sentiment: String,
    pub source: String,
}

impl ProductCriteria {
    pub fn is_unconstrained(&self) -> bool {
        is_blank(&self.search_term)
            && is_blank(&self.category)
            && is_blank(&self.min_rating)
            && is_blank(&self.sentiment)
            && is_blank(&self.source)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionCriteria {
    pub search_term: String,
    pub user: String,
    /// One of `today`, `week`, `month`; blank for all time.
    pub date_range: String,
}

impl SessionCriteria {
    pub fn is_unconstrained(&self) -> bool {
        is_blank(&self.search_term) && is_blank(&self.user) && is_blank(&self.date_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_criteria_impose_nothing() {
        assert!(ProductCriteria::default().is_unconstrained());
        assert!(SessionCriteria::default().is_unconstrained());
    }

    #[test]
    fn whitespace_fields_count_as_blank() {
        let criteria = ProductCriteria {
            search_term: "   ".to_string(),
            ..ProductCriteria::default()
        };
        assert!(criteria.is_unconstrained());

        let criteria = SessionCriteria {
            date_range: "week".to_string(),
            ..SessionCriteria::default()
        };
        assert!(!criteria.is_unconstrained());
    }

    #[test]
    fn partial_payload_fills_defaults() {
        let criteria: ProductCriteria =
            serde_json::from_value(json!({ "rating": "4", "sentiment": "positive" }))
                .expect("criteria");
        assert_eq!(
            criteria,
            ProductCriteria {
                min_rating: "4".to_string(),
                sentiment: "positive".to_string(),
                ..ProductCriteria::default()
            }
        );

        let criteria: SessionCriteria =
            serde_json::from_value(json!({ "dateRange": "month" })).expect("criteria");
        assert_eq!(criteria.date_range, "month");
        assert_eq!(criteria.user, "");
    }
}
