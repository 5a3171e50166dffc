//! Render-ready projections of records. Metrics are recomputed on every call;
//! nothing is cached on the record.

use dashboard_protocol::{Product, RecordId, Session, Topic};
use serde::Serialize;

use crate::date_window::parse_timestamp;
use crate::metrics::{
    format_percent, format_rating, positive_percent, top_topics, SentimentBucket, UNKNOWN_METRIC,
};

/// Topics shown on a product card.
pub const CARD_TOPIC_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub rating: String,
    /// Absent when the product carries no review statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<u64>,
    pub positive_percent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentBucket>,
    pub sources: Vec<String>,
    pub top_topics: Vec<Topic>,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        let stats = product.review_stats.as_ref();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category_name().map(str::to_string),
            rating: format_rating(stats.and_then(|stats| stats.average_rating)),
            total_reviews: stats.map(|stats| stats.total_reviews),
            positive_percent: format_percent(stats.and_then(positive_percent)),
            sentiment: stats.and_then(SentimentBucket::classify),
            sources: product.source_names().map(str::to_string).collect(),
            top_topics: stats
                .map(|stats| top_topics(stats, CARD_TOPIC_LIMIT).to_vec())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRow {
    pub id: RecordId,
    pub label: String,
    /// `YYYY-MM-DD`, or `n/a` when the timestamp is missing or unreadable.
    pub date: String,
    pub user: String,
}

impl SessionRow {
    pub fn from_session(session: &Session) -> Self {
        let date = session
            .analysis_date
            .as_deref()
            .and_then(parse_timestamp)
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNKNOWN_METRIC.to_string());
        let named_user = session
            .user
            .as_ref()
            .filter(|user| !user.name.trim().is_empty());
        let user = match named_user {
            Some(user) if user.role.trim().is_empty() => user.name.clone(),
            Some(user) => format!("{} ({})", user.name, user.role),
            None => UNKNOWN_METRIC.to_string(),
        };
        Self {
            id: session.id.clone(),
            label: session.analysis_label.clone(),
            date,
            user,
        }
    }
}
