//! Criteria compiled into predicates and applied over a record collection.
//!
//! Every set criterion narrows the result (logical AND); blank criteria match
//! everything. Filtering borrows the input and keeps survivors in input order.

use chrono::{DateTime, Utc};
use dashboard_protocol::{Product, ProductCriteria, Session, SessionCriteria};

use crate::date_window::{parse_timestamp, resolve_cutoff};
use crate::facets::{Facet, Faceted};
use crate::metrics::SentimentBucket;

pub trait RecordPredicate<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Survivors of `predicate`, in their original relative order.
pub fn apply_filters<'a, T, P>(records: &'a [T], predicate: &P) -> Vec<&'a T>
where
    P: RecordPredicate<T> + ?Sized,
{
    let filtered: Vec<&T> = records
        .iter()
        .filter(|record| predicate.matches(record))
        .collect();
    log::debug!("Filter kept {}/{} records", filtered.len(), records.len());
    filtered
}

pub fn filter_products<'a>(
    products: &'a [Product],
    criteria: &ProductCriteria,
) -> Vec<&'a Product> {
    apply_filters(products, &ProductFilter::compile(criteria))
}

pub fn filter_sessions<'a>(
    sessions: &'a [Session],
    criteria: &SessionCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a Session> {
    apply_filters(sessions, &SessionFilter::compile(criteria, now))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

fn facet_matches<T: Faceted>(record: &T, facet: Facet, wanted: &str) -> bool {
    record
        .facet_values(facet)
        .iter()
        .any(|value| value.trim() == wanted)
}

fn parse_threshold(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            log::debug!("Ignoring unparsable rating threshold {raw:?}");
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    search: Option<String>,
    category: Option<String>,
    min_rating: Option<f64>,
    sentiment: Option<SentimentBucket>,
    source: Option<String>,
}

impl ProductFilter {
    pub fn compile(criteria: &ProductCriteria) -> Self {
        let sentiment = non_blank(&criteria.sentiment).and_then(|raw| {
            let bucket = SentimentBucket::parse(&raw);
            if bucket.is_none() {
                log::debug!("Ignoring unknown sentiment selector {raw:?}");
            }
            bucket
        });

        Self {
            search: non_blank(&criteria.search_term).map(|term| term.to_lowercase()),
            category: non_blank(&criteria.category),
            min_rating: parse_threshold(&criteria.min_rating),
            sentiment,
            source: non_blank(&criteria.source),
        }
    }

    pub fn min_rating(&self) -> Option<f64> {
        self.min_rating
    }

    pub fn sentiment(&self) -> Option<SentimentBucket> {
        self.sentiment
    }

    pub fn is_pass_through(&self) -> bool {
        *self == Self::default()
    }
}

impl RecordPredicate<Product> for ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            if !contains_folded(&product.name, term) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !facet_matches(product, Facet::Category, category) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            let rating = product
                .review_stats
                .as_ref()
                .and_then(|stats| stats.average_rating);
            if !rating.is_some_and(|rating| rating >= min_rating) {
                return false;
            }
        }
        if let Some(bucket) = self.sentiment {
            if !product
                .review_stats
                .as_ref()
                .is_some_and(|stats| bucket.admits(stats))
            {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if !facet_matches(product, Facet::Source, source) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFilter {
    search: Option<String>,
    user: Option<String>,
    cutoff: Option<DateTime<Utc>>,
}

impl SessionFilter {
    pub fn compile(criteria: &SessionCriteria, now: DateTime<Utc>) -> Self {
        Self {
            search: non_blank(&criteria.search_term).map(|term| term.to_lowercase()),
            user: non_blank(&criteria.user),
            cutoff: resolve_cutoff(now, &criteria.date_range),
        }
    }

    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.cutoff
    }

    pub fn is_pass_through(&self) -> bool {
        *self == Self::default()
    }
}

impl RecordPredicate<Session> for SessionFilter {
    fn matches(&self, session: &Session) -> bool {
        if let Some(term) = &self.search {
            if !contains_folded(&session.analysis_label, term) {
                return false;
            }
        }
        if let Some(user) = &self.user {
            if !facet_matches(session, Facet::User, user) {
                return false;
            }
        }
        if let Some(cutoff) = self.cutoff {
            let Some(raw) = session.analysis_date.as_deref() else {
                return false;
            };
            match parse_timestamp(raw) {
                Some(analysed_at) if analysed_at >= cutoff => {}
                Some(_) => return false,
                None => {
                    log::warn!("Session {} has unparsable analysis date {raw:?}", session.id);
                    return false;
                }
            }
        }
        true
    }
}
