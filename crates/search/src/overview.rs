use dashboard_protocol::Product;
use serde::Serialize;

use crate::facets::{facet_values, Facet};
use crate::metrics::{round_to, SentimentBucket};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Products without reviews or without a sentiment block.
    pub unknown: usize,
}

/// Headline numbers for the home view, computed from the loaded products.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub product_count: usize,
    pub total_reviews: u64,
    /// Review-weighted mean, one decimal place.
    pub average_rating: Option<f64>,
    /// Positive reviews over all reviews that carry sentiment, whole percent.
    pub positive_percent: Option<f64>,
    pub active_sources: usize,
    pub sentiment: BucketCounts,
}

impl Overview {
    pub fn from_products(products: &[Product]) -> Self {
        let mut total_reviews = 0u64;
        let mut rating_weight = 0u64;
        let mut rating_sum = 0.0f64;
        let mut sentiment_reviews = 0u64;
        let mut positive_reviews = 0u64;
        let mut buckets = BucketCounts::default();

        for product in products {
            let Some(stats) = product.review_stats.as_ref() else {
                buckets.unknown += 1;
                continue;
            };
            total_reviews += stats.total_reviews;
            if let Some(rating) = stats.average_rating.filter(|r| r.is_finite()) {
                rating_sum += rating * stats.total_reviews as f64;
                rating_weight += stats.total_reviews;
            }
            if let Some(counts) = stats.sentiment.as_ref() {
                if stats.total_reviews > 0 {
                    sentiment_reviews += stats.total_reviews;
                    positive_reviews += counts.positive;
                }
            }
            match SentimentBucket::classify(stats) {
                Some(SentimentBucket::Positive) => buckets.positive += 1,
                Some(SentimentBucket::Negative) => buckets.negative += 1,
                Some(SentimentBucket::Neutral) => buckets.neutral += 1,
                None => buckets.unknown += 1,
            }
        }

        let average_rating =
            (rating_weight > 0).then(|| round_to(rating_sum / rating_weight as f64, 1));
        let positive_percent = (sentiment_reviews > 0).then(|| {
            round_to(
                positive_reviews as f64 * 100.0 / sentiment_reviews as f64,
                0,
            )
        });

        Self {
            product_count: products.len(),
            total_reviews,
            average_rating,
            positive_percent,
            active_sources: facet_values(products, Facet::Source).len(),
            sentiment: buckets,
        }
    }
}
