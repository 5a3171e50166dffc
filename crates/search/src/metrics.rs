use dashboard_protocol::{ReviewStats, SentimentCounts, Topic};
use serde::{Deserialize, Serialize};

/// Percentage-point band inside which positive and negative shares count as neutral.
pub const NEUTRAL_BAND_POINTS: u64 = 10;

/// Rendered in place of a metric that cannot be computed.
pub const UNKNOWN_METRIC: &str = "n/a";

/// Share of positive reviews in percent, `None` when there are no reviews or no
/// sentiment block.
pub fn positive_percent(stats: &ReviewStats) -> Option<f64> {
    share(stats, |counts| counts.positive)
}

/// Share of negative reviews in percent, `None` when there are no reviews or no
/// sentiment block.
pub fn negative_percent(stats: &ReviewStats) -> Option<f64> {
    share(stats, |counts| counts.negative)
}

fn share(stats: &ReviewStats, pick: impl Fn(&SentimentCounts) -> u64) -> Option<f64> {
    if stats.total_reviews == 0 {
        return None;
    }
    let counts = stats.sentiment.as_ref()?;
    Some(pick(counts) as f64 * 100.0 / stats.total_reviews as f64)
}

/// Both shares at once; `None` under the same conditions as the single-sided helpers.
pub fn sentiment_split(stats: &ReviewStats) -> Option<(f64, f64)> {
    Some((positive_percent(stats)?, negative_percent(stats)?))
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// One decimal place, e.g. `4.2`.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) if value.is_finite() => format!("{:.1}", round_to(value, 1)),
        _ => UNKNOWN_METRIC.to_string(),
    }
}

/// Whole percent, e.g. `90%`.
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) if value.is_finite() => format!("{:.0}%", round_to(value, 0)),
        _ => UNKNOWN_METRIC.to_string(),
    }
}

/// The leading `limit` topics in the order the dataset ranks them.
pub fn top_topics(stats: &ReviewStats, limit: usize) -> &[Topic] {
    let end = limit.min(stats.top_topics.len());
    &stats.top_topics[..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    pub const ALL: [SentimentBucket; 3] = [
        SentimentBucket::Positive,
        SentimentBucket::Negative,
        SentimentBucket::Neutral,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(SentimentBucket::Positive),
            "negative" => Some(SentimentBucket::Negative),
            "neutral" => Some(SentimentBucket::Neutral),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SentimentBucket::Positive => "positive",
            SentimentBucket::Negative => "negative",
            SentimentBucket::Neutral => "neutral",
        }
    }

    /// Filter rule for this bucket. The rules overlap: a product leading by less
    /// than the neutral band satisfies both `Positive` and `Neutral`.
    pub fn admits(self, stats: &ReviewStats) -> bool {
        let Some(counts) = reviewed_counts(stats) else {
            return false;
        };
        match self {
            SentimentBucket::Positive => counts.positive > counts.negative,
            SentimentBucket::Negative => counts.negative > counts.positive,
            SentimentBucket::Neutral => within_neutral_band(counts, stats.total_reviews),
        }
    }

    /// Exclusive classification: the neutral band wins, otherwise the larger share.
    pub fn classify(stats: &ReviewStats) -> Option<Self> {
        let counts = reviewed_counts(stats)?;
        if within_neutral_band(counts, stats.total_reviews) {
            Some(SentimentBucket::Neutral)
        } else if counts.positive > counts.negative {
            Some(SentimentBucket::Positive)
        } else {
            Some(SentimentBucket::Negative)
        }
    }
}

fn reviewed_counts(stats: &ReviewStats) -> Option<SentimentCounts> {
    if stats.total_reviews == 0 {
        return None;
    }
    stats.sentiment
}

/// `|pos% - neg%| < band` evaluated on counts, so the band edge is exact.
fn within_neutral_band(counts: SentimentCounts, total: u64) -> bool {
    let gap = u128::from(counts.positive.abs_diff(counts.negative));
    gap * 100 < u128::from(NEUTRAL_BAND_POINTS) * u128::from(total)
}
