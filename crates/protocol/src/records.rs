//! Record shapes of the products, sessions and users datasets.
//!
//! Field names serialize as camelCase English. Deserialization also accepts the
//! original dataset vocabulary, so exports such as `{"название": ...}` load as-is.
//! Nested blocks that real exports sometimes omit are optional; the engine treats
//! a missing block as "unknown" rather than failing the whole collection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a record. Datasets use both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{value}"),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl RecordId {
    /// Parses a textual id the way it arrives from flags and env vars: digits become
    /// an integer id, anything else stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map(RecordId::Int)
            .unwrap_or_else(|_| RecordId::Text(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    #[serde(default, alias = "название")]
    pub name: String,
    #[serde(default, alias = "описание")]
    pub description: String,
    #[serde(default, alias = "цена")]
    pub price: f64,
    #[serde(default, alias = "категория", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(
        default,
        alias = "статистика_отзывов",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_stats: Option<ReviewStats>,
    #[serde(default, alias = "источники_продаж")]
    pub sales_sources: Vec<SalesSource>,
}

impl Product {
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }

    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sales_sources
            .iter()
            .map(|source| source.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    #[serde(default, alias = "название")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    #[serde(default, alias = "всего_отзывов")]
    pub total_reviews: u64,
    /// Mean star rating in `[0, 5]`.
    #[serde(
        default,
        alias = "средний_рейтинг",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_rating: Option<f64>,
    #[serde(default, alias = "тональность", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentCounts>,
    #[serde(default, alias = "топ_тем")]
    pub top_topics: Vec<Topic>,
}

/// Review polarity counts. Each count is at most `total_reviews`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentCounts {
    #[serde(default, alias = "позитивных")]
    pub positive: u64,
    #[serde(default, alias = "негативных")]
    pub negative: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Topic {
    #[serde(default, alias = "название")]
    pub name: String,
    #[serde(default, alias = "упоминаний")]
    pub mentions: u64,
    #[serde(default, alias = "негатив")]
    pub negative: u64,
}

/// A sales channel. `name` is the facet key; `id` only keys rendered lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SalesSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "название")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: RecordId,
    /// Free-text description of the analysis run.
    #[serde(default, alias = "анализ", alias = "analysis")]
    pub analysis_label: String,
    /// ISO-8601 timestamp, kept verbatim; parsing happens at filter time.
    #[serde(default, alias = "дата_анализа", skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
    #[serde(default, alias = "пользователь", skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn user_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|user| user.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionUser {
    #[serde(default, alias = "имя")]
    pub name: String,
    #[serde(default, alias = "роль")]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: RecordId,
    #[serde(default, alias = "имя")]
    pub first_name: String,
    #[serde(default, alias = "фамилия")]
    pub last_name: String,
    #[serde(default, alias = "отчество")]
    pub middle_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "телефон")]
    pub phone: String,
    #[serde(default, alias = "аватар", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, alias = "роль")]
    pub role: String,
    #[serde(default, alias = "в_сети", skip_serializing_if = "Option::is_none")]
    pub online: Option<OnlineStatus>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Presence as exported: either a flag or a free-text "last seen" note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OnlineStatus {
    Flag(bool),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn product_accepts_original_vocabulary() {
        let raw = json!({
            "id": 7,
            "название": "Пылесос",
            "описание": "Робот",
            "цена": 15990,
            "категория": { "название": "Техника" },
            "статистика_отзывов": {
                "всего_отзывов": 120,
                "средний_рейтинг": 4.6,
                "тональность": { "позитивных": 100, "негативных": 8 },
                "топ_тем": [{ "название": "батарея", "упоминаний": 40, "негатив": 5 }]
            },
            "источники_продаж": [{ "id": 1, "название": "Ozon" }]
        });

        let product: Product = serde_json::from_value(raw).expect("product");
        assert_eq!(product.id, RecordId::Int(7));
        assert_eq!(product.name, "Пылесос");
        assert_eq!(product.category_name(), Some("Техника"));
        let stats = product.review_stats.expect("stats");
        assert_eq!(stats.total_reviews, 120);
        assert_eq!(stats.average_rating, Some(4.6));
        assert_eq!(
            stats.sentiment,
            Some(SentimentCounts {
                positive: 100,
                negative: 8
            })
        );
        assert_eq!(stats.top_topics[0].mentions, 40);
        assert_eq!(product.sales_sources[0].name, "Ozon");
    }

    #[test]
    fn product_serializes_camel_case() {
        let product = Product {
            id: RecordId::from("p-1"),
            name: "Widget".to_string(),
            description: String::new(),
            price: 10.0,
            category: None,
            review_stats: Some(ReviewStats {
                total_reviews: 3,
                ..ReviewStats::default()
            }),
            sales_sources: Vec::new(),
        };

        let value = serde_json::to_value(&product).expect("json");
        assert_eq!(value["id"], "p-1");
        assert_eq!(value["reviewStats"]["totalReviews"], 3);
        assert!(value.get("category").is_none());
        assert_eq!(value["salesSources"], json!([]));
    }

    #[test]
    fn missing_nested_blocks_are_optional() {
        let product: Product =
            serde_json::from_value(json!({ "id": 1, "name": "Bare" })).expect("product");
        assert!(product.category.is_none());
        assert!(product.review_stats.is_none());
        assert_eq!(product.source_names().count(), 0);

        let session: Session =
            serde_json::from_value(json!({ "id": "s1", "analysis": "Churn" })).expect("session");
        assert_eq!(session.analysis_label, "Churn");
        assert_eq!(session.user_name(), None);
        assert_eq!(session.analysis_date, None);
    }

    #[test]
    fn nameless_nested_entries_decode_without_facet_values() {
        let product: Product = serde_json::from_value(json!({
            "id": 2,
            "category": {},
            "salesSources": [{ "id": 1 }, { "name": "Ozon" }],
            "reviewStats": { "topTopics": [{ "mentions": 2 }] }
        }))
        .expect("product");
        assert_eq!(product.category_name(), None);
        assert_eq!(product.source_names().collect::<Vec<_>>(), vec!["Ozon"]);
        assert_eq!(product.review_stats.expect("stats").top_topics[0].name, "");

        let session: Session =
            serde_json::from_value(json!({ "id": 9, "user": { "role": "analyst" } }))
                .expect("session");
        assert_eq!(session.user_name(), None);
    }

    #[test]
    fn session_accepts_original_vocabulary() {
        let session: Session = serde_json::from_value(json!({
            "id": 3,
            "анализ": "Отзывы за март",
            "дата_анализа": "2024-03-10T12:00:00Z",
            "пользователь": { "имя": "Анна", "роль": "аналитик" }
        }))
        .expect("session");

        assert_eq!(session.analysis_label, "Отзывы за март");
        assert_eq!(session.analysis_date.as_deref(), Some("2024-03-10T12:00:00Z"));
        assert_eq!(session.user_name(), Some("Анна"));
    }

    #[test]
    fn user_profile_accepts_flag_or_text_presence() {
        let user: UserProfile = serde_json::from_value(json!({
            "id": 1001,
            "имя": "Иван",
            "фамилия": "Петров",
            "в_сети": "5 минут назад"
        }))
        .expect("user");
        assert_eq!(user.display_name(), "Иван Петров");
        assert_eq!(
            user.online,
            Some(OnlineStatus::Text("5 минут назад".to_string()))
        );

        let user: UserProfile =
            serde_json::from_value(json!({ "id": "u2", "online": true })).expect("user");
        assert_eq!(user.online, Some(OnlineStatus::Flag(true)));
        assert_eq!(user.display_name(), "");
    }

    #[test]
    fn record_id_parse_prefers_integers() {
        assert_eq!(RecordId::parse(" 1001 "), RecordId::Int(1001));
        assert_eq!(RecordId::parse("abc"), RecordId::Text("abc".to_string()));
        assert_eq!(RecordId::Int(5).to_string(), "5");
    }
}
