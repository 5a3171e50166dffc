mod cards;
mod date_window;
mod decode;
mod directory;
mod error;
mod facets;
mod filter;
mod metrics;
mod overview;
mod window;

pub use cards::{ProductCard, SessionRow, CARD_TOPIC_LIMIT};
pub use date_window::{parse_timestamp, resolve_cutoff, DateRange, DEFAULT_WINDOW_DAYS};
pub use decode::{decode_collection, decode_collection_str, Decoded};
pub use directory::find_user;
pub use error::{Result, SearchError};
pub use facets::{extract_facets, facet_values, Facet, Faceted, ProductFacets, SessionFacets};
pub use filter::{
    apply_filters, filter_products, filter_sessions, ProductFilter, RecordPredicate, SessionFilter,
};
pub use metrics::{
    format_percent, format_rating, negative_percent, positive_percent, round_to, sentiment_split,
    top_topics, SentimentBucket, NEUTRAL_BAND_POINTS, UNKNOWN_METRIC,
};
pub use overview::{BucketCounts, Overview};
pub use window::{
    cursor_offset, load_from, load_next, Keyed, PagedView, WindowCursor, DEFAULT_PAGE_SIZE,
};
