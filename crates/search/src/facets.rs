use dashboard_protocol::{Product, Session};
use serde::Serialize;
use std::collections::HashSet;

/// A categorical field whose observed values drive a filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Category,
    Source,
    User,
}

/// Records that expose facet values. A record contributes nothing for a facet it
/// does not carry.
pub trait Faceted {
    fn facet_values(&self, facet: Facet) -> Vec<&str>;
}

impl Faceted for Product {
    fn facet_values(&self, facet: Facet) -> Vec<&str> {
        match facet {
            Facet::Category => self.category_name().into_iter().collect(),
            Facet::Source => self.source_names().collect(),
            Facet::User => Vec::new(),
        }
    }
}

impl Faceted for Session {
    fn facet_values(&self, facet: Facet) -> Vec<&str> {
        match facet {
            Facet::User => self.user_name().into_iter().collect(),
            Facet::Category | Facet::Source => Vec::new(),
        }
    }
}

/// Distinct values produced by `selector`, in first-seen order. Blank values are
/// skipped.
pub fn extract_facets<'a, T, I, F>(records: &'a [T], mut selector: F) -> Vec<String>
where
    F: FnMut(&'a T) -> I,
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        for value in selector(record) {
            if value.trim().is_empty() {
                continue;
            }
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }
    }
    values
}

pub fn facet_values<T: Faceted>(records: &[T], facet: Facet) -> Vec<String> {
    extract_facets(records, |record| record.facet_values(facet))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductFacets {
    pub categories: Vec<String>,
    pub sources: Vec<String>,
}

impl ProductFacets {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            categories: facet_values(products, Facet::Category),
            sources: facet_values(products, Facet::Source),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionFacets {
    pub users: Vec<String>,
}

impl SessionFacets {
    pub fn from_sessions(sessions: &[Session]) -> Self {
        Self {
            users: facet_values(sessions, Facet::User),
        }
    }
}
