use crate::command::domain::{parse_payload, CommandAction, CommandOutcome, ProductsOutput};
use crate::config::DashboardConfig;
use crate::data::load_collection;
use anyhow::Result;
use dashboard_protocol::{Product, ProductCriteria};
use dashboard_search::{filter_products, Overview, ProductCard, ProductFacets};
use serde_json::Value;

pub(crate) struct CatalogService;

impl CatalogService {
    pub async fn products(
        &self,
        payload: Value,
        config: &DashboardConfig,
    ) -> Result<CommandOutcome> {
        let criteria: ProductCriteria = parse_payload(CommandAction::Products, payload)?;
        let decoded = load_collection::<Product>(&config.products_path).await?;
        let matched = filter_products(&decoded.records, &criteria);

        let output = ProductsOutput {
            total: decoded.records.len(),
            matched: matched.len(),
            rejected: decoded.rejected,
            items: matched
                .iter()
                .map(|product| ProductCard::from_product(product))
                .collect(),
            facets: ProductFacets::from_products(&decoded.records),
        };
        Ok(CommandOutcome::from_value(output)?.with_source(&config.products_path))
    }

    pub async fn overview(
        &self,
        _payload: Value,
        config: &DashboardConfig,
    ) -> Result<CommandOutcome> {
        let decoded = load_collection::<Product>(&config.products_path).await?;
        let overview = Overview::from_products(&decoded.records);
        Ok(CommandOutcome::from_value(overview)?.with_source(&config.products_path))
    }
}
