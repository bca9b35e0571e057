//! Client of the remote analytics API.
//!
//! Decorative reads (top products, channels, trends) fail soft and return an
//! empty list. The dashboard snapshot and the custom query fail loud so the
//! page can show an explicit error state.

use contracts::shared::analytics::{
    ChannelPerformance, ChannelPerformanceResponse, CustomQueryRequest, DashboardSnapshot,
    FieldRef, FilterClause, SalesTrend, SalesTrendsResponse, TopProduct, TopProductsResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::error::FetchError;
use super::transport::{GlooTransport, Transport};
use crate::shared::api_utils::api_url;
use crate::shared::cache::{BrowserScheduler, CacheStore, Scheduler};
use crate::shared::config::ClientConfig;

/// Cache key of a dashboard snapshot; an absent date is an empty segment
pub fn dashboard_cache_key(start_date: Option<&str>, end_date: Option<&str>) -> String {
    format!(
        "dashboard:{}:{}",
        start_date.unwrap_or_default(),
        end_date.unwrap_or_default()
    )
}

fn date_params(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> [(&'static str, Option<String>); 2] {
    [
        ("start_date", start_date.map(str::to_string)),
        ("end_date", end_date.map(str::to_string)),
    ]
}

pub struct AnalyticsClient<T: Transport = GlooTransport, S: Scheduler = BrowserScheduler> {
    transport: T,
    base_url: String,
    cache: CacheStore<DashboardSnapshot, S>,
    cache_ttl: Duration,
}

impl AnalyticsClient<GlooTransport, BrowserScheduler> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_parts(config, GlooTransport, BrowserScheduler)
    }
}

impl<T: Transport, S: Scheduler> AnalyticsClient<T, S> {
    pub fn with_parts(config: &ClientConfig, transport: T, scheduler: S) -> Self {
        Self {
            transport,
            base_url: config.api_base_url.clone(),
            cache: CacheStore::with_scheduler(scheduler),
            cache_ttl: config.dashboard_cache_ttl(),
        }
    }

    fn url(&self, path: &str, params: &[(&str, Option<String>)]) -> String {
        api_url(&self.base_url, path, params)
    }

    /// `true` when `/health` answers with 2xx; never fails
    pub async fn health_check(&self) -> bool {
        match self.transport.probe(&self.url("/health", &[])).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Health check failed: {}", e);
                false
            }
        }
    }

    /// Full dashboard payload for a range, served from cache when fresh
    pub async fn get_dashboard_data(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<DashboardSnapshot, FetchError> {
        let cache_key = dashboard_cache_key(start_date, end_date);
        if let Some(cached) = self.cache.get(&cache_key) {
            log::debug!("dashboard cache hit: {}", cache_key);
            return Ok(cached);
        }

        let url = self.url("/analytics/dashboard", &date_params(start_date, end_date));
        log::debug!("Fetching dashboard data from: {}", url);

        let snapshot = self
            .fetch::<DashboardSnapshot>(&url)
            .await
            .inspect_err(|e| log::error!("Error fetching dashboard data: {}", e))?;

        self.cache.set(cache_key, snapshot.clone(), self.cache_ttl);
        Ok(snapshot)
    }

    pub async fn get_top_products(
        &self,
        limit: u32,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Vec<TopProduct> {
        let [start, end] = date_params(start_date, end_date);
        let url = self.url(
            "/analytics/top-products",
            &[("limit", Some(limit.to_string())), start, end],
        );
        match self.fetch::<TopProductsResponse>(&url).await {
            Ok(response) => response.products,
            Err(e) => {
                log::error!("Error fetching top products: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_channel_performance(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Vec<ChannelPerformance> {
        let url = self.url(
            "/analytics/channel-performance",
            &date_params(start_date, end_date),
        );
        match self.fetch::<ChannelPerformanceResponse>(&url).await {
            Ok(response) => response.channels,
            Err(e) => {
                log::error!("Error fetching channel performance: {}", e);
                Vec::new()
            }
        }
    }

    /// `period` is the bucket size understood by the API ("day", "week", "month")
    pub async fn get_sales_trends(
        &self,
        period: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Vec<SalesTrend> {
        let [start, end] = date_params(start_date, end_date);
        let url = self.url(
            "/analytics/sales-trends",
            &[("period", Some(period.to_string())), start, end],
        );
        match self.fetch::<SalesTrendsResponse>(&url).await {
            Ok(response) => response.trends,
            Err(e) => {
                log::error!("Error fetching sales trends: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn execute_custom_query(
        &self,
        dimensions: &[FieldRef],
        measures: &[FieldRef],
        filters: &[FilterClause],
    ) -> Result<Value, FetchError> {
        let request = CustomQueryRequest {
            dimensions: dimensions.to_vec(),
            measures: measures.to_vec(),
            filters: filters.to_vec(),
        };
        let body = serde_json::to_value(&request)?;
        self.transport
            .post_json(&self.url("/analytics/custom-query", &[]), &body)
            .await
            .inspect_err(|e| log::error!("Error executing custom query: {}", e))
    }

    /// Drop cached snapshots; in-flight calls are not affected
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn fetch<R: DeserializeOwned>(&self, url: &str) -> Result<R, FetchError> {
        let value = self.transport.get_json(url).await?;
        Ok(serde_json::from_value(value)?)
    }
}
