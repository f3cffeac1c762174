//! Fetch-and-replace: the only writer of the catalog.

use news_providers::{Article, NewsSource, ProviderError};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::catalog::{NewsCatalog, PageRequest, PageResult};

/// What to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsQuery<'a> {
    /// `everything?q=<query>`, used by the country picker.
    Search(&'a str),
    /// `top-headlines?country=<code>`, used by the News button and the daily job.
    Headlines(&'a str),
}

/// Fetches articles and replaces the shared catalog on success.
#[derive(Clone)]
pub struct NewsService {
    catalog: Arc<NewsCatalog>,
    source: Arc<dyn NewsSource>,
    page_size: usize,
}

impl NewsService {
    pub fn new(catalog: Arc<NewsCatalog>, source: Arc<dyn NewsSource>, page_size: usize) -> Self {
        Self {
            catalog,
            source,
            page_size,
        }
    }

    pub fn catalog(&self) -> &Arc<NewsCatalog> {
        &self.catalog
    }

    /// Fetches and replaces the catalog. Returns the new item count.
    ///
    /// `EmptyResult` counts as success with zero items and empties the catalog. Any other
    /// provider error leaves the catalog untouched and is returned.
    #[instrument(skip(self))]
    pub async fn refresh(&self, query: NewsQuery<'_>) -> Result<usize, ProviderError> {
        let fetched: Result<Vec<Article>, ProviderError> = match query {
            NewsQuery::Search(q) => self.source.everything(q).await,
            NewsQuery::Headlines(country) => self.source.top_headlines(country).await,
        };

        let articles = match fetched {
            Ok(articles) => articles,
            Err(e) if e.is_empty_result() => {
                info!(?query, "Provider returned no articles, clearing catalog");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, ?query, "News fetch failed, catalog unchanged");
                return Err(e);
            }
        };

        Ok(self.catalog.replace(articles).await)
    }

    pub async fn first_page(&self) -> PageResult {
        self.catalog.page(PageRequest::first(self.page_size)).await
    }

    pub async fn page_at(&self, offset: usize) -> PageResult {
        self.catalog
            .page(PageRequest::new(offset, self.page_size))
            .await
    }
}
