//! In-memory news catalog shared by the router and the daily job.
//!
//! The catalog is one ordered snapshot (`Arc<Vec<NewsItem>>`) behind a tokio `RwLock`. `replace`
//! builds the next snapshot off-lock and swaps the pointer; readers clone the `Arc` and release
//! the lock immediately, so a reader sees either the old or the new snapshot, never a mix.

use news_providers::Article;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// One news item as shown to users. `id` is its 1-based position in the snapshot that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
}

impl NewsItem {
    /// True when `image_url` is an absolute http(s) URL Telegram can fetch. Blank,
    /// protocol-relative (`//cdn...`) and other schemes count as no image.
    pub fn has_image(&self) -> bool {
        match reqwest::Url::parse(self.image_url.trim()) {
            Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
            Err(_) => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("news item {0} not found")]
    NotFound(u32),
}

/// Offset-based page request. Built per display call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(offset: usize, page_size: usize) -> Self {
        Self { offset, page_size }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(0, page_size)
    }

    /// Offset of the page after this one.
    pub fn next_offset(&self) -> usize {
        self.offset.saturating_add(self.page_size)
    }
}

/// A slice of the catalog. `items` is empty when `offset` is past the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPage {
    pub items: Vec<NewsItem>,
    pub offset: usize,
    pub page_size: usize,
    pub has_more: bool,
}

impl NewsPage {
    pub fn next_offset(&self) -> usize {
        self.offset.saturating_add(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult {
    /// The catalog is empty. Distinct from a page past the end.
    NoNews,
    Page(NewsPage),
}

#[derive(Debug, Default)]
pub struct NewsCatalog {
    items: RwLock<Arc<Vec<NewsItem>>>,
}

impl NewsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole catalog. Ids are assigned `1..=N` in input order. Returns N.
    pub async fn replace(&self, articles: Vec<Article>) -> usize {
        let next: Vec<NewsItem> = articles
            .into_iter()
            .zip(1u32..)
            .map(|(a, id)| NewsItem {
                id,
                title: a.title,
                description: a.description,
                url: a.url,
                image_url: a.image_url,
            })
            .collect();
        let count = next.len();
        let next = Arc::new(next);

        *self.items.write().await = next;

        info!(count, "step: catalog replaced");
        count
    }

    /// Current snapshot. Later replaces do not affect it.
    pub async fn snapshot(&self) -> Arc<Vec<NewsItem>> {
        Arc::clone(&*self.items.read().await)
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Items in `[offset, offset + page_size)`, clipped to bounds.
    /// `has_more` iff `offset + page_size < len`.
    pub async fn page(&self, request: PageRequest) -> PageResult {
        page_of(&self.snapshot().await, request)
    }

    pub async fn lookup(&self, id: u32) -> Result<NewsItem, CatalogError> {
        let snapshot = self.snapshot().await;
        // Ids are dense and 1-based, so the id doubles as an index.
        (id as usize)
            .checked_sub(1)
            .and_then(|index| snapshot.get(index))
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

/// Pages an already-taken snapshot.
pub fn page_of(items: &[NewsItem], request: PageRequest) -> PageResult {
    if items.is_empty() {
        return PageResult::NoNews;
    }

    let len = items.len();
    let start = request.offset.min(len);
    let end = request.next_offset().min(len);

    PageResult::Page(NewsPage {
        items: items[start..end].to_vec(),
        offset: request.offset,
        page_size: request.page_size,
        has_more: request.next_offset() < len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| Article {
                title: format!("Title {}", i),
                description: format!("Description {}", i),
                url: format!("https://news.example/{}", i),
                image_url: format!("https://img.example/{}.png", i),
            })
            .collect()
    }

    fn ids(result: &PageResult) -> Vec<u32> {
        match result {
            PageResult::Page(page) => page.items.iter().map(|i| i.id).collect(),
            PageResult::NoNews => panic!("expected a page"),
        }
    }

    fn has_more(result: &PageResult) -> bool {
        match result {
            PageResult::Page(page) => page.has_more,
            PageResult::NoNews => panic!("expected a page"),
        }
    }

    #[test]
    fn test_has_image_requires_absolute_http_url() {
        let with = |image_url: &str| NewsItem {
            id: 1,
            title: "t".to_string(),
            description: String::new(),
            url: String::new(),
            image_url: image_url.to_string(),
        };

        assert!(with("https://img.example/a.jpg").has_image());
        assert!(with(" http://img.example/a.jpg ").has_image());
        assert!(!with("").has_image());
        assert!(!with("//cdn.example.com/a.jpg").has_image());
        assert!(!with("/images/a.jpg").has_image());
        assert!(!with("data:image/png;base64,AAAA").has_image());
        assert!(!with("ftp://img.example/a.jpg").has_image());
    }

    #[tokio::test]
    async fn test_replace_assigns_dense_ids_in_order() {
        let catalog = NewsCatalog::new();
        let count = catalog.replace(articles(5)).await;

        assert_eq!(count, 5);
        let snapshot = catalog.snapshot().await;
        let got: Vec<u32> = snapshot.iter().map(|i| i.id).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 5]);
        assert_eq!(snapshot[2].title, "Title 3");
    }

    #[tokio::test]
    async fn test_pages_of_seven_over_ten_items() {
        let catalog = NewsCatalog::new();
        catalog.replace(articles(10)).await;

        let first = catalog.page(PageRequest::new(0, 7)).await;
        assert_eq!(ids(&first), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(has_more(&first));

        let second = catalog.page(PageRequest::new(7, 7)).await;
        assert_eq!(ids(&second), vec![8, 9, 10]);
        assert!(!has_more(&second));
    }

    #[tokio::test]
    async fn test_exact_fit_has_no_more() {
        let catalog = NewsCatalog::new();
        catalog.replace(articles(7)).await;

        let page = catalog.page(PageRequest::first(7)).await;
        assert_eq!(ids(&page).len(), 7);
        assert!(!has_more(&page));
    }

    #[tokio::test]
    async fn test_empty_catalog_is_no_news() {
        let catalog = NewsCatalog::new();
        assert_eq!(catalog.page(PageRequest::first(7)).await, PageResult::NoNews);

        catalog.replace(Vec::new()).await;
        assert_eq!(catalog.page(PageRequest::first(7)).await, PageResult::NoNews);
        assert!(catalog.is_empty().await);
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty_page() {
        let catalog = NewsCatalog::new();
        catalog.replace(articles(3)).await;

        let page = catalog.page(PageRequest::new(50, 7)).await;
        assert_eq!(ids(&page), Vec::<u32>::new());
        assert!(!has_more(&page));
    }

    #[tokio::test]
    async fn test_lookup_bounds() {
        let catalog = NewsCatalog::new();
        catalog.replace(articles(3)).await;

        assert_eq!(catalog.lookup(0).await, Err(CatalogError::NotFound(0)));
        assert_eq!(catalog.lookup(4).await, Err(CatalogError::NotFound(4)));
        let item = catalog.lookup(2).await.unwrap();
        assert_eq!(item.id, 2);
        assert_eq!(item.url, "https://news.example/2");
    }

    #[tokio::test]
    async fn test_ids_restart_after_replace() {
        let catalog = NewsCatalog::new();
        catalog.replace(articles(10)).await;
        catalog.replace(articles(2)).await;

        assert_eq!(catalog.len().await, 2);
        assert!(catalog.lookup(3).await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_survives_replace() {
        let catalog = NewsCatalog::new();
        catalog.replace(articles(4)).await;
        let before = catalog.snapshot().await;

        catalog.replace(articles(1)).await;

        assert_eq!(before.len(), 4);
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_replace_and_page_never_mix() {
        // Two generations with disjoint titles; a page must come entirely from one of them.
        fn generation(tag: &str, n: usize) -> Vec<Article> {
            (1..=n)
                .map(|i| Article {
                    title: format!("{}-{}", tag, i),
                    description: String::new(),
                    url: String::new(),
                    image_url: String::new(),
                })
                .collect()
        }

        let catalog = Arc::new(NewsCatalog::new());
        catalog.replace(generation("old", 10)).await;

        let writer = {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move {
                for round in 0..200 {
                    let tag = if round % 2 == 0 { "new" } else { "old" };
                    catalog.replace(generation(tag, 10)).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let catalog = Arc::clone(&catalog);
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    if let PageResult::Page(page) = catalog.page(PageRequest::first(7)).await {
                        let tags: Vec<&str> = page
                            .items
                            .iter()
                            .map(|i| i.title.split('-').next().unwrap_or(""))
                            .collect();
                        assert!(tags.iter().all(|t| *t == tags[0]), "mixed page: {:?}", tags);
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
