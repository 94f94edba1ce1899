//! Pagination
//!
//! Pages are 1-based in the URL; the search engine wants a result offset.
//! `next_page`/`previous_page` do not navigate themselves - they persist the
//! new page number and hand back a navigation intent, so the address bar
//! stays the single source of truth.

use crate::error::Result;
use crate::models::NavigationIntent;
use crate::state::PageStore;
use std::sync::Arc;

/// Hits per result page
pub const PAGE_SIZE: usize = 10;

/// A 1-based page with its derived result offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub offset: usize,
    pub size: usize,
}

impl PageWindow {
    /// Build a window for a page, clamping to page 1
    pub fn from_page(page: u32, size: usize) -> Self {
        let page = page.max(1);
        Self {
            page,
            offset: (page as usize - 1) * size,
            size,
        }
    }

    /// Parse a raw page parameter; anything non-numeric or missing resolves
    /// to page 1, never an error
    pub fn parse(raw: Option<&str>, size: usize) -> Self {
        let page = raw.and_then(|r| r.parse::<u32>().ok()).unwrap_or(1);
        Self::from_page(page, size)
    }
}

/// Converts page numbers to offsets and persists the last-used page
pub struct PaginationController {
    window: PageWindow,
    store: Arc<dyn PageStore>,
}

impl PaginationController {
    pub fn new(store: Arc<dyn PageStore>, window: PageWindow) -> Self {
        Self { window, store }
    }

    /// Restore the last persisted page, falling back to page 1
    pub async fn restore(store: Arc<dyn PageStore>, size: usize) -> Result<Self> {
        let page = store.load_page().await?.unwrap_or(1);
        Ok(Self::new(store, PageWindow::from_page(page, size)))
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Align to a page resolved from navigation parameters, persisting it
    pub async fn set_page(&mut self, page: u32) -> Result<()> {
        self.window = PageWindow::from_page(page, self.window.size);
        self.store.save_page(self.window.page).await
    }

    /// Advance one page; returns the navigation intent for the router
    pub async fn next_page(&mut self) -> Result<NavigationIntent> {
        self.set_page(self.window.page + 1).await?;
        Ok(NavigationIntent::Paginate {
            page: self.window.page,
        })
    }

    /// Step back one page, clamped at page 1
    pub async fn previous_page(&mut self) -> Result<NavigationIntent> {
        self.set_page(self.window.page.saturating_sub(1)).await?;
        Ok(NavigationIntent::Paginate {
            page: self.window.page,
        })
    }

    /// Reset to page 1, e.g. when a new search is submitted
    pub async fn reset(&mut self) -> Result<()> {
        self.set_page(1).await
    }
}
