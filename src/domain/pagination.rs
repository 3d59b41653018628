use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Query string form of `?page=&per_page=`. Both are 1-based and optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    pub per_page: Option<u32>,
}

/// A resolved page window. `per_page` is clamped to [`MAX_PER_PAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page: page.max(1), per_page: per_page.clamp(1, MAX_PER_PAGE) }
    }

    pub fn offset(&self) -> i64 { (i64::from(self.page) - 1) * i64::from(self.per_page) }

    pub fn limit(&self) -> i64 { i64::from(self.per_page) }
}

impl Default for Page {
    fn default() -> Self { Self::new(DEFAULT_PAGE, DEFAULT_PER_PAGE) }
}

impl From<PageParams> for Page {
    fn from(p: PageParams) -> Self {
        Page::new(p.page.unwrap_or(DEFAULT_PAGE), p.per_page.unwrap_or(DEFAULT_PER_PAGE))
    }
}
