//! Pagination request/response models
//!
//! Query string shape shared by list endpoints: `?page=0&size=20&sort=id,desc`.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;
pub const DEFAULT_SORT_PROPERTY: &str = "id";
/// Row offsets are bound as signed 64-bit integers.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index (default: 0)
    pub page: Option<u64>,
    /// Page size (default: 20, max: 2000)
    pub size: Option<u64>,
    /// `property` or `property,asc|desc` (default: `id,asc`)
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Parse `property[,direction]`, direction being case-insensitive.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut parts = raw.split(',').map(str::trim);
        let property = parts.next().unwrap_or_default();
        if property.is_empty() {
            return Err("sort property cannot be empty".to_string());
        }

        let direction = match parts.next() {
            None | Some("") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(dir) => return Err(format!("unknown sort direction '{}'", dir)),
        };

        if parts.next().is_some() {
            return Err(format!("invalid sort expression '{}'", raw));
        }

        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            property: DEFAULT_SORT_PROPERTY.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// Validated pagination request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u64, size: u64, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl PageQuery {
    /// Validate query parameters and fill in defaults
    pub fn validate(&self) -> Result<PageRequest, String> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size < 1 {
            return Err("size must be at least 1".to_string());
        }
        if size > MAX_PAGE_SIZE {
            return Err(format!("size cannot exceed {}", MAX_PAGE_SIZE));
        }

        let sort = match self.sort.as_deref() {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::default(),
        };

        let page = self.page.unwrap_or(0);
        match page.checked_mul(size) {
            Some(offset) if offset <= MAX_OFFSET => {}
            _ => return Err(format!("page {} is out of range for size {}", page, size)),
        }

        Ok(PageRequest::new(page, size, sort))
    }
}

/// One slice of a sorted listing plus the size of the whole listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}
