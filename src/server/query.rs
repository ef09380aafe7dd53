//! Query parameters of the `Products` collection

use crate::core::error::{RequestError, Result, WorklistError};
use crate::core::filter::CompositeFilter;
use crate::core::group::{Sorter, compare_all};
use crate::core::product::Product;
use serde::Deserialize;

/// Query string of a collection request
///
/// # Example
/// ```text
/// GET Products?filter=[{"type":"equalityMatch","field":"Category","value":"Dairy"}]
/// GET Products?sort=Stock:desc,Name&$skip=20&$top=10&$inlinecount=allpages
/// GET Products?serverDelay=0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Criteria as a JSON array, all of which must match
    pub filter: Option<String>,

    /// Comma separated `Field` or `Field:desc` entries
    pub sort: Option<String>,

    #[serde(rename = "$skip")]
    pub skip: Option<usize>,

    #[serde(rename = "$top")]
    pub top: Option<usize>,

    /// `allpages` adds `__count` to the response
    #[serde(rename = "$inlinecount")]
    pub inline_count: Option<String>,

    /// Response delay in milliseconds
    #[serde(rename = "serverDelay")]
    pub server_delay: Option<u64>,
}

/// One page of a collection and the size of the whole result
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<Product>,
    pub total: usize,
}

impl ListQuery {
    pub fn composite_filter(&self) -> Result<CompositeFilter> {
        let Some(raw) = self.filter.as_deref().filter(|f| !f.trim().is_empty()) else {
            return Ok(CompositeFilter::default());
        };
        serde_json::from_str(raw).map_err(|e| {
            RequestError::InvalidParameter {
                name: "filter".to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    pub fn sorters(&self) -> Result<Vec<Sorter>> {
        let Some(raw) = self.sort.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Sorter::parse(s).map_err(WorklistError::from))
            .collect()
    }

    pub fn wants_count(&self) -> bool {
        self.inline_count
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("allpages"))
    }

    /// Filter, sort and slice `rows`
    pub fn apply(&self, rows: Vec<Product>) -> Result<Page> {
        let filter = self.composite_filter()?;
        let sorters = self.sorters()?;

        let mut rows: Vec<Product> = rows.into_iter().filter(|p| filter.matches(p)).collect();
        if !sorters.is_empty() {
            rows.sort_by(|a, b| compare_all(&sorters, a, b));
        }

        let total = rows.len();
        let rows = rows
            .into_iter()
            .skip(self.skip.unwrap_or(0))
            .take(self.top.unwrap_or(usize::MAX))
            .collect();
        Ok(Page { rows, total })
    }
}
