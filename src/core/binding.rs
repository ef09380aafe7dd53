//! The list binding behind the worklist table
//!
//! A binding owns the rows the table shows. The controller never mutates rows;
//! it installs filters and sorters and reads back an [`UpdateFinished`] event
//! describing the result.

use crate::core::error::Result;
use crate::core::filter::{CompositeFilter, FilterMode};
use crate::core::group::{Group, Sorter, compare_all, group_consecutive};
use crate::core::product::Product;
use crate::storage::InMemoryProductService;
use std::sync::Arc;

/// Emitted after a binding has (re)computed its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateFinished {
    /// Number of rows matching the installed filters
    pub total: usize,
    /// Whether `total` is the final count (not an estimate of a paged source)
    pub length_final: bool,
}

/// Filterable, sortable collection bound to the worklist table
pub trait ListBinding {
    /// Install `filter` as the filter set for `mode`, replacing the previous one
    fn filter(&mut self, filter: &CompositeFilter, mode: FilterMode) -> UpdateFinished;

    /// Replace the sort/group directives; an empty slice restores source order
    fn sort(&mut self, sorters: &[Sorter]) -> UpdateFinished;

    /// Reload from the source keeping filters and sorters
    fn refresh(&mut self) -> UpdateFinished;

    fn is_length_final(&self) -> bool;
}

/// Where an in-memory binding reads its rows from
pub trait RowSource {
    fn rows(&self) -> Result<Vec<Product>>;
}

impl RowSource for Vec<Product> {
    fn rows(&self) -> Result<Vec<Product>> {
        Ok(self.clone())
    }
}

impl RowSource for Arc<InMemoryProductService> {
    fn rows(&self) -> Result<Vec<Product>> {
        self.snapshot()
    }
}

/// Binding that evaluates filters and sorters locally
pub struct InMemoryListBinding<S: RowSource> {
    source: S,
    loaded: Vec<Product>,
    application_filter: CompositeFilter,
    control_filter: CompositeFilter,
    sorters: Vec<Sorter>,
    visible: Vec<Product>,
}

impl<S: RowSource> InMemoryListBinding<S> {
    pub fn new(source: S) -> Self {
        let loaded = source.rows().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to load rows");
            Vec::new()
        });
        let mut binding = Self {
            source,
            loaded,
            application_filter: CompositeFilter::default(),
            control_filter: CompositeFilter::default(),
            sorters: Vec::new(),
            visible: Vec::new(),
        };
        binding.recompute();
        binding
    }

    /// Rows after filtering and sorting
    pub fn rows(&self) -> &[Product] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn sorters(&self) -> &[Sorter] {
        &self.sorters
    }

    /// Header runs of a grouped table; empty when no sorter groups
    pub fn groups(&self) -> Vec<Group> {
        match self.sorters.first().and_then(|s| s.group) {
            Some(field) => group_consecutive(&self.visible, field),
            None => Vec::new(),
        }
    }

    fn recompute(&mut self) -> UpdateFinished {
        let mut visible: Vec<Product> = self
            .loaded
            .iter()
            .filter(|p| self.application_filter.matches(p) && self.control_filter.matches(p))
            .cloned()
            .collect();
        if !self.sorters.is_empty() {
            visible.sort_by(|a, b| compare_all(&self.sorters, a, b));
        }
        self.visible = visible;

        tracing::debug!(
            total = self.visible.len(),
            filters = self.application_filter.len() + self.control_filter.len(),
            sorters = self.sorters.len(),
            "list binding updated"
        );

        UpdateFinished {
            total: self.visible.len(),
            length_final: true,
        }
    }
}

impl<S: RowSource> ListBinding for InMemoryListBinding<S> {
    fn filter(&mut self, filter: &CompositeFilter, mode: FilterMode) -> UpdateFinished {
        match mode {
            FilterMode::Application => self.application_filter = filter.clone(),
            FilterMode::Control => self.control_filter = filter.clone(),
        }
        self.recompute()
    }

    fn sort(&mut self, sorters: &[Sorter]) -> UpdateFinished {
        self.sorters = sorters.to_vec();
        self.recompute()
    }

    /// On a source failure the previously loaded rows stay in place
    fn refresh(&mut self) -> UpdateFinished {
        match self.source.rows() {
            Ok(rows) => self.loaded = rows,
            Err(e) => tracing::error!(error = %e, "refresh failed, keeping loaded rows"),
        }
        self.recompute()
    }

    fn is_length_final(&self) -> bool {
        true
    }
}
