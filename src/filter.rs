//! Search, filter and sort over the developer collection

use std::cmp::Ordering;

use crate::models::{Developer, Domain};

/// Active search text and category filters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeveloperFilter {
    pub search: String,
    /// `None` means all domains
    pub domain: Option<Domain>,
    /// `None` means all nations
    pub nation: Option<String>,
}

impl DeveloperFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.domain.is_some() || self.nation.is_some()
    }

    /// Whether a single developer passes every active filter
    pub fn matches(&self, dev: &Developer) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !dev.name.to_lowercase().contains(&needle)
                && !dev.username.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(domain) = self.domain {
            if dev.domain != domain {
                return false;
            }
        }
        if let Some(nation) = &self.nation {
            if dev.nation.as_ref() != Some(nation) {
                return false;
            }
        }
        true
    }

    /// Recompute the filtered projection from the full collection, keeping its order
    pub fn apply(&self, developers: &[Developer]) -> Vec<Developer> {
        developers.iter().filter(|d| self.matches(d)).cloned().collect()
    }
}

/// Sortable table columns
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortColumn {
    Name,
    TalentRank,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Current column sort, `None` when the table keeps collection order
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SortState {
    pub active: Option<(SortColumn, SortOrder)>,
}

impl SortState {
    /// Ascending, then descending, then unsorted. Switching column restarts at ascending.
    pub fn cycle(&mut self, column: SortColumn) {
        self.active = match self.active {
            Some((c, SortOrder::Ascending)) if c == column => Some((column, SortOrder::Descending)),
            Some((c, SortOrder::Descending)) if c == column => None,
            _ => Some((column, SortOrder::Ascending)),
        };
    }

    pub fn order_for(&self, column: SortColumn) -> Option<SortOrder> {
        match self.active {
            Some((c, order)) if c == column => Some(order),
            _ => None,
        }
    }

    /// Stable sort of the given rows according to the active column
    pub fn sort(&self, rows: &mut [Developer]) {
        let Some((column, order)) = self.active else {
            return;
        };
        rows.sort_by(|a, b| {
            let ord = match column {
                SortColumn::Name => a.name.cmp(&b.name),
                SortColumn::TalentRank => a
                    .talent_rank
                    .partial_cmp(&b.talent_rank)
                    .unwrap_or(Ordering::Equal),
            };
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }
}
