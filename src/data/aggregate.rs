use std::collections::HashMap;

use super::filter::{FilterCriteria, filtered_indices};
use super::model::RecordStore;

// ---------------------------------------------------------------------------
// Derived outputs
// ---------------------------------------------------------------------------

/// Number of filtered records sharing one manufacturer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Extremal and average electric range over records with a valid reading.
/// `highest` / `lowest` are positions in the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeStats {
    pub highest: usize,
    pub lowest: usize,
    pub highest_range: i64,
    pub lowest_range: i64,
    /// Mean range, rounded to two decimals.
    pub average: f64,
}

/// Make × vehicle-type counts for the stacked bar chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeBreakdown {
    /// Column order, by first appearance.
    pub makes: Vec<String>,
    /// One row per vehicle type; `counts[i]` belongs to `makes[i]`.
    pub rows: Vec<TypeRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeRow {
    pub vehicle_type: String,
    pub counts: Vec<usize>,
}

/// Everything the dashboard renders for one filter state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub filtered: Vec<usize>,
    pub groups: Vec<GroupCount>,
    /// `None` when no filtered record has a numeric range.
    pub stats: Option<RangeStats>,
    /// First `display_limit` entries of `filtered`.
    pub segment: Vec<usize>,
    pub breakdown: TypeBreakdown,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Tally records by make in order of first appearance.
pub fn group_by_make(store: &RecordStore, indices: &[usize]) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for rec in indices.iter().filter_map(|&i| store.get(i)) {
        let key = rec.make_label();
        match slot.get(key) {
            Some(&pos) => groups[pos].count += 1,
            None => {
                slot.insert(key, groups.len());
                groups.push(GroupCount {
                    key: key.to_string(),
                    count: 1,
                });
            }
        }
    }
    groups
}

/// Single guarded pass over records with a valid range. Ties keep the
/// earliest record.
pub fn range_stats(store: &RecordStore, indices: &[usize]) -> Option<RangeStats> {
    let mut stats: Option<RangeStats> = None;
    let mut sum: i128 = 0;
    let mut count: usize = 0;

    for &i in indices {
        let Some(range) = store.get(i).and_then(|r| r.electric_range.valid()) else {
            continue;
        };
        sum += i128::from(range);
        count += 1;
        match stats.as_mut() {
            None => {
                stats = Some(RangeStats {
                    highest: i,
                    lowest: i,
                    highest_range: range,
                    lowest_range: range,
                    average: 0.0,
                });
            }
            Some(s) => {
                if range > s.highest_range {
                    s.highest = i;
                    s.highest_range = range;
                }
                if range < s.lowest_range {
                    s.lowest = i;
                    s.lowest_range = range;
                }
            }
        }
    }

    stats.map(|mut s| {
        s.average = round2(sum as f64 / count as f64);
        s
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Count vehicle types per make.
pub fn vehicle_type_breakdown(store: &RecordStore, indices: &[usize]) -> TypeBreakdown {
    let mut makes: Vec<String> = Vec::new();
    let mut make_col: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<TypeRow> = Vec::new();
    let mut type_row: HashMap<&str, usize> = HashMap::new();

    for rec in indices.iter().filter_map(|&i| store.get(i)) {
        let make = rec.make_label();
        let col = *make_col.entry(make).or_insert_with(|| {
            makes.push(make.to_string());
            for row in rows.iter_mut() {
                row.counts.push(0);
            }
            makes.len() - 1
        });

        let vtype = rec.vehicle_type_label();
        let row = *type_row.entry(vtype).or_insert_with(|| {
            rows.push(TypeRow {
                vehicle_type: vtype.to_string(),
                counts: vec![0; makes.len()],
            });
            rows.len() - 1
        });
        rows[row].counts[col] += 1;
    }

    TypeBreakdown { makes, rows }
}

/// Recompute the whole view from scratch.
pub fn compute_view(
    store: &RecordStore,
    criteria: &FilterCriteria,
    display_limit: usize,
) -> DashboardView {
    let filtered = filtered_indices(store, criteria);
    let groups = group_by_make(store, &filtered);
    let stats = range_stats(store, &filtered);
    let breakdown = vehicle_type_breakdown(store, &filtered);
    let segment = filtered.iter().take(display_limit).copied().collect();

    log::debug!(
        "view recomputed: search={:?} make={:?} limit={} -> {} of {} records",
        criteria.search_text,
        criteria.selected_make,
        display_limit,
        filtered.len(),
        store.len()
    );

    DashboardView {
        filtered,
        groups,
        stats,
        segment,
        breakdown,
    }
}

// ---------------------------------------------------------------------------
// Memoization keyed on (criteria, display limit)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(FilterCriteria, usize)>,
    view: DashboardView,
}

impl ViewCache {
    /// Return the view for these inputs, recomputing only when they changed.
    pub fn view(
        &mut self,
        store: &RecordStore,
        criteria: &FilterCriteria,
        display_limit: usize,
    ) -> &DashboardView {
        let fresh = matches!(&self.key, Some((c, l)) if c == criteria && *l == display_limit);
        if !fresh {
            self.view = compute_view(store, criteria, display_limit);
            self.key = Some((criteria.clone(), display_limit));
        }
        &self.view
    }

    /// Forget the cached view; call when the record store changes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.view = DashboardView::default();
    }

    pub fn current(&self) -> &DashboardView {
        &self.view
    }
}
