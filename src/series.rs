//! Reshapes engine output into the label/value series drawn by the charts.
//!
//! Nothing here filters or aggregates. Range series plot an invalid
//! `Electric Range` as zero so every series stays as long as its input.

use eframe::egui::Color32;

use crate::color::{self, FULL_RANGE_COLOR, PROGRESSION_COLOR, SEGMENT_RANGE_COLOR};
use crate::data::aggregate::{DashboardView, GroupCount, RangeStats, TypeBreakdown};
use crate::data::model::{Record, RecordStore};

/// One chart's worth of data. `colors` is either one entry per point or a
/// single entry for the whole series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color32>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Colour of point `i`.
    pub fn color(&self, i: usize) -> Color32 {
        match self.colors.len() {
            0 => Color32::GRAY,
            1 => self.colors[0],
            n => self.colors[i % n],
        }
    }
}

/// Slice per make, cyclic palette colours.
pub fn proportion_series(groups: &[GroupCount]) -> ChartSeries {
    ChartSeries {
        name: "Vehicle Count".to_string(),
        labels: groups.iter().map(|g| g.key.clone()).collect(),
        values: groups.iter().map(|g| g.count as f64).collect(),
        colors: (0..groups.len()).map(color::palette_color).collect(),
    }
}

/// Bar per filtered record (the whole filtered set, not the segment).
pub fn full_range_series(store: &RecordStore, view: &DashboardView) -> ChartSeries {
    let records = resolve(store, &view.filtered);
    ChartSeries {
        name: "Electric Range".to_string(),
        labels: records.iter().map(|r| r.make_label().to_string()).collect(),
        values: plotted(&records),
        colors: vec![color::to_color32(FULL_RANGE_COLOR)],
    }
}

/// Bar per record in the segment.
pub fn segment_range_series(store: &RecordStore, view: &DashboardView) -> ChartSeries {
    let records = resolve(store, &view.segment);
    ChartSeries {
        name: "Electric Range".to_string(),
        labels: indexed_labels(&records),
        values: plotted(&records),
        colors: vec![color::to_color32(SEGMENT_RANGE_COLOR)],
    }
}

/// Line point per record in the segment.
pub fn progression_series(store: &RecordStore, view: &DashboardView) -> ChartSeries {
    let records = resolve(store, &view.segment);
    ChartSeries {
        name: "Electric Range".to_string(),
        labels: indexed_labels(&records),
        values: plotted(&records),
        colors: vec![color::to_color32(PROGRESSION_COLOR)],
    }
}

/// One stacked series per vehicle type, labelled by make. Types take
/// palette colours in row order, like proportion slices.
pub fn breakdown_series(breakdown: &TypeBreakdown) -> Vec<ChartSeries> {
    breakdown
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| ChartSeries {
            name: row.vehicle_type.clone(),
            labels: breakdown.makes.clone(),
            values: row.counts.iter().map(|&c| c as f64).collect(),
            colors: vec![color::palette_color(i)],
        })
        .collect()
}

fn resolve<'a>(store: &'a RecordStore, indices: &[usize]) -> Vec<&'a Record> {
    indices.iter().filter_map(|&i| store.get(i)).collect()
}

fn plotted(records: &[&Record]) -> Vec<f64> {
    records
        .iter()
        .map(|r| r.electric_range.plotted() as f64)
        .collect()
}

fn indexed_labels(records: &[&Record]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} {i}", r.make_label()))
        .collect()
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

pub const NO_DATA: &str = "No data";

/// Text lines for one extremal-vehicle card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleCard {
    pub make: String,
    pub model: String,
    pub vehicle_type: String,
    pub range: String,
}

impl VehicleCard {
    fn of(record: &Record) -> Self {
        VehicleCard {
            make: record.make_label().to_string(),
            model: record.model_label().to_string(),
            vehicle_type: record.vehicle_type_label().to_string(),
            range: match record.electric_range.valid() {
                Some(miles) => format!("{miles} miles"),
                None => format!("{} miles", record.electric_range),
            },
        }
    }
}

/// Highest / lowest / average cards. `None` means the placeholder is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCards {
    pub highest: Option<VehicleCard>,
    pub lowest: Option<VehicleCard>,
    pub average: String,
}

impl StatCards {
    pub fn new(store: &RecordStore, stats: Option<&RangeStats>) -> Self {
        match stats {
            Some(s) => StatCards {
                highest: store.get(s.highest).map(VehicleCard::of),
                lowest: store.get(s.lowest).map(VehicleCard::of),
                average: format!("{:.2} miles", s.average),
            },
            None => StatCards {
                highest: None,
                lowest: None,
                average: NO_DATA.to_string(),
            },
        }
    }
}
