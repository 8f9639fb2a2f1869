use std::collections::HashSet;
use std::fmt;

/// Placeholder for a missing manufacturer or vehicle type.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// ElectricRange – the duck-typed "Electric Range" cell
// ---------------------------------------------------------------------------

/// Outcome of interpreting an `Electric Range` cell as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeReading {
    Valid(i64),
    Invalid,
}

/// The raw text of an `Electric Range` cell together with its parsed reading.
///
/// Statistics go through [`ElectricRange::valid`] and drop invalid readings;
/// chart series go through [`ElectricRange::plotted`] and draw them as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectricRange {
    pub raw: String,
    pub reading: RangeReading,
}

impl ElectricRange {
    pub fn parse(raw: &str) -> Self {
        let reading = match parse_leading_int(raw) {
            Some(v) => RangeReading::Valid(v),
            None => RangeReading::Invalid,
        };
        Self {
            raw: raw.to_string(),
            reading,
        }
    }

    /// A cell that was missing from the source row.
    pub fn absent() -> Self {
        Self {
            raw: String::new(),
            reading: RangeReading::Invalid,
        }
    }

    pub fn valid(&self) -> Option<i64> {
        match self.reading {
            RangeReading::Valid(v) => Some(v),
            RangeReading::Invalid => None,
        }
    }

    pub fn plotted(&self) -> i64 {
        self.valid().unwrap_or(0)
    }
}

impl fmt::Display for ElectricRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Leading-integer parse: optional whitespace and sign, then at least one
/// ASCII digit. Anything after the digits is ignored.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Record – one row of the vehicle dataset
// ---------------------------------------------------------------------------

/// A single vehicle entry. Empty strings are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub make: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    pub electric_range: ElectricRange,
}

impl Record {
    pub fn new(
        make: Option<String>,
        model: Option<String>,
        vehicle_type: Option<String>,
        electric_range: ElectricRange,
    ) -> Self {
        Self {
            make: non_empty(make),
            model: non_empty(model),
            vehicle_type: non_empty(vehicle_type),
            electric_range,
        }
    }

    /// Manufacturer, or the `"Unknown"` sentinel.
    pub fn make_label(&self) -> &str {
        self.make.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn model_label(&self) -> &str {
        self.model.as_deref().unwrap_or("")
    }

    pub fn vehicle_type_label(&self) -> &str {
        self.vehicle_type.as_deref().unwrap_or(UNKNOWN)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// RecordStore – the immutable loaded dataset
// ---------------------------------------------------------------------------

/// All records in source order, plus the distinct makes for the selector.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub records: Vec<Record>,
    /// Distinct present makes, in order of first appearance.
    pub makes: Vec<String>,
}

impl RecordStore {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut makes = Vec::new();
        for rec in &records {
            if let Some(make) = rec.make.as_deref() {
                if seen.insert(make) {
                    makes.push(make.to_string());
                }
            }
        }
        RecordStore { records, makes }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }
}

#[cfg(test)]
pub(crate) fn record(make: &str, model: &str, range: &str) -> Record {
    Record::new(
        Some(make.to_string()),
        Some(model.to_string()),
        Some("Battery Electric Vehicle (BEV)".to_string()),
        ElectricRange::parse(range),
    )
}
