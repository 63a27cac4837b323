use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// MetadataValue – a single cell in a settings mapping
// ---------------------------------------------------------------------------

/// A dynamically-typed settings value decoded from JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<MetadataValue>),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v:.4}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to interpret the value as a list of `f64`.  A bare scalar is
    /// accepted and treated as a one-element list.
    pub fn as_f64_list(&self) -> Option<Vec<f64>> {
        match self {
            MetadataValue::List(items) => items.iter().map(MetadataValue::as_f64).collect(),
            scalar => scalar.as_f64().map(|v| vec![v]),
        }
    }
}

/// Settings mapping read from a `settings/data.json` file.
pub type Settings = BTreeMap<String, MetadataValue>;

// ---------------------------------------------------------------------------
// FeatureTable – a column-major table of event features
// ---------------------------------------------------------------------------

/// Numeric feature table (rows = events, columns = features).
///
/// Stored column-major; integer and `f32` parquet columns are widened to
/// `f64` on load.  All columns have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Ordered column names.
    pub names: Vec<String>,
    /// One value vector per column, parallel to `names`.
    pub columns: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Number of events (rows).
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of feature columns.
    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no events.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }
}

// ---------------------------------------------------------------------------
// Process – the closed set of test-partition categories
// ---------------------------------------------------------------------------

/// The four physics processes making up the test partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Process {
    Ztautau,
    Diboson,
    Ttbar,
    Htautau,
}

impl Process {
    pub const ALL: [Process; 4] = [
        Process::Ztautau,
        Process::Diboson,
        Process::Ttbar,
        Process::Htautau,
    ];

    /// Canonical lowercase name, as used in file names and detailed labels.
    pub fn name(self) -> &'static str {
        match self {
            Process::Ztautau => "ztautau",
            Process::Diboson => "diboson",
            Process::Ttbar => "ttbar",
            Process::Htautau => "htautau",
        }
    }

    /// File name of the per-category test parquet file.
    pub fn data_file_name(self) -> String {
        format!("{}_data.parquet", self.name())
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Partitions
// ---------------------------------------------------------------------------

/// The train partition: one feature table with parallel label, weight and
/// detailed-label vectors, plus the settings read alongside them.
///
/// Equal row counts across the table and the three vectors are an invariant
/// owed to downstream consumers; the loader does not enforce it.
#[derive(Debug, Clone)]
pub struct TrainSet {
    pub data: FeatureTable,
    /// Binary labels, one float (0/1) per event.
    pub labels: Vec<f64>,
    /// Event weights, one float per event.
    pub weights: Vec<f64>,
    /// Originating process name per event.
    pub detailed_labels: Vec<String>,
    pub settings: Settings,
}

/// The test partition: one free-standing feature table per process.
pub type TestSet = BTreeMap<Process, FeatureTable>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_f64_list_accepts_scalar_and_list() {
        let list = MetadataValue::List(vec![
            MetadataValue::Float(1.0),
            MetadataValue::Integer(2),
        ]);
        assert_eq!(list.as_f64_list(), Some(vec![1.0, 2.0]));
        assert_eq!(MetadataValue::Float(3.5).as_f64_list(), Some(vec![3.5]));
        assert_eq!(MetadataValue::String("x".into()).as_f64_list(), None);
        assert_eq!(
            MetadataValue::List(vec![MetadataValue::Null]).as_f64_list(),
            None
        );
    }

    #[test]
    fn feature_table_accessors() {
        let table = FeatureTable {
            names: vec!["pt".into(), "met".into()],
            columns: vec![vec![10.0, 20.0, 30.0], vec![1.0, 2.0, 3.0]],
        };
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column("met"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(table.column("eta"), None);
    }

    #[test]
    fn process_names_match_file_layout() {
        let names: Vec<&str> = Process::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["ztautau", "diboson", "ttbar", "htautau"]);
        assert_eq!(Process::Htautau.data_file_name(), "htautau_data.parquet");
    }
}
