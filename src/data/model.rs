use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sex – categorical column
// ---------------------------------------------------------------------------

/// Passenger sex as recorded in the manifest.
///
/// The declaration order (male, female) is the iteration order of every
/// grouping keyed by sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// The closed key domain for sex groupings.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse the manifest spelling (`male` / `female`, case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PassengerClass – ordinal column (1/2/3)
// ---------------------------------------------------------------------------

/// Ticket class. Ordered 1 < 2 < 3 so `BTreeMap` iteration follows the
/// natural order of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    /// The closed key domain for class groupings.
    pub const ALL: [PassengerClass; 3] = [
        PassengerClass::First,
        PassengerClass::Second,
        PassengerClass::Third,
    ];

    pub fn number(self) -> u8 {
        match self {
            PassengerClass::First => 1,
            PassengerClass::Second => 2,
            PassengerClass::Third => 3,
        }
    }

    /// Summary label, e.g. `class_1`.
    pub fn label(self) -> String {
        format!("class_{}", self.number())
    }
}

impl TryFrom<u8> for PassengerClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PassengerClass::First),
            2 => Ok(PassengerClass::Second),
            3 => Ok(PassengerClass::Third),
            other => Err(format!("passenger class must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<PassengerClass> for u8 {
    fn from(class: PassengerClass) -> Self {
        class.number()
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// PassengerRecord – one row of the manifest
// ---------------------------------------------------------------------------

/// A single passenger (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerRecord {
    /// Unique passenger identifier.
    pub id: u32,
    pub survived: bool,
    pub class: PassengerClass,
    pub sex: Sex,
    /// Age in years; `None` when unknown.
    pub age: Option<f64>,
}

// ---------------------------------------------------------------------------
// PassengerTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full passenger table. Built once by the loader and only borrowed
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct PassengerTable {
    records: Vec<PassengerRecord>,
}

impl PassengerTable {
    pub fn from_records(records: Vec<PassengerRecord>) -> Self {
        PassengerTable { records }
    }

    /// Number of passengers.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// A view over every row of the table.
    pub fn all(&self) -> Subset<'_> {
        Subset {
            table: self,
            indices: (0..self.records.len()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Subset – filtered, non-owning view
// ---------------------------------------------------------------------------

/// Row indices into a [`PassengerTable`]. Records are never copied, so two
/// subsets of the same table refer to the same rows.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    table: &'a PassengerTable,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub(crate) fn from_indices(table: &'a PassengerTable, indices: Vec<usize>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < table.len()));
        Subset { table, indices }
    }

    pub fn table(&self) -> &'a PassengerTable {
        self.table
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Iterate the records of this view in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'a PassengerRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}
