//! Lift/drag coefficient tables for the foil surfaces.
//!
//! Tables are keyed by integer angle of attack in degrees and never
//! interpolated: an angle without a row is an explicit miss, and the caller
//! decides whether that is fatal (sail, rudder) or skippable (keel).

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::BoatConfig;
use crate::error::ConfigError;

/// Which control surface a table or lookup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoilKind {
    Sail,
    Rudder,
    Keel,
}

impl fmt::Display for FoilKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FoilKind::Sail => "sail",
            FoilKind::Rudder => "rudder",
            FoilKind::Keel => "keel",
        })
    }
}

/// Dimensionless lift and drag coefficients for one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoilCoeffs {
    pub cl: f32,
    pub cd: f32,
}

/// Immutable coefficient table with O(1) exact-match lookup.
#[derive(Debug, Clone)]
pub struct FoilTable {
    rows: HashMap<i32, FoilCoeffs>,
}

impl FoilTable {
    pub fn from_rows(rows: impl IntoIterator<Item = (i32, FoilCoeffs)>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Load a `alpha,cl,cd` CSV file. Columns may appear in any order and
    /// extra columns are ignored; duplicate alphas keep the last row.
    pub fn from_csv_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv(&text, path)
    }

    fn from_csv(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let bad = |line: usize, reason: String| ConfigError::FoilCsv {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut lines = text.lines().enumerate();
        let header = lines
            .next()
            .ok_or_else(|| bad(1, "empty file".to_string()))?
            .1;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let column = |name: &str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| bad(1, format!("missing `{name}` column")))
        };
        let (alpha_col, cl_col, cd_col) = (column("alpha")?, column("cl")?, column("cd")?);

        let mut rows = HashMap::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let field = |col: usize| {
                fields
                    .get(col)
                    .copied()
                    .ok_or_else(|| bad(index + 1, format!("expected at least {} fields", col + 1)))
            };
            let number = |col: usize| -> Result<f32, ConfigError> {
                let raw = field(col)?;
                raw.parse::<f32>()
                    .map_err(|_| bad(index + 1, format!("`{raw}` is not a number")))
            };
            let alpha = number(alpha_col)?.round() as i32;
            rows.insert(
                alpha,
                FoilCoeffs {
                    cl: number(cl_col)?,
                    cd: number(cd_col)?,
                },
            );
        }
        Ok(Self { rows })
    }

    /// Exact row at the given integer angle of attack, if declared.
    pub fn lookup(&self, alpha_deg: i32) -> Option<FoilCoeffs> {
        self.rows.get(&alpha_deg).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The per-boat set of foil tables. The keel is optional equipment.
#[derive(Debug, Clone)]
pub struct FoilSet {
    pub sail: FoilTable,
    pub rudder: FoilTable,
    pub keel: Option<FoilTable>,
}

impl FoilSet {
    /// Resolve the tables a boat config names inside `foils_dir`.
    pub fn load(config: &BoatConfig, foils_dir: &Path) -> Result<Self, ConfigError> {
        let table = |name: &str| FoilTable::from_csv_path(&foils_dir.join(format!("{name}.csv")));
        Ok(Self {
            sail: table(&config.sail_foil)?,
            rudder: table(&config.rudder_foil)?,
            keel: config.keel_foil.as_deref().map(table).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "alpha,cl,cd\n-2,-0.21,0.012\n-1,-0.11,0.010\n0,0.0,0.009\n1,0.11,0.010\n2,0.21,0.012\n";

    #[test]
    fn parses_and_looks_up_rows() {
        let table = FoilTable::from_csv(SAMPLE, Path::new("sail.csv")).unwrap();
        assert_eq!(table.len(), 5);
        let row = table.lookup(1).unwrap();
        assert_eq!(row.cl, 0.11);
        assert_eq!(row.cd, 0.010);
        assert_eq!(table.lookup(90), None);
    }

    #[test]
    fn ignores_extra_columns_and_column_order() {
        let text = "cd,cr,alpha,cl\n0.02,9.9,10,0.5\n";
        let table = FoilTable::from_csv(text, Path::new("t.csv")).unwrap();
        let row = table.lookup(10).unwrap();
        assert_eq!(row.cl, 0.5);
        assert_eq!(row.cd, 0.02);
    }

    #[test]
    fn reports_line_of_bad_row() {
        let text = "alpha,cl,cd\n0,0.0,0.01\nfive,0.1,0.02\n";
        let err = FoilTable::from_csv(text, Path::new("t.csv")).unwrap_err();
        match err {
            ConfigError::FoilCsv { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = FoilTable::from_csv("alpha,cl\n0,0.1\n", Path::new("t.csv")).unwrap_err();
        assert!(err.to_string().contains("cd"));
    }
}
