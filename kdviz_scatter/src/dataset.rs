// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedding points and the comma-separated table they are served as.
//!
//! The table starts with a header naming the columns. `id`, `x`, `y`, `z`,
//! and `label` must all be present, in any order; other columns are ignored.
//! Blank lines are skipped.

use std::collections::HashMap;
use std::fmt::Write;

/// One embedded image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmbeddingPoint {
    /// Image id, unique within a dataset.
    pub id: u32,
    /// Embedding x.
    pub x: f64,
    /// Embedding y.
    pub y: f64,
    /// Embedding z.
    pub z: f64,
    /// Category label, an index into [`Category::ALL`](crate::Category::ALL).
    pub label: u32,
}

/// Malformed dataset, or a dataset that cannot be installed.
///
/// Line numbers are 1-based and count the header.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// No header line.
    #[error("dataset is empty (no header)")]
    Empty,
    /// A required column is absent from the header.
    #[error("dataset header is missing column `{column}`")]
    MissingColumn {
        /// Column name.
        column: &'static str,
    },
    /// A row has fewer fields than the header requires.
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortRow {
        /// Line number.
        line: usize,
        /// Fields needed to reach every required column.
        expected: usize,
        /// Fields present.
        found: usize,
    },
    /// `id` or `label` is not a non-negative integer.
    #[error("line {line}: column `{column}` is not a non-negative integer: {value:?}")]
    InvalidInteger {
        /// Line number.
        line: usize,
        /// Column name.
        column: &'static str,
        /// Raw field.
        value: String,
    },
    /// A coordinate is not a finite real number.
    #[error("line {line}: column `{column}` is not a finite number: {value:?}")]
    InvalidNumber {
        /// Line number.
        line: usize,
        /// Column name.
        column: &'static str,
        /// Raw field.
        value: String,
    },
    /// An id appears twice.
    #[error("line {line}: duplicate id {id}")]
    DuplicateId {
        /// Line number (or 1-based position for in-memory points).
        line: usize,
        /// The repeated id.
        id: u32,
    },
    /// The scatter scene already holds a dataset.
    #[error("dataset already loaded")]
    AlreadyLoaded,
}

/// Ordered, immutable set of embedding points with id lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    points: Vec<EmbeddingPoint>,
    by_id: HashMap<u32, usize>,
}

const COLUMNS: [&str; 5] = ["id", "x", "y", "z", "label"];

impl Dataset {
    /// Build from points in order. Ids must be unique.
    pub fn from_points(points: Vec<EmbeddingPoint>) -> Result<Self, DataError> {
        let mut by_id = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if by_id.insert(p.id, i).is_some() {
                return Err(DataError::DuplicateId {
                    line: i + 1,
                    id: p.id,
                });
            }
        }
        Ok(Self { points, by_id })
    }

    /// Parse a header-led comma-separated table.
    pub fn from_table(text: &str) -> Result<Self, DataError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());
        let (_, header) = lines.next().ok_or(DataError::Empty)?;
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let mut cols = [0_usize; 5];
        for (slot, column) in cols.iter_mut().zip(COLUMNS) {
            *slot = names
                .iter()
                .position(|n| *n == column)
                .ok_or(DataError::MissingColumn { column })?;
        }
        let [c_id, c_x, c_y, c_z, c_label] = cols;
        let expected = cols.iter().max().map_or(0, |m| m + 1);

        let mut points = Vec::new();
        let mut by_id = HashMap::new();
        let mut fields = Vec::with_capacity(names.len());
        for (line, row) in lines {
            fields.clear();
            fields.extend(row.split(',').map(str::trim));
            if fields.len() < expected {
                return Err(DataError::ShortRow {
                    line,
                    expected,
                    found: fields.len(),
                });
            }
            let p = EmbeddingPoint {
                id: integer(line, "id", fields[c_id])?,
                x: number(line, "x", fields[c_x])?,
                y: number(line, "y", fields[c_y])?,
                z: number(line, "z", fields[c_z])?,
                label: integer(line, "label", fields[c_label])?,
            };
            if by_id.insert(p.id, points.len()).is_some() {
                return Err(DataError::DuplicateId { line, id: p.id });
            }
            points.push(p);
        }
        Ok(Self { points, by_id })
    }

    /// Write the table with header `id,x,y,z,label`.
    ///
    /// Coordinates use the shortest representation that parses back to the
    /// same value, so [`Dataset::from_table`] reproduces this dataset exactly.
    pub fn to_table(&self) -> String {
        let mut out = String::with_capacity(16 + self.points.len() * 32);
        out.push_str("id,x,y,z,label\n");
        for p in &self.points {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{},{},{},{},{}", p.id, p.x, p.y, p.z, p.label);
        }
        out
    }

    /// Points in load order.
    pub fn points(&self) -> &[EmbeddingPoint] {
        &self.points
    }

    /// Look up a point by id.
    pub fn get(&self, id: u32) -> Option<&EmbeddingPoint> {
        self.by_id.get(&id).map(|&i| &self.points[i])
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest id present.
    pub fn max_id(&self) -> Option<u32> {
        self.points.iter().map(|p| p.id).max()
    }

    /// Iterate points in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, EmbeddingPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a EmbeddingPoint;
    type IntoIter = std::slice::Iter<'a, EmbeddingPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn integer(line: usize, column: &'static str, raw: &str) -> Result<u32, DataError> {
    raw.parse().map_err(|_| DataError::InvalidInteger {
        line,
        column,
        value: raw.to_owned(),
    })
}

fn number(line: usize, column: &'static str, raw: &str) -> Result<f64, DataError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DataError::InvalidNumber {
            line,
            column,
            value: raw.to_owned(),
        }),
    }
}
