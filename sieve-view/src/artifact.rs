// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Serialize;
use sieve_core::Value;

/// What an output shows.
///
/// Artifacts are built fresh from the current derived table on every read and
/// serialize to JSON for the host's view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewArtifact {
    /// The page has not published a table yet
    Pending,
    /// Formatted message
    Text { text: String },
    /// Tabular projection
    Table(TableView),
    /// Chart description for the host's plotting library
    Chart(ChartSpec),
    /// The adapter could not build its artifact
    Placeholder { reason: String },
}

impl ViewArtifact {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Display-ready rows of a derived table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableView {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column, by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Line,
    /// One stage per category of the y column, sized by the summed x column
    Funnel,
}

/// A data column mapped onto a chart axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    pub column: String,
    pub label: String,
}

impl Axis {
    /// Axis labelled with its column name
    pub fn new(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            label: column.clone(),
            column,
        }
    }

    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: Value,
    pub y: Value,
}

/// Points sharing one colour group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Group value, `None` when the chart is not coloured
    pub name: Option<String>,
    pub points: Vec<Point>,
}

/// Everything a plotting library needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    /// Column the series are grouped by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Series names in first-appearance order
    pub fn group_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.series.iter().map(|s| s.name.as_deref())
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}
