// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Chart specifications from derived tables.
//!
//! Scatter and line charts emit one point per row whose x and y cells are both
//! present, grouped into one series per distinct value of the colour column
//! in order of first appearance. Funnel charts emit one stage per category of
//! the y column, sized by the sum of the x column over that category.

use crate::{Axis, ChartKind, ChartSpec, Point, PresentationAdapter, Series, ViewArtifact};
use sieve_core::{ColumnView, DerivedTable, RenderError, Value};

/// Maps derived table columns onto a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBuilder {
    output_id: String,
    kind: ChartKind,
    x: Axis,
    y: Axis,
    color: Option<String>,
    title: Option<String>,
}

impl ChartBuilder {
    pub fn new(output_id: impl Into<String>, kind: ChartKind, x: Axis, y: Axis) -> Self {
        Self {
            output_id: output_id.into(),
            kind,
            x,
            y,
            color: None,
            title: None,
        }
    }

    pub fn scatter(output_id: impl Into<String>, x: Axis, y: Axis) -> Self {
        Self::new(output_id, ChartKind::Scatter, x, y)
    }

    pub fn line(output_id: impl Into<String>, x: Axis, y: Axis) -> Self {
        Self::new(output_id, ChartKind::Line, x, y)
    }

    /// Funnel with `x` summed per category of `y`
    pub fn funnel(output_id: impl Into<String>, x: Axis, y: Axis) -> Self {
        Self::new(output_id, ChartKind::Funnel, x, y)
    }

    /// Groups points into series by `column`.
    #[must_use]
    pub fn color(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn column<'t>(
        &self,
        table: &'t DerivedTable,
        name: &str,
    ) -> Result<ColumnView<'t>, RenderError> {
        table
            .column(name)
            .ok_or_else(|| RenderError::missing_column(&self.output_id, name))
    }

    fn points(&self, table: &DerivedTable) -> Result<Vec<Series>, RenderError> {
        let x = self.column(table, &self.x.column)?;
        let y = self.column(table, &self.y.column)?;
        let color = self
            .color
            .as_deref()
            .map(|name| self.column(table, name))
            .transpose()?;

        let mut series: Vec<Series> = Vec::new();
        for row in 0..table.len() {
            let (Some(xv), Some(yv)) = (x.get(row), y.get(row)) else {
                continue;
            };
            if xv.is_null() || yv.is_null() {
                continue;
            }
            let group = color.and_then(|c| c.get(row)).map(ToString::to_string);
            let point = Point {
                x: xv.clone(),
                y: yv.clone(),
            };
            match series.iter_mut().find(|s| s.name == group) {
                Some(existing) => existing.points.push(point),
                None => series.push(Series {
                    name: group,
                    points: vec![point],
                }),
            }
        }

        // An uncoloured chart always has exactly one series.
        if series.is_empty() && color.is_none() {
            series.push(Series {
                name: None,
                points: Vec::new(),
            });
        }
        Ok(series)
    }

    fn stages(&self, table: &DerivedTable) -> Result<Vec<Series>, RenderError> {
        let x = self.column(table, &self.x.column)?;
        let y = self.column(table, &self.y.column)?;

        let mut stages: Vec<(String, f64)> = Vec::new();
        for row in 0..table.len() {
            let (Some(xv), Some(yv)) = (x.get(row), y.get(row)) else {
                continue;
            };
            if xv.is_null() || yv.is_null() {
                continue;
            }
            let amount = xv.as_number().ok_or_else(|| RenderError::UnsupportedValue {
                output: self.output_id.clone(),
                column: self.x.column.clone(),
                value: xv.to_string(),
            })?;
            let category = yv.to_string();
            match stages.iter_mut().find(|(name, _)| *name == category) {
                Some((_, total)) => *total += amount,
                None => stages.push((category, amount)),
            }
        }

        let points = stages
            .into_iter()
            .map(|(category, total)| Point {
                x: Value::Number(total),
                y: Value::Text(category),
            })
            .collect();
        Ok(vec![Series { name: None, points }])
    }
}

impl PresentationAdapter for ChartBuilder {
    fn output_id(&self) -> &str {
        &self.output_id
    }

    fn render(&self, table: &DerivedTable) -> Result<ViewArtifact, RenderError> {
        let series = match self.kind {
            ChartKind::Scatter | ChartKind::Line => self.points(table)?,
            ChartKind::Funnel => self.stages(table)?,
        };
        Ok(ViewArtifact::Chart(ChartSpec {
            kind: self.kind,
            title: self.title.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
            color: self.color.clone(),
            series,
        }))
    }
}
