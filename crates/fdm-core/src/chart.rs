//! Line chart model and the renderer seam.
//!
//! The manager never draws anything itself. It builds a [`LineChart`] and hands
//! it to a [`ChartRenderer`], which blocks until the chart has been shown.

use std::fmt::Debug;

use polars::prelude::{Column, DataFrame};

use crate::error::{FinanceError, Result};
use crate::statement::RevenueSeries;

/// One labelled line.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Y values in x order; `None` leaves a gap.
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Creates a labelled series.
    #[must_use]
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// A multi-series line chart with a legend.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    /// Chart title.
    pub title: String,
    /// Lines, drawn in order.
    pub series: Vec<Series>,
    /// Whether the series labels are shown in a legend.
    pub legend: bool,
}

impl LineChart {
    /// Creates an empty chart without a legend.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
            legend: false,
        }
    }

    /// Appends a series.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Shows or hides the legend.
    #[must_use]
    pub const fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Series labels in drawing order, or `None` when the legend is hidden.
    #[must_use]
    pub fn legend_labels(&self) -> Option<Vec<&str>> {
        self.legend
            .then(|| self.series.iter().map(|s| s.label.as_str()).collect())
    }

    /// Builds the "Revenue" / "Gross Profit" chart for an income statement.
    #[must_use]
    pub fn income(title: impl Into<String>, series: RevenueSeries) -> Self {
        Self::new(title)
            .with_series(Series::new("Revenue", series.revenue))
            .with_series(Series::new("Gross Profit", series.gross_profit))
            .with_legend(true)
    }

    /// Lays the chart out as a table: a `period` column then one column per series.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let height = self.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
        let periods: Vec<u32> = (0..height as u32).collect();

        let mut columns = Vec::with_capacity(self.series.len() + 1);
        columns.push(Column::new("period".into(), periods));
        for series in &self.series {
            columns.push(Column::new(
                series.label.as_str().into(),
                series.values.clone(),
            ));
        }

        DataFrame::new(columns).map_err(|e| FinanceError::Chart(e.to_string()))
    }
}

/// Displays a chart.
///
/// Implementations block until the chart has been shown and dismissed.
pub trait ChartRenderer: Send + Sync + Debug {
    /// Renders `chart`.
    fn render(&self, chart: &LineChart) -> Result<()>;
}

/// Prints charts to stdout as a table.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableRenderer;

impl ChartRenderer for TableRenderer {
    fn render(&self, chart: &LineChart) -> Result<()> {
        let frame = chart.to_frame()?;
        println!("{}", chart.title);
        println!("{frame}");
        if let Some(labels) = chart.legend_labels() {
            println!("legend: {}", labels.join(", "));
        }
        Ok(())
    }
}
