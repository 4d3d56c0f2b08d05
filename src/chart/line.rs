//! Line chart document consumed by a Chart.js-style renderer

use std::io::Write;

use serde::Serialize;

use super::CurrencyFormat;
use crate::error::Result;
use crate::table::ResultTable;

pub const DEFAULT_TITLE: &str = "Tax Exemption - insurance fee vs annual income (JPY)";
pub const DEFAULT_BORDER_WIDTH: u32 = 2;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub border_width: u32,
    pub show_line: bool,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    /// Formatted income labels for the x axis
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: Title,
    /// How the renderer should format y axis ticks
    pub y_axis_tick_format: CurrencyFormat,
}

/// Complete line chart: one dataset per premium level over the income axis
#[derive(Debug, Clone, Serialize)]
pub struct LineChart {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl LineChart {
    pub fn from_table(table: &ResultTable, format: &CurrencyFormat) -> Self {
        let labels = table.incomes.iter().map(|&v| format.format(v)).collect();

        let datasets = table
            .series
            .iter()
            .map(|series| Dataset {
                label: format!("{} per month", format.format(series.monthly_fee)),
                border_width: DEFAULT_BORDER_WIDTH,
                show_line: true,
                data: series.after_tax_fees.clone(),
            })
            .collect();

        Self {
            kind: "line".to_string(),
            data: ChartData { labels, datasets },
            options: ChartOptions {
                title: Title {
                    display: true,
                    text: DEFAULT_TITLE.to_string(),
                },
                y_axis_tick_format: format.clone(),
            },
        }
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.options.title.text = text.into();
        self
    }

    /// Write the chart as pretty-printed JSON
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::generate_default_table;

    #[test]
    fn test_chart_from_default_table() {
        let table = generate_default_table();
        let chart = LineChart::from_table(&table, &CurrencyFormat::yen());

        assert_eq!(chart.kind, "line");
        assert_eq!(chart.data.labels.len(), 202);
        assert_eq!(chart.data.labels[0], "¥0");
        assert_eq!(chart.data.labels[1], "¥100,000");
        assert_eq!(chart.data.labels[201], "¥20,100,000");

        assert_eq!(chart.data.datasets.len(), 7);
        assert_eq!(chart.data.datasets[0].label, "¥1,000 per month");
        assert_eq!(chart.data.datasets[6].label, "¥7,000 per month");
        assert_eq!(chart.data.datasets[3].data, table.series[3].after_tax_fees);
    }

    #[test]
    fn test_json_document() {
        let table = generate_default_table();
        let chart = LineChart::from_table(&table, &CurrencyFormat::yen()).with_title("Custom");

        let mut buf = Vec::new();
        chart.write_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["type"], "line");
        assert_eq!(value["options"]["title"]["text"], "Custom");
        assert_eq!(value["options"]["yAxisTickFormat"]["symbol"], "¥");
        assert_eq!(value["data"]["datasets"][0]["borderWidth"], 2);
        assert_eq!(value["data"]["datasets"][0]["showLine"], true);
        assert_eq!(value["data"]["datasets"][0]["data"][0], 850.0);
    }
}
