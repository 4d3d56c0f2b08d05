//! Wide CSV export: one row per income, one column per premium level

use std::io::Write;

use crate::error::{Error, Result};
use crate::table::ResultTable;

/// Fails with `Error::InvalidTable` if a series length differs from the
/// income axis
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    if let Some(series) = table
        .series
        .iter()
        .find(|s| s.after_tax_fees.len() != table.incomes.len())
    {
        return Err(Error::InvalidTable(format!(
            "series for monthly fee {} has {} values for {} incomes",
            series.monthly_fee,
            series.after_tax_fees.len(),
            table.incomes.len()
        )));
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["annual_income".to_string()];
    header.extend(
        table
            .series
            .iter()
            .map(|s| format!("monthly_fee_{:.0}", s.monthly_fee)),
    );
    wtr.write_record(&header)?;

    for (i, income) in table.incomes.iter().enumerate() {
        let mut record = Vec::with_capacity(table.series.len() + 1);
        record.push(format!("{:.0}", income));
        for series in &table.series {
            record.push(format!("{:.2}", series.after_tax_fees[i]));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::generate_default_table;

    #[test]
    fn test_wide_csv() {
        let table = generate_default_table();
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 203);
        assert_eq!(
            lines[0],
            "annual_income,monthly_fee_1000,monthly_fee_2000,monthly_fee_3000,\
             monthly_fee_4000,monthly_fee_5000,monthly_fee_6000,monthly_fee_7000"
        );
        assert!(lines[1].starts_with("0,850.00,"));
        assert!(lines[51].starts_with("5000000,"));
        assert!(lines[51].contains(",4183.33,"));
    }

    #[test]
    fn test_mismatched_series_rejected() {
        let json = r#"{"incomes":[0,100000],"series":[{"monthly_fee":1000,"after_tax_fees":[850]}]}"#;
        let table: ResultTable = serde_json::from_str(json).unwrap();

        let mut buf = Vec::new();
        let result = write_csv(&table, &mut buf);

        assert!(matches!(result, Err(Error::InvalidTable(_))));
        assert!(buf.is_empty());
    }
}
