//! Month records and projection output structures

use std::io::Write;

use serde::{Deserialize, Serialize};

/// Running sums from month 0 through the current month, inclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub interest: f64,
    pub invested: f64,
}

/// Amounts for the current month alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InMonth {
    /// Interest earned this month
    pub interest: f64,
    /// Net contribution (contribution - withdrawals)
    pub invested: f64,
    /// Combined annual rate applied this month (base + bonus)
    pub rate: f64,
}

/// One projected month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    /// Zero-based month index
    pub idx: u32,
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub total: MonthTotals,
    pub in_month: InMonth,
}

/// Flat row layout used for CSV export
#[derive(Debug, Serialize)]
struct CsvMonthRow {
    idx: u32,
    starting_balance: f64,
    ending_balance: f64,
    in_month_invested: f64,
    in_month_interest: f64,
    in_month_rate: f64,
    total_invested: f64,
    total_interest: f64,
}

impl From<&MonthData> for CsvMonthRow {
    fn from(month: &MonthData) -> Self {
        Self {
            idx: month.idx,
            starting_balance: month.starting_balance,
            ending_balance: month.ending_balance,
            in_month_invested: month.in_month.invested,
            in_month_interest: month.in_month.interest,
            in_month_rate: month.in_month.rate,
            total_invested: month.total.invested,
            total_interest: month.total.interest,
        }
    }
}

/// Complete projection result: one record per month, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub months: Vec<MonthData>,
}

impl ProjectionResult {
    pub fn with_capacity(months: usize) -> Self {
        Self {
            months: Vec::with_capacity(months),
        }
    }

    /// Add a month record
    pub fn add_month(&mut self, month: MonthData) {
        self.months.push(month);
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn final_balance(&self) -> Option<f64> {
        self.months.last().map(|m| m.ending_balance)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let starting_balance = self.months.first().map(|m| m.starting_balance).unwrap_or(0.0);
        let last = self.months.last();

        ProjectionSummary {
            total_months: self.months.len() as u32,
            starting_balance,
            final_balance: last.map(|m| m.ending_balance).unwrap_or(starting_balance),
            total_interest: last.map(|m| m.total.interest).unwrap_or(0.0),
            total_invested: last.map(|m| m.total.invested).unwrap_or(0.0),
        }
    }

    /// Write every month as a CSV row, header first
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for month in &self.months {
            csv_writer.serialize(CsvMonthRow::from(month))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub starting_balance: f64,
    pub final_balance: f64,
    pub total_interest: f64,
    pub total_invested: f64,
}
