//! Sales record loading and equal-period aggregation

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One dated sale or revenue entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub amount: f64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Length of one forecast period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    /// Weeks start on Monday
    Weekly,
    /// Months start on day 1
    #[default]
    Monthly,
}

impl Granularity {
    /// First day of the period containing `date`.
    ///
    /// `None` when that day is before [`NaiveDate::MIN`], which only happens
    /// for weeks straddling the start of the representable range.
    pub fn period_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => Some(date),
            Granularity::Weekly => {
                let offset = date.weekday().num_days_from_monday() as u64;
                date.checked_sub_days(Days::new(offset))
            }
            Granularity::Monthly => date.with_day(1),
        }
    }

    /// Start of the period following the one starting at `start`
    pub fn next(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => start.checked_add_days(Days::new(1)),
            Granularity::Weekly => start.checked_add_days(Days::new(7)),
            Granularity::Monthly => start.checked_add_months(Months::new(1)),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Granularity::Daily),
            "weekly" | "week" | "w" => Ok(Granularity::Weekly),
            "monthly" | "month" | "m" => Ok(Granularity::Monthly),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unsupported granularity: {}",
                other
            ))),
        }
    }
}

/// Contiguous equal-length periods with summed amounts.
///
/// Position `i` of [`PeriodSeries::totals`] is the `i`-th period after the
/// first one, which is the layout the trend engine expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSeries {
    granularity: Granularity,
    starts: Vec<NaiveDate>,
    totals: Vec<f64>,
}

impl PeriodSeries {
    /// Bucket `records` into periods, filling periods without sales with 0.
    ///
    /// Records may arrive in any order.
    pub fn aggregate(records: &[SalesRecord], granularity: Granularity) -> Result<Self> {
        let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            let start = granularity.period_start(record.date).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "{} period containing {} starts out of range",
                    granularity, record.date
                ))
            })?;
            *buckets.entry(start).or_insert(0.0) += record.amount;
        }

        let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Ok(Self {
                    granularity,
                    starts: Vec::new(),
                    totals: Vec::new(),
                })
            }
        };

        let mut starts = Vec::new();
        let mut totals = Vec::new();
        let mut current = first;

        while current <= last {
            let total = buckets.get(&current).copied().unwrap_or(0.0);
            if !total.is_finite() {
                return Err(ForecastError::DataError(format!(
                    "Total for period starting {} is not finite",
                    current
                )));
            }

            starts.push(current);
            totals.push(total);

            current = match granularity.next(current) {
                Some(next) => next,
                None => break,
            };
        }

        log::debug!(
            "aggregated {} records into {} {} periods",
            records.len(),
            totals.len(),
            granularity
        );

        Ok(Self {
            granularity,
            starts,
            totals,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// First day of every period, oldest first
    pub fn starts(&self) -> &[NaiveDate] {
        &self.starts
    }

    /// Summed amount of every period, oldest first
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    pub fn last_start(&self) -> Option<NaiveDate> {
        self.starts.last().copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Start dates of the `horizon` periods after the last one.
    ///
    /// Empty for an empty series.
    pub fn future_starts(&self, horizon: usize) -> Result<Vec<NaiveDate>> {
        let mut current = match self.last_start() {
            Some(last) => last,
            None => return Ok(Vec::new()),
        };

        let mut starts = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            current = self.granularity.next(current).ok_or_else(|| {
                ForecastError::DataError(format!("Period after {} is out of range", current))
            })?;
            starts.push(current);
        }

        Ok(starts)
    }
}

/// Loader for dated sales records
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load sales records from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let records = Self::from_reader(file)?;

        log::debug!("loaded {} sales records from {}", records.len(), path.display());

        Ok(records)
    }

    /// Load sales records from CSV text.
    ///
    /// The header must name a date column (any name containing "date") and an
    /// amount column (`amount`, `revenue`, `sales` or `total`). Dates use
    /// `YYYY-MM-DD`. Other columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let date_idx = Self::detect_date_column(&headers)?;
        let amount_idx = Self::detect_amount_column(&headers)?;

        let mut records = Vec::new();
        for (row, result) in csv_reader.records().enumerate() {
            let record = result?;
            let line = row + 2;

            let date_field = record.get(date_idx).unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT)?;

            let amount_field = record.get(amount_idx).unwrap_or_default();
            let amount: f64 = amount_field.parse().map_err(|_| {
                ForecastError::DataError(format!(
                    "line {}: invalid amount '{}'",
                    line, amount_field
                ))
            })?;

            if !amount.is_finite() {
                return Err(ForecastError::DataError(format!(
                    "line {}: amount is not finite ({})",
                    line, amount
                )));
            }

            records.push(SalesRecord { date, amount });
        }

        Ok(records)
    }

    fn detect_date_column(headers: &csv::StringRecord) -> Result<usize> {
        headers
            .iter()
            .position(|name| name.to_lowercase().contains("date"))
            .ok_or_else(|| ForecastError::DataError("No date column found in data".to_string()))
    }

    fn detect_amount_column(headers: &csv::StringRecord) -> Result<usize> {
        let candidates = ["amount", "revenue", "sales", "total"];

        headers
            .iter()
            .position(|name| candidates.contains(&name.to_lowercase().as_str()))
            .ok_or_else(|| {
                ForecastError::DataError("No amount column found in data".to_string())
            })
    }
}
