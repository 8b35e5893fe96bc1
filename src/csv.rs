use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::money::MoneyError;
use crate::{ChangeRequest, CoinCount, CoinStack, Denomination, Money, Receipt, RequestId};

/// Errors that can occur when reading csv files
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: invalid {field}: {source}")]
    Amount {
        line: usize,
        field: &'static str,
        source: MoneyError,
    },
}

#[derive(Debug, Deserialize)]
struct RequestRow {
    id: RequestId,
    purchase: String,
    tender: String,
}

#[derive(Debug, Deserialize)]
struct StockRow {
    denomination: Denomination,
    count: CoinCount,
}

#[derive(Debug, Serialize)]
struct ReceiptRow {
    request: RequestId,
    change: String,
    coins: String,
    error: String,
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, CsvError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Read change requests from a csv file with `id,purchase,tender` columns.
/// Amounts are decimal major units (`1.25`).
pub fn read_requests(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<ChangeRequest, CsvError>>, CsvError> {
    let reader = open(path.as_ref())?;

    Ok(reader
        .into_deserialize::<RequestRow>()
        .enumerate()
        .map(|(idx, result)| -> Result<ChangeRequest, CsvError> {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let amount = |field: &'static str, text: &str| {
                Money::from_decimal(text).map_err(|source| CsvError::Amount {
                    line,
                    field,
                    source,
                })
            };
            Ok(ChangeRequest::new(
                row.id,
                amount("purchase", &row.purchase)?,
                amount("tender", &row.tender)?,
            ))
        }))
}

/// Read absolute stock counts from a csv file with `denomination,count` columns.
pub fn read_stock(path: impl AsRef<Path>) -> Result<Vec<CoinStack>, CsvError> {
    open(path.as_ref())?
        .into_deserialize::<StockRow>()
        .enumerate()
        .map(|(idx, result)| -> Result<CoinStack, CsvError> {
            let line = idx + 2;
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            Ok(CoinStack::new(row.denomination, row.count))
        })
        .collect()
}

/// Writes receipts as csv rows.
pub struct ReceiptWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> ReceiptWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn write(&mut self, receipt: &Receipt) -> Result<(), csv::Error> {
        let (coins, error) = match &receipt.result {
            Ok(coins) => (
                coins
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
                String::new(),
            ),
            Err(e) => (String::new(), e.to_string()),
        };

        self.writer.serialize(ReceiptRow {
            request: receipt.request,
            change: receipt.change.map(|c| c.to_string()).unwrap_or_default(),
            coins,
            error,
        })
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DispenseError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn read_request() {
        let file = write_csv("id,purchase,tender\n1,0.61,2.00\n");
        let results: Vec<_> = read_requests(file.path()).unwrap().collect();
        assert_eq!(results.len(), 1);

        let request = results.into_iter().next().unwrap().unwrap();
        assert_eq!(
            request,
            ChangeRequest::new(1, Money::from_minor(61), Money::from_minor(200))
        );
    }

    #[test]
    fn read_with_whitespace() {
        let file = write_csv("id, purchase, tender\n1, 1.25, 2\n");
        let results: Vec<_> = read_requests(file.path()).unwrap().collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
    }

    #[test]
    fn read_returns_error_for_fractional_cents() {
        let file = write_csv("id,purchase,tender\n1,1.255,2.00\n2,1.00,2.00\n");
        let results: Vec<_> = read_requests(file.path()).unwrap().collect();
        assert_eq!(results.len(), 2);

        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::Amount {
                line: 2,
                field: "purchase",
                source: MoneyError::FractionalMinorUnit(_)
            }
        ));
        assert!(results[1].is_ok());
    }

    #[test]
    fn read_returns_error_for_bad_row() {
        let file = write_csv("id,purchase,tender\nabc,1.00,2.00\n");
        let results: Vec<_> = read_requests(file.path()).unwrap().collect();
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        let result = read_requests("does/not/exist.csv");
        assert!(matches!(result, Err(CsvError::Open { .. })));
    }

    #[test]
    fn read_stock_rows() {
        let file = write_csv("denomination,count\n25,0\n10,10\n");
        let stock = read_stock(file.path()).unwrap();
        assert_eq!(stock, vec![CoinStack::new(25, 0), CoinStack::new(10, 10)]);
    }

    #[test]
    fn write_receipts() {
        let mut buf = Vec::new();
        {
            let mut writer = ReceiptWriter::new(&mut buf);
            writer
                .write(&Receipt {
                    request: 1,
                    change: Some(Money::from_minor(139)),
                    result: Ok(vec![50, 50, 20, 10, 5, 2, 2]),
                })
                .unwrap();
            writer
                .write(&Receipt {
                    request: 2,
                    change: None,
                    result: Err(DispenseError::InsufficientTender {
                        shortfall: Money::from_minor(25),
                    }),
                })
                .unwrap();
            writer.flush().unwrap();
        }

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "request,change,coins,error");
        assert_eq!(lines[1], "1,1.39,50 50 20 10 5 2 2,");
        assert_eq!(lines[2], "2,,,insufficient tender: short by 0.25");
    }
}
