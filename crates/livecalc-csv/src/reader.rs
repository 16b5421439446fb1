//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use livecalc_core::Grid;
use tracing::debug;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a new grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading grid from CSV");
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a new grid
    ///
    /// Fields are stored verbatim, starting at A1. Records may have differing
    /// lengths; anything that does not fit the grid is an error.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut grid = Grid::with_dimensions(options.dimensions)?;

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(row_idx).unwrap_or(u32::MAX);

            for (col_idx, field) in record.iter().enumerate() {
                // Trailing empty fields are harmless even past the last column
                if field.is_empty() {
                    continue;
                }
                let col = u16::try_from(col_idx).unwrap_or(u16::MAX);
                grid.set_value(row, col, field)?;
            }
        }

        debug!(cells = grid.non_empty_count(), "loaded grid from CSV");
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livecalc_core::{Error, GridDimensions};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_values_verbatim() {
        let data = "1,2,hello\n\" 3 \",,x\n";
        let grid = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(grid.value_at_label("A1").unwrap(), "1");
        assert_eq!(grid.value_at_label("C1").unwrap(), "hello");
        assert_eq!(grid.value_at_label("A2").unwrap(), " 3 ");
        assert_eq!(grid.value_at_label("B2").unwrap(), "");
        assert_eq!(grid.value_at_label("C2").unwrap(), "x");
        assert_eq!(grid.dimensions(), GridDimensions::default());
    }

    #[test]
    fn test_read_custom_delimiter() {
        let options = CsvReadOptions {
            delimiter: b';',
            ..Default::default()
        };
        let grid = CsvReader::read("4;5\n".as_bytes(), &options).unwrap();
        assert_eq!(grid.value(0, 1).unwrap(), "5");
    }

    #[test]
    fn test_read_too_many_rows() {
        let options = CsvReadOptions {
            dimensions: GridDimensions::new(2, 2),
            ..Default::default()
        };
        let err = CsvReader::read("1\n2\n3\n".as_bytes(), &options).unwrap_err();
        assert!(matches!(
            err,
            crate::CsvError::Core(Error::RowOutOfBounds(2, 1))
        ));
    }

    #[test]
    fn test_read_too_many_columns() {
        let options = CsvReadOptions {
            dimensions: GridDimensions::new(2, 2),
            ..Default::default()
        };
        assert!(CsvReader::read("1,2,3\n".as_bytes(), &options).is_err());

        // Empty overflow fields are ignored
        let grid = CsvReader::read("1,2,,\n".as_bytes(), &options).unwrap();
        assert_eq!(grid.value(0, 1).unwrap(), "2");
    }
}
