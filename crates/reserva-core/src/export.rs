//! CSV export of a [`ResultTable`].
//!
//! The header is the union of every column the batch produced, in first-seen
//! order; a record without a column gets an empty cell.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::booking::ResultTable;

/// UTF-8 byte-order mark. Spreadsheet tools need it to detect the encoding
/// of accented column names and values.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `table` as CSV, optionally preceded by a UTF-8 BOM.
pub fn write_csv<W: Write>(table: &ResultTable, mut writer: W, bom: bool) -> Result<()> {
    if bom {
        writer.write_all(UTF8_BOM)?;
    }

    if table.columns().is_empty() {
        writer.flush()?;
        return Ok(());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` to a file, with a BOM.
pub fn write_csv_file(table: &ResultTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, std::io::BufWriter::new(file), true)
}

/// Render `table` as a CSV string without a BOM.
pub fn to_csv_string(table: &ResultTable) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf, false)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::{BookingField, FieldMapping};

    fn table() -> ResultTable {
        let mut first = FieldMapping::new("Age");
        first.set(BookingField::Reference, "123-45");
        first.set(BookingField::Hotel, "Hotel Gran Vía");
        first.push_age("34");

        let mut second = FieldMapping::new("Age");
        second.set(BookingField::ClientName, "ANA, RUIZ");
        second.push_age("30");
        second.push_age("8");

        let mut table = ResultTable::new();
        table.push(first);
        table.push(second);
        table
    }

    #[test]
    fn test_header_is_column_union() {
        let csv = to_csv_string(&table()).unwrap();
        let header = csv.lines().next().unwrap();

        assert!(header.starts_with("Tipo de Reserva,Número Ref,Nombre Cliente"));
        assert!(header.ends_with("Teléfono Contacto,Age 1,Age 2"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_missing_cells_are_empty() {
        let csv = to_csv_string(&table()).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert!(rows[1].ends_with(",34,"));
        assert!(rows[1].contains("Hotel Gran Vía"));
        assert!(rows[2].contains("\"ANA, RUIZ\""));
        assert!(rows[2].ends_with(",30,8"));
    }

    #[test]
    fn test_bom_prefix() {
        let mut buf = Vec::new();
        write_csv(&table(), &mut buf, true).unwrap();
        assert!(buf.starts_with(UTF8_BOM));

        let mut plain = Vec::new();
        write_csv(&table(), &mut plain, false).unwrap();
        assert_eq!(&buf[UTF8_BOM.len()..], plain.as_slice());
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let csv = to_csv_string(&ResultTable::new()).unwrap();
        assert!(csv.trim().is_empty());
    }
}
