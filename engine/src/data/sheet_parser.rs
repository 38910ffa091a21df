use crate::error::EngineError;
use csv::ReaderBuilder;
use shared::models::RentalRecord;
use std::collections::HashMap;
use tracing::debug;

// Cell-level coercions. None of these fail: a bad cell becomes a safe default.
pub mod sheet_format {
    use chrono::{NaiveDate, NaiveDateTime};

    /// Lowercases and drops everything but letters and digits, so that
    /// `No_Surat`, `no surat` and `NO SURAT` all compare equal.
    pub fn canonical_header(name: &str) -> String {
        name.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(|c| c.to_lowercase())
            .collect()
    }

    /// Integer quantity; blank, non-numeric and negative values become 0.
    /// Fractional input ("2.0", "2.7") truncates toward zero.
    pub fn parse_quantity(s: &str) -> u32 {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return n.clamp(0, u32::MAX as i64) as u32;
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() && f > 0.0 => f.trunc().min(u32::MAX as f64) as u32,
            _ => 0,
        }
    }

    /// Tries each format in order. Formats carrying a time component are
    /// parsed as date-times and truncated to the date.
    pub fn parse_date(s: &str, formats: &[String]) -> Option<NaiveDate> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        formats.iter().find_map(|fmt| {
            if fmt.contains("%H") || fmt.contains("%T") {
                NaiveDateTime::parse_from_str(trimmed, fmt).ok().map(|dt| dt.date())
            } else {
                NaiveDate::parse_from_str(trimmed, fmt).ok()
            }
        })
    }

    /// Spreadsheet checkbox or yes/no text. `None` means the cell was blank
    /// or the value was not recognised.
    pub fn parse_flag(s: &str) -> Option<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "ya" | "sudah" | "x" | "✓" => Some(true),
            "false" | "0" | "no" | "n" | "tidak" | "belum" => Some(false),
            _ => None,
        }
    }

}

/// Columns the rental sheet can carry, each with its accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EquipmentType,
    Brand,
    Model,
    Quantity,
    Origin,
    Destination,
    RentalStart,
    RentalEnd,
    Returned,
    ReferenceNumber,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::EquipmentType,
        Column::Brand,
        Column::Model,
        Column::Quantity,
        Column::Origin,
        Column::Destination,
        Column::RentalStart,
        Column::RentalEnd,
        Column::Returned,
        Column::ReferenceNumber,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::EquipmentType => &["Jenis_Mesin", "Jenis", "Equipment", "Equipment_Type"],
            Column::Brand => &["Merek", "Merk", "Brand"],
            Column::Model => &["Type", "Tipe", "Model"],
            Column::Quantity => &["Qty", "Jumlah", "Quantity"],
            Column::Origin => &["From", "Asal", "Origin"],
            Column::Destination => &["To", "Tujuan", "Destination"],
            Column::RentalStart => &["Start_Sewa", "Mulai_Sewa", "Rental_Start"],
            Column::RentalEnd => &["Akhir_Sewa", "Selesai_Sewa", "Rental_End"],
            Column::Returned => &["Status_Kembali", "Kembali", "Returned"],
            Column::ReferenceNumber => &["No_Surat", "Nomor_Surat", "Reference_Number"],
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Column::EquipmentType | Column::Quantity | Column::Destination | Column::RentalEnd | Column::Returned
        )
    }

    /// Name used in messages: the sheet's own spelling.
    pub fn display_name(&self) -> &'static str {
        self.aliases()[0]
    }
}

/// A sheet as fetched: header row plus string cells, fully blank rows dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Header position of every column found in a sheet.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<Column, usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> Result<Self, EngineError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(EngineError::UnreadableStructure("the sheet has no header row".to_string()));
        }

        let canonical: Vec<String> = headers.iter().map(|h| sheet_format::canonical_header(h)).collect();
        let mut positions = HashMap::new();
        for column in Column::ALL {
            let found = column.aliases().iter().find_map(|alias| {
                let wanted = sheet_format::canonical_header(alias);
                canonical.iter().position(|h| *h == wanted)
            });
            if let Some(pos) = found {
                positions.insert(column, pos);
            }
        }

        let missing: Vec<&str> = Column::ALL
            .iter()
            .filter(|c| c.is_required() && !positions.contains_key(*c))
            .map(|c| c.display_name())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::UnreadableStructure(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(ColumnMap { positions })
    }

    pub fn contains(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// Trimmed cell for `column`, or `None` when the sheet lacks the column.
    /// Short rows read as blank cells.
    pub fn cell<'a>(&self, row: &'a [String], column: Column) -> Option<&'a str> {
        self.positions
            .get(&column)
            .map(|&pos| row.get(pos).map(|s| s.trim()).unwrap_or(""))
    }
}

#[derive(Debug, Clone)]
pub struct SheetParser {
    delimiter: u8,
    date_formats: Vec<String>,
}

impl SheetParser {
    pub fn new(delimiter: u8, date_formats: Vec<String>) -> Self {
        SheetParser { delimiter, date_formats }
    }

    /// Reads CSV text into a raw sheet. Rows may have any length; rows whose
    /// cells are all blank are dropped.
    pub fn read_raw(&self, text: &str) -> Result<RawSheet, EngineError> {
        if text.trim().is_empty() {
            return Ok(RawSheet::default());
        }

        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawSheet { headers, rows })
    }

    /// Normalizes every data row into a `RentalRecord`. Only a missing header
    /// or required column fails; bad cells fall back to defaults.
    pub fn load_and_normalize(&self, sheet: &RawSheet) -> Result<Vec<RentalRecord>, EngineError> {
        let columns = ColumnMap::resolve(&sheet.headers)?;
        if !columns.contains(Column::ReferenceNumber) {
            debug!("No reference number column; defaulting to '-'");
        }

        let records = sheet
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.normalize_row(&columns, row, idx + 1))
            .collect();
        Ok(records)
    }

    fn normalize_row(&self, columns: &ColumnMap, row: &[String], row_number: usize) -> RentalRecord {
        let text = |column: Column| columns.cell(row, column).unwrap_or("").to_string();

        let qty_raw = columns.cell(row, Column::Quantity).unwrap_or("");
        let quantity = sheet_format::parse_quantity(qty_raw);
        if quantity == 0 && qty_raw.parse::<i64>() != Ok(0) {
            debug!(row = row_number, value = %qty_raw, "Quantity not a non-negative number, using 0");
        }

        let date = |column: Column| {
            let raw = columns.cell(row, column).unwrap_or("");
            let parsed = sheet_format::parse_date(raw, &self.date_formats);
            if parsed.is_none() && !raw.is_empty() {
                debug!(row = row_number, column = column.display_name(), value = %raw, "Unparsable date treated as absent");
            }
            parsed
        };

        let returned_raw = columns.cell(row, Column::Returned).unwrap_or("");
        // Only an explicit "not returned" keeps a rental open.
        let returned = sheet_format::parse_flag(returned_raw).unwrap_or_else(|| {
            debug!(row = row_number, value = %returned_raw, "Blank or unrecognised return status, treating rental as closed");
            true
        });

        let reference_number = match columns.cell(row, Column::ReferenceNumber) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => "-".to_string(),
        };

        RentalRecord {
            row_number,
            equipment_type: text(Column::EquipmentType),
            brand: text(Column::Brand),
            model: text(Column::Model),
            quantity,
            origin: text(Column::Origin),
            destination: text(Column::Destination),
            rental_start: date(Column::RentalStart),
            rental_end: date(Column::RentalEnd),
            returned,
            reference_number,
        }
    }
}
