use crate::core::fake::Fake;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::tabular::TabularData;
use crate::utils::error::{FakeFileError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFile {
    #[serde(flatten)]
    pub table: TabularData,
    /// Prepends a 1-based `id` column.
    pub include_row_ids: bool,
    pub delimiter: char,
}

impl Default for CsvFile {
    fn default() -> Self {
        Self {
            table: TabularData::default(),
            include_row_ids: false,
            delimiter: ',',
        }
    }
}

impl FileProvider for CsvFile {
    fn name(&self) -> &'static str {
        "csv_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| FakeFileError::invalid_option("delimiter", "must be a single ASCII character"))?;

        let table = self.table.table(fake)?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        if self.include_row_ids {
            writer.write_record(std::iter::once("id").chain(table.header.iter().map(String::as_str)))?;
            for (i, row) in table.rows.iter().enumerate() {
                let id = (i + 1).to_string();
                writer.write_record(std::iter::once(id.as_str()).chain(row.iter().map(String::as_str)))?;
            }
        } else {
            writer.write_record(&table.header)?;
            for row in &table.rows {
                writer.write_record(row)?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FakeFileError::IoError(e.into_error()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Rendered::new(bytes, "csv", FileData::with_content(content)))
    }
}
