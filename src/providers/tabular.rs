use crate::core::fake::Fake;
use crate::core::template::render;
use crate::utils::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_ROWS: usize = 10;

/// Row data for spreadsheet-like providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularData {
    /// Column header -> cell template.
    pub data_columns: IndexMap<String, String>,
    pub num_rows: usize,
    /// Literal rows; when set, `data_columns` and `num_rows` are ignored.
    pub content: Option<Vec<IndexMap<String, String>>>,
}

impl Default for TabularData {
    fn default() -> Self {
        let mut data_columns = IndexMap::new();
        data_columns.insert("name".to_string(), "{{name}}".to_string());
        data_columns.insert("residency".to_string(), "{{address}}".to_string());
        Self {
            data_columns,
            num_rows: DEFAULT_NUM_ROWS,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Rows as a JSON list of objects, used as provenance content.
    pub fn to_json(&self) -> String {
        let records: Vec<IndexMap<&str, &str>> = self
            .rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect();
        serde_json::to_string(&records).unwrap_or_default()
    }
}

impl TabularData {
    pub fn table(&self, fake: &mut Fake) -> Result<Table> {
        if let Some(content) = &self.content {
            let mut header: Vec<String> = Vec::new();
            for record in content {
                for key in record.keys() {
                    if !header.contains(key) {
                        header.push(key.clone());
                    }
                }
            }
            let rows = content
                .iter()
                .map(|record| {
                    header
                        .iter()
                        .map(|h| record.get(h).cloned().unwrap_or_default())
                        .collect()
                })
                .collect();
            return Ok(Table { header, rows });
        }

        let header: Vec<String> = self.data_columns.keys().cloned().collect();
        let mut rows = Vec::with_capacity(self.num_rows);
        for _ in 0..self.num_rows {
            let mut row = Vec::with_capacity(header.len());
            for template in self.data_columns.values() {
                row.push(render(fake, template)?);
            }
            rows.push(row);
        }
        Ok(Table { header, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let mut fake = Fake::seeded(4);
        let table = TabularData::default().table(&mut fake).unwrap();
        assert_eq!(table.header, vec!["name", "residency"]);
        assert_eq!(table.rows.len(), DEFAULT_NUM_ROWS);
        assert!(table.rows.iter().all(|r| r.len() == 2 && !r[0].is_empty()));
    }

    #[test]
    fn test_literal_content_merges_headers() {
        let mut first = IndexMap::new();
        first.insert("a".to_string(), "1".to_string());
        let mut second = IndexMap::new();
        second.insert("b".to_string(), "2".to_string());

        let data = TabularData {
            content: Some(vec![first, second]),
            ..TabularData::default()
        };
        let table = data.table(&mut Fake::seeded(1)).unwrap();
        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", ""], vec!["", "2"]]);
        assert_eq!(table.to_json(), r#"[{"a":"1","b":""},{"a":"","b":"2"}]"#);
    }
}
