use crate::core::fake::Fake;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::escape;
use crate::providers::odt_file::{manifest, ODF_NAMESPACES};
use crate::providers::package::write_package;
use crate::providers::tabular::TabularData;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

const MEDIA_TYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdsFile {
    #[serde(flatten)]
    pub table: TabularData,
}

fn table_row(cells: &[String]) -> String {
    let cells: String = cells
        .iter()
        .map(|cell| {
            format!(
                "<table:table-cell office:value-type=\"string\"><text:p>{}</text:p></table:table-cell>",
                escape(cell)
            )
        })
        .collect();
    format!("<table:table-row>{}</table:table-row>", cells)
}

impl FileProvider for OdsFile {
    fn name(&self) -> &'static str {
        "ods_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let table = self.table.table(fake)?;
        let mut rows = table_row(&table.header);
        for row in &table.rows {
            rows.push_str(&table_row(row));
        }
        let content_xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <office:document-content {}><office:body><office:spreadsheet>\
             <table:table table:name=\"Sheet1\">{}</table:table>\
             </office:spreadsheet></office:body></office:document-content>",
            ODF_NAMESPACES, rows
        );

        let bytes = write_package(
            Some(MEDIA_TYPE),
            &[
                ("META-INF/manifest.xml", manifest(MEDIA_TYPE).into_bytes()),
                ("content.xml", content_xml.into_bytes()),
            ],
        )?;
        Ok(Rendered::new(bytes, "ods", FileData::with_content(table.to_json())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_ods_rows() {
        let rendered = OdsFile::default().render(&mut Fake::seeded(2)).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(rendered.bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name("content.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        // header plus ten data rows
        assert_eq!(content.matches("<table:table-row>").count(), 11);
        assert!(rendered.data.content.unwrap().starts_with("[{\"name\":"));
    }
}
