use crate::core::fake::Fake;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::escape;
use crate::providers::package::write_package;
use crate::providers::tabular::TabularData;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XlsxFile {
    #[serde(flatten)]
    pub table: TabularData,
}

/// Spreadsheet column letters: 0 -> A, 25 -> Z, 26 -> AA.
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

fn sheet_row(row_number: usize, cells: &[String]) -> String {
    let cells: String = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                column_name(i),
                row_number,
                escape(cell)
            )
        })
        .collect();
    format!("<row r=\"{}\">{}</row>", row_number, cells)
}

impl FileProvider for XlsxFile {
    fn name(&self) -> &'static str {
        "xlsx_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let table = self.table.table(fake)?;
        let mut rows = sheet_row(1, &table.header);
        for (i, row) in table.rows.iter().enumerate() {
            rows.push_str(&sheet_row(i + 2, row));
        }
        let sheet = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\"><sheetData>{}</sheetData></worksheet>",
            rows
        );

        let bytes = write_package(
            None,
            &[
                ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
                ("_rels/.rels", ROOT_RELS.as_bytes().to_vec()),
                ("xl/workbook.xml", WORKBOOK.as_bytes().to_vec()),
                ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes().to_vec()),
                ("xl/worksheets/sheet1.xml", sheet.into_bytes()),
            ],
        )?;
        Ok(Rendered::new(bytes, "xlsx", FileData::with_content(table.to_json())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_sheet_contents() {
        let rendered = XlsxFile::default().render(&mut Fake::seeded(3)).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(rendered.bytes)).unwrap();
        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains("<c r=\"A1\" t=\"inlineStr\"><is><t>name</t></is></c>"));
        assert!(sheet.contains("<row r=\"11\">"));
    }
}
