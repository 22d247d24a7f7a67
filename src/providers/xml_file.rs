use crate::core::fake::Fake;
use crate::core::template::render;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::{escape, is_valid_element_name};
use crate::providers::tabular::DEFAULT_NUM_ROWS;
use crate::utils::error::{FakeFileError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// XML document of `num_rows` `<row_element>` children under `<root_element>`.
///
/// `content` replaces the generated document with a rendered literal template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlFile {
    pub root_element: String,
    pub row_element: String,
    pub data_columns: IndexMap<String, String>,
    pub num_rows: usize,
    pub content: Option<String>,
    pub encoding: String,
}

impl Default for XmlFile {
    fn default() -> Self {
        let mut data_columns = IndexMap::new();
        data_columns.insert("name".to_string(), "{{name}}".to_string());
        data_columns.insert("address".to_string(), "{{address}}".to_string());
        Self {
            root_element: "root".to_string(),
            row_element: "row".to_string(),
            data_columns,
            num_rows: DEFAULT_NUM_ROWS,
            content: None,
            encoding: "utf-8".to_string(),
        }
    }
}

fn check_element(option: &str, name: &str) -> Result<()> {
    if is_valid_element_name(name) {
        Ok(())
    } else {
        Err(FakeFileError::invalid_option(
            option,
            format!("'{}' is not a valid XML element name", name),
        ))
    }
}

impl XmlFile {
    fn document(&self, fake: &mut Fake) -> Result<String> {
        check_element("root_element", &self.root_element)?;
        check_element("row_element", &self.row_element)?;
        for column in self.data_columns.keys() {
            check_element("data_columns", column)?;
        }

        let mut xml = format!(
            "<?xml version=\"1.0\" encoding=\"{}\"?>\n<{}>\n",
            self.encoding, self.root_element
        );
        for _ in 0..self.num_rows {
            let _ = writeln!(xml, "  <{}>", self.row_element);
            for (column, template) in &self.data_columns {
                let value = render(fake, template)?;
                let _ = writeln!(xml, "    <{0}>{1}</{0}>", column, escape(&value));
            }
            let _ = writeln!(xml, "  </{}>", self.row_element);
        }
        let _ = writeln!(xml, "</{}>", self.root_element);
        Ok(xml)
    }
}

impl FileProvider for XmlFile {
    fn name(&self) -> &'static str {
        "xml_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let xml = match &self.content {
            Some(template) => render(fake, template)?,
            None => self.document(fake)?,
        };
        Ok(Rendered::new(
            xml.clone().into_bytes(),
            "xml",
            FileData::with_content(xml),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document() {
        let rendered = XmlFile::default().render(&mut Fake::seeded(1)).unwrap();
        let xml = String::from_utf8(rendered.bytes).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert_eq!(xml.matches("<row>").count(), DEFAULT_NUM_ROWS);
        assert_eq!(xml.matches("<name>").count(), DEFAULT_NUM_ROWS);
        assert!(xml.trim_end().ends_with("</root>"));
    }

    #[test]
    fn test_custom_elements() {
        let mut data_columns = IndexMap::new();
        data_columns.insert("title".to_string(), "{{sentence}}".to_string());
        let provider = XmlFile {
            root_element: "books".to_string(),
            row_element: "book".to_string(),
            data_columns,
            num_rows: 3,
            ..XmlFile::default()
        };
        let xml = String::from_utf8(provider.render(&mut Fake::seeded(1)).unwrap().bytes).unwrap();
        assert_eq!(xml.matches("<book>").count(), 3);
        assert_eq!(xml.matches("<title>").count(), 3);
    }

    #[test]
    fn test_invalid_element_name() {
        let provider = XmlFile {
            root_element: "1root".to_string(),
            ..XmlFile::default()
        };
        assert!(matches!(
            provider.render(&mut Fake::seeded(1)),
            Err(FakeFileError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_literal_template() {
        let provider = XmlFile {
            content: Some("<doc>{{word}}</doc>".to_string()),
            ..XmlFile::default()
        };
        let xml = String::from_utf8(provider.render(&mut Fake::seeded(1)).unwrap().bytes).unwrap();
        assert!(xml.starts_with("<doc>") && xml.ends_with("</doc>"));
    }
}
