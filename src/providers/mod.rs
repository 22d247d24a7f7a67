pub mod bin_file;
pub mod converter;
pub mod csv_file;
pub mod docx_file;
pub mod eml_file;
pub mod epub_file;
pub mod file_from_path;
pub mod generic_file;
pub mod images;
pub mod markup;
pub mod mp3;
pub mod ods_file;
pub mod odt_file;
pub mod package;
pub mod pdf;
pub mod random_file_from_dir;
pub mod rtf_file;
pub mod svg_file;
pub mod tabular;
pub mod tar_file;
pub mod txt_file;
pub mod xlsx_file;
pub mod xml_file;
pub mod zip_file;

pub use bin_file::BinFile;
pub use csv_file::CsvFile;
pub use docx_file::DocxFile;
pub use eml_file::EmlFile;
pub use epub_file::EpubFile;
pub use file_from_path::FileFromPath;
pub use generic_file::GenericFile;
pub use images::{GraphicImageFile, ImageFile};
pub use mp3::Mp3File;
pub use ods_file::OdsFile;
pub use odt_file::OdtFile;
pub use pdf::PdfFile;
pub use random_file_from_dir::RandomFileFromDir;
pub use rtf_file::RtfFile;
pub use svg_file::SvgFile;
pub use tar_file::{TarCompression, TarFile};
pub use txt_file::TxtFile;
pub use xlsx_file::XlsxFile;
pub use xml_file::XmlFile;
pub use zip_file::{ZipCompression, ZipFile};
