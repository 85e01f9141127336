mod block;
mod config;
mod error;
mod html;
mod parser;
pub mod report;
mod typst;

pub use block::{Block, Span};
pub use config::{Config, HtmlConfig, LayoutConfig, PageConfig};
pub use error::{Error, Result};
pub use html::{block_markup, blocks_to_html};
pub use parser::{format, format_inline};
pub use report::{CompareResponse, ProfileData, ProfileSummary};

use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

fn log_blocks(blocks: &[Block]) {
    let title = blocks.first().map(Block::plain_text).unwrap_or_default();
    debug!("Formatted report into {} blocks: {:?}", blocks.len(), title);
}

/// Convert a report to Typst markup using default config.
pub fn report_to_typst(text: &str) -> String {
    report_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert a report to Typst markup with custom config.
pub fn report_to_typst_with_config(text: &str, config: &Config) -> String {
    let blocks = format(text);
    log_blocks(&blocks);
    typst::blocks_to_typst(&blocks, config)
}

/// Convert a report to an HTML fragment using default config.
pub fn report_to_html(text: &str) -> String {
    report_to_html_with_config(text, &Config::compiled_default())
}

/// Convert a report to an HTML fragment with custom config.
pub fn report_to_html_with_config(text: &str, config: &Config) -> String {
    let blocks = format(text);
    log_blocks(&blocks);
    blocks_to_html(&blocks, config)
}

/// Convert a report to PDF bytes using default config.
pub fn report_to_pdf(text: &str) -> Result<Vec<u8>> {
    report_to_pdf_with_config(text, &Config::compiled_default())
}

/// Convert a report to PDF bytes with custom config.
pub fn report_to_pdf_with_config(text: &str, config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = report_to_typst_with_config(text, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;
    debug!("Compiled report into {} pages", doc.pages.len());

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
