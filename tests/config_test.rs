use std::fs;

use compare_report::{Config, report_to_html_with_config, report_to_typst_with_config};
use tempfile::TempDir;

#[test]
fn load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compare-report.toml");
    fs::write(
        &path,
        "[page]\nnumbers = true\n\n[html]\nwrapper_class = \"report\"\n",
    )
    .unwrap();

    let config = Config::load(&path);
    assert!(config.page.numbers);
    assert_eq!(config.page.paper, None);
    assert_eq!(config.layout.list_keep_together, 5);

    let typst = report_to_typst_with_config("text", &config);
    assert!(typst.starts_with("#set page(numbering: \"1\")\n"));

    let html = report_to_html_with_config("text", &config);
    assert_eq!(
        html,
        r#"<div class="report"><p class="mb-2 text-gray-600"><span>text</span></p></div>"#
    );
}

#[test]
fn invalid_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[page\nnumbers = ").unwrap();

    let config = Config::load(&path);
    assert_eq!(config.page.paper.as_deref(), Some("a4"));
    assert!(!config.page.numbers);
}
