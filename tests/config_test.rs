//! Integration tests for Settings loaded from TOML files.
//!
//! These tests use explicit files in temp directories; environment variable
//! overrides are covered by the unit tests with an injected source. The one
//! test of `Settings::load` points `XDG_CONFIG_HOME` at a temp directory, and
//! no other test here reads the global layer.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use boxtree::config::Settings;
use boxtree::util::testing;
use boxtree::{Glyphs, Printer, Style, Tree, TreeError};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn given_style_file_when_loading_then_ascii_glyphs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boxtree.toml");
    fs::write(&path, "style = \"ascii\"\n").unwrap();

    let settings = Settings::from_file(&path).expect("load settings");

    assert_eq!(settings.style, Style::Ascii);
    assert_eq!(settings.glyphs(), Glyphs::ascii());
}

#[test]
fn given_glyph_overrides_when_printing_then_overrides_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boxtree.toml");
    fs::write(
        &path,
        r#"
style = "ascii"

[glyphs]
middle = "+-- "
last = "\\-- "
"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).expect("load settings");
    let mut tree = Tree::new("root");
    tree.add("a").add("b");
    tree.add("c");

    let out = Printer::from_settings(&settings).print(&tree);
    assert_eq!(out, "root\n+-- a\n|   \\-- b\n\\-- c\n");
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boxtree.toml");
    fs::write(&path, "style = [unterminated").unwrap();

    let result = Settings::from_file(&path);
    assert!(matches!(result, Err(TreeError::Config { .. })));
}

#[rstest]
#[case("ASCII", Style::Ascii)]
#[case("Unicode", Style::Unicode)]
#[case(" ascii ", Style::Ascii)]
fn given_style_in_any_case_when_loading_then_parsed(#[case] value: &str, #[case] expected: Style) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boxtree.toml");
    fs::write(&path, format!("style = \"{value}\"\n")).unwrap();

    let settings = Settings::from_file(&path).expect("load settings");
    assert_eq!(settings.style, expected);
}

#[test]
fn given_unknown_style_when_loading_then_invalid_style_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boxtree.toml");
    fs::write(&path, "style = \"fancy\"\n").unwrap();

    let result = Settings::from_file(&path);
    assert!(matches!(result, Err(TreeError::InvalidStyle(ref s)) if s == "fancy"));
}

#[test]
fn given_missing_file_when_loading_then_config_error_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Settings::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn given_settings_when_serialized_then_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boxtree.toml");
    let mut settings = Settings {
        style: Style::Ascii,
        ..Default::default()
    };
    settings.glyphs.blank = Some("....".into());

    fs::write(&path, settings.to_toml().expect("serialize")).unwrap();

    assert_eq!(Settings::from_file(&path).expect("reload"), settings);
}

// ============================================================
// Settings::load() layered precedence
// ============================================================

/// Defaults < global < local, and a missing local file is skipped.
///
/// Kept in a single test: `XDG_CONFIG_HOME` is process-wide.
#[cfg(target_os = "linux")]
#[test]
fn given_global_and_local_config_when_load_then_local_wins_over_global() {
    let xdg = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", xdg.path());
    for var in [
        "BOXTREE_STYLE",
        "BOXTREE_GLYPHS__MIDDLE",
        "BOXTREE_GLYPHS__LAST",
        "BOXTREE_GLYPHS__VERTICAL",
        "BOXTREE_GLYPHS__BLANK",
    ] {
        std::env::remove_var(var);
    }

    let project = TempDir::new().unwrap();
    let local = project.path().join("boxtree.toml");
    let missing = project.path().join("absent.toml");

    // No global file, missing local file: compiled defaults
    let settings = Settings::load(Some(&missing)).expect("load defaults");
    assert_eq!(settings, Settings::default());

    // Local file overrides defaults
    fs::write(&local, "style = \"ascii\"\n").unwrap();
    let settings = Settings::load(Some(&local)).expect("load local");
    assert_eq!(settings.style, Style::Ascii);
    fs::remove_file(&local).unwrap();

    // Global file overrides defaults
    let global_dir = xdg.path().join("boxtree");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("boxtree.toml"),
        "style = \"ascii\"\n[glyphs]\nmiddle = \"+-- \"\nlast = \"\\\\-- \"\n",
    )
    .unwrap();
    let settings = Settings::load(None).expect("load global");
    assert_eq!(settings.style, Style::Ascii);
    assert_eq!(settings.glyphs.middle.as_deref(), Some("+-- "));

    // Local file layers over global, field by field
    fs::write(&local, "style = \"unicode\"\n[glyphs]\nmiddle = \"*-- \"\n").unwrap();
    let settings = Settings::load(Some(&local)).expect("load global and local");
    assert_eq!(settings.style, Style::Unicode);
    assert_eq!(settings.glyphs.middle.as_deref(), Some("*-- "));
    assert_eq!(settings.glyphs.last.as_deref(), Some("\\-- "));

    // Missing local file leaves the global layer in effect
    let settings = Settings::load(Some(&missing)).expect("load global only");
    assert_eq!(settings.style, Style::Ascii);
}
