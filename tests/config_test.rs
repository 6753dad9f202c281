//! Integration tests for Settings loading with layered merge semantics.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise local config merging on top of the compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use flakegen::config::{local_config_path, Settings};
use flakegen::domain::Scaling;

#[test]
fn given_no_local_config_when_load_then_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.width, 150.0);
    assert_eq!(settings.height, 150.0);
    assert_eq!(settings.count, 1);
    assert_eq!(settings.scaling, Scaling::FitToCanvas);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r##"
width = 300
count = 30
seed = 7
scaling = "proportional"

[render]
stroke = "#c0ffee"
"##,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.width, 300.0);
    assert_eq!(settings.height, 150.0, "unset keys keep defaults");
    assert_eq!(settings.count, 30);
    assert_eq!(settings.seed, Some(7));
    assert_eq!(settings.scaling, Scaling::Proportional);
    assert_eq!(settings.render.stroke, "#c0ffee");
    assert_eq!(settings.render.line_width, 3.0);
}

#[test]
fn given_local_config_with_zero_width_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "width = 0\n").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(result.is_err());
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "width = [\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains(".flakegen.toml"));
}

#[test]
fn given_output_dir_with_tilde_when_from_file_then_expanded() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "output_dir = \"~/flakes\"\n").unwrap();

    // Act
    let settings = Settings::from_file(&path).unwrap();

    // Assert
    assert_ne!(settings.output_dir, PathBuf::from("~/flakes"));
    assert!(settings.output_dir.ends_with("flakes"));
}
