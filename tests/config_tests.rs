use md2docx_lib::config::{self, Config, ConfigError, SourcedConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn test_load_config_file() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let config_path = temp_path.join("test_config.toml");
    let config_content = r#"
[paths]
input = "docs/report.md"
output = "out/report.docx"

[body]
font = "Arial"
size-pt = 10.5
line-spacing = 1.0

[headings]
sizes = [22.0, 18.0]

[code]
font = "Consolas"

[metadata]
title = "Quarterly Report"
author = "Ops"
"#;
    fs::write(&config_path, config_content).expect("Failed to write test config file");

    let sourced_result = SourcedConfig::load_with_discovery(Some(&config_path), false);
    assert!(
        sourced_result.is_ok(),
        "SourcedConfig loading should succeed. Error: {:?}",
        sourced_result.err()
    );
    let sourced = sourced_result.unwrap();
    assert_eq!(sourced.loaded_file.as_deref(), Some(config_path.as_path()));

    // Relative paths resolve against the config file's directory
    assert_eq!(sourced.input_path(), temp_path.join("docs/report.md"));
    assert_eq!(sourced.output_path(), temp_path.join("out/report.docx"));

    let config: Config = sourced.into();
    assert_eq!(config.body.font, "Arial");
    assert_eq!(config.body.size_pt, 10.5);
    assert_eq!(config.body.line_spacing, 1.0);
    assert_eq!(config.headings.size_for(1), 22.0);
    assert_eq!(config.headings.size_for(3), 12.0);
    assert_eq!(config.code.font, "Consolas");
    assert_eq!(config.code.size_pt, 10.0);
    assert_eq!(config.metadata.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(config.metadata.author, "Ops");
}

#[test]
fn test_load_nonexistent_config() {
    let sourced_result = SourcedConfig::load_with_discovery(Some(Path::new("nonexistent_config.toml")), false);
    assert!(sourced_result.is_err(), "Loading nonexistent config should fail");

    if let Err(err) = sourced_result {
        assert!(
            err.to_string().contains("Failed to read config file"),
            "Error message should indicate file reading failure"
        );
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.paths.input, PathBuf::from("ProjectReport.md"));
    assert_eq!(config.paths.output, PathBuf::from("ProjectReport.docx"));
    assert_eq!(config.page.height_cm, 29.7);
    assert_eq!(config.page.width_cm, 21.0);
    for margin in [
        config.page.margin_top_cm,
        config.page.margin_bottom_cm,
        config.page.margin_left_cm,
        config.page.margin_right_cm,
    ] {
        assert_eq!(margin, 2.54);
    }
    assert_eq!(config.body.font, "SimSun");
    assert_eq!(config.body.size_pt, 12.0);
    assert_eq!(config.body.line_spacing, 1.25);
    assert_eq!(config.headings.sizes, vec![20.0, 16.0, 14.0, 12.0]);
    assert_eq!(config.code.font, "Courier New");
    assert_eq!(config.code.size_pt, 10.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_discovery_prefers_dotfile() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join(".md2docx.toml"), "[body]\nsize-pt = 9.0\n").unwrap();
    fs::write(temp_dir.path().join("md2docx.toml"), "[body]\nsize-pt = 14.0\n").unwrap();

    let sourced = SourcedConfig::load_with_discovery_in(None, false, temp_dir.path()).unwrap();
    assert_eq!(sourced.config.body.size_pt, 9.0);
    assert_eq!(sourced.loaded_file, Some(temp_dir.path().join(".md2docx.toml")));
}

#[test]
fn test_no_config_skips_discovery() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join(".md2docx.toml"), "[body]\nsize-pt = 9.0\n").unwrap();

    let sourced = SourcedConfig::load_with_discovery_in(None, true, temp_dir.path()).unwrap();
    assert!(sourced.loaded_file.is_none());
    assert_eq!(sourced.config, Config::default());
    assert_eq!(sourced.input_path(), temp_dir.path().join("ProjectReport.md"));
}

#[test]
fn test_absolute_paths_are_kept() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let absolute = temp_dir.path().join("elsewhere.md");
    let content = format!("[paths]\ninput = {:?}\n", absolute.to_str().unwrap());
    fs::write(temp_dir.path().join("md2docx.toml"), content).unwrap();

    let sourced = SourcedConfig::load_with_discovery_in(None, false, temp_dir.path()).unwrap();
    assert_eq!(sourced.input_path(), absolute);
}

#[test]
fn test_unknown_keys_are_rejected() {
    let err = Config::from_toml_str("[body]\nfont-size = 12\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)), "got {err:?}");

    let err = Config::from_toml_str("[tables]\nstyle = \"Grid\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)), "got {err:?}");
}

#[test]
fn test_invalid_values_are_rejected() {
    for content in [
        "[body]\nsize-pt = 0.0\n",
        "[body]\nline-spacing = -1.0\n",
        "[body]\nfont = \"  \"\n",
        "[code]\nsize-pt = 0.0\n",
        "[headings]\nsizes = [20.0, 0.0]\n",
        "[page]\nmargin-top-cm = -1.0\n",
        "[page]\nmargin-top-cm = 15.0\nmargin-bottom-cm = 15.0\n",
        "[paths]\ninput = \"\"\n",
    ] {
        let result = Config::from_toml_str(content);
        assert!(
            matches!(result, Err(ConfigError::Invalid(_))),
            "expected invalid config for {content:?}, got {result:?}"
        );
    }
}

#[test]
fn test_create_default_config() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let config_path = temp_dir.path().join(".md2docx.toml");

    let result = config::create_default_config(&config_path);
    assert!(result.is_ok(), "Creating default config should succeed: {:?}", result.err());
    assert!(config_path.exists(), "Default config file should exist in temp dir");

    // The template must describe exactly the built-in defaults
    let loaded = Config::load(&config_path).expect("Default config should load");
    assert_eq!(loaded, Config::default());

    let again = config::create_default_config(&config_path);
    assert!(matches!(again, Err(ConfigError::FileExists { .. })));
}
