//! TOML round-trip and override tests for the public config surface

use wikirefs_config::{CssNames, WikiRefsConfig};

#[test]
fn test_empty_toml_is_all_defaults() {
    let config = WikiRefsConfig::from_toml_str("").expect("empty config should parse");
    assert_eq!(config, WikiRefsConfig::default());
}

#[test]
fn test_css_overrides() {
    let toml_str = r#"
[css]
wiki = "wikiref"
type = "typed"
attrbox_title = "box-heading"
"#;

    let config = WikiRefsConfig::from_toml_str(toml_str).expect("Failed to parse css overrides");
    assert_eq!(config.css.wiki, "wikiref");
    assert_eq!(config.css.type_, "typed");
    assert_eq!(config.css.attrbox_title, "box-heading");
    // untouched names keep their defaults
    assert_eq!(config.css.invalid, CssNames::default().invalid);
}

#[test]
fn test_serialization_round_trip() {
    let mut config = WikiRefsConfig::default().with_base_url("/wiki");
    config.attrs.title = "Properties".to_string();
    config.embeds.error_content = "Missing '{target}'".to_string();

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize config");
    let deserialized = WikiRefsConfig::from_toml_str(&toml_str).expect("Failed to deserialize");

    assert_eq!(config, deserialized);
    assert_eq!(deserialized.embeds.error_message("x"), "Missing 'x'");
}

#[test]
fn test_feature_flags() {
    let toml_str = r#"
[attrs]
enable = false

[links]
enable = false

[embeds]
enable = true
title = "Transclusion"
"#;

    let config = WikiRefsConfig::from_toml_str(toml_str).unwrap();
    assert!(!config.attrs.enable);
    assert!(!config.links.enable);
    assert!(config.embeds.enable);
    assert_eq!(config.embeds.title.as_deref(), Some("Transclusion"));
}

#[test]
fn test_invalid_class_name_fails_load() {
    let result = WikiRefsConfig::from_toml_str("[css]\nembed_media = \"embed media\"\n");
    assert!(result.is_err());
}
