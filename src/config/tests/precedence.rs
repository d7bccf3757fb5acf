//! Tests for configuration layer precedence.

use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::{apply_layer, build_config_from_layers};
use crate::ShortyConfig;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"label": "default-label"})), ("file", json!({"label": "file-label"}))],
    "label",
    "file-label",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![
        ("environment", json!({"repository": "env/repo"})),
        ("cli", json!({"repository": "cli/repo"}))
    ],
    "repository",
    "cli/repo",
    "CLI should override environment"
)]
#[case::pages_branch_defaults_file_env_cli(
    vec![
        ("defaults", json!({"pages_branch": "default-pages"})),
        ("file", json!({"pages_branch": "file-pages"})),
        ("environment", json!({"pages_branch": "env-pages"})),
        ("cli", json!({"pages_branch": "cli-pages"}))
    ],
    "pages_branch",
    "cli-pages",
    "CLI should win for pages_branch"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config = ShortyConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    let actual = match field {
        "label" => Some(config.label.as_str()),
        "token" => config.token.as_deref(),
        "repository" => config.repository.as_deref(),
        "pages_branch" => Some(config.pages_branch.as_str()),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(json!({"token": null, "repository": null}));

    let config = ShortyConfig::merge_from_layers(composer.layers())
        .expect("merge should succeed with empty defaults");

    assert!(config.token.is_none(), "token should be None");
    assert!(config.repository.is_none(), "repository should be None");
    assert_eq!(config.pages_branch, "gh-pages", "pages branch default");
    assert_eq!(config.label, "shorten", "label default");
    assert_eq!(config.slug_salt, "", "slug salt default");
    assert!(!config.release, "release should default to false");
}

#[rstest]
fn full_precedence_chain() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(
        json!({"repository": "default/repo", "token": "default-token", "label": "default"}),
    );
    composer.push_file(
        json!({"repository": "file/repo", "token": "file-token", "label": "file"}),
        None,
    );
    composer.push_environment(json!({"repository": "env/repo", "label": "env"}));
    composer.push_cli(json!({"repository": "cli/repo"}));

    let config = ShortyConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    assert_eq!(
        config.repository.as_deref(),
        Some("cli/repo"),
        "CLI wins for repository"
    );
    assert_eq!(
        config.token.as_deref(),
        Some("file-token"),
        "file wins for token (no env/cli override)"
    );
    assert_eq!(config.label, "env", "environment wins for label");
}

#[rstest]
fn release_flag_layer_precedence() {
    let config = build_config_from_layers(&[
        ("defaults", json!({"release": false})),
        ("file", json!({"release": true})),
        ("cli", json!({"release": true})),
    ]);

    assert!(config.release, "CLI layer should win for release");
}

#[rstest]
fn slug_salt_from_file_reaches_settings() {
    let config = build_config_from_layers(&[("file", json!({"slug_salt": "pages"}))]);

    let settings = config
        .shorten_settings()
        .expect("settings should build");

    assert_eq!(settings.slugs.encode(42), "QN");
}
