//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::ShortyConfig;

/// Variables GitHub Actions sets that the resolvers fall back to.
pub const ACTIONS_VARIABLES: [&str; 8] = [
    "GITHUB_TOKEN",
    "INPUT_TOKEN",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
    "GITHUB_EVENT_NAME",
    "GITHUB_EVENT_PATH",
    "GITHUB_REF",
    "GITHUB_SHA",
];

/// Locks the environment with every Actions variable cleared, then applies
/// `overrides`.
#[must_use]
pub fn lock_actions_env(overrides: &[(&'static str, &'static str)]) -> impl Sized + use<> {
    let cleared = ACTIONS_VARIABLES.iter().map(|name| {
        let value = overrides
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value);
        (*name, value)
    });
    env_lock::lock_env(cleared)
}

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`ShortyConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> ShortyConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    ShortyConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
