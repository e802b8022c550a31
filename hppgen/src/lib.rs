//! hppgen — C API description → typed C++ wrapper regions.
//!
//! Reads a YAML description of a C library (types, enums, functions, hints,
//! window attributes and events) and regenerates the marker regions of a
//! hand-written C++ header template: enum classes, re-exports, hint
//! structs, attribute accessors, event trampolines and method wrappers.
//!
//! # Quick start
//!
//! Regenerate the header named by a config (suitable for `build.rs`):
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Reads config TOML, loads the API description, rewrites the header.
//! hppgen::run(Path::new("hppgen.toml"), None).unwrap();
//! ```
//!
//! Or transform in memory:
//!
//! ```
//! use hppgen::config::Conventions;
//! use hppgen::model::parse_api;
//!
//! let api = parse_api("enums: { action: { prefix: GLFW_, values: [GLFW_PRESS] } }").unwrap();
//! let out = hppgen::generate(&api, "// !generate_enums\n", &Conventions::default()).unwrap();
//! assert!(out.contains("ePress = GLFW_PRESS,"));
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

pub mod config;
pub mod emit;
pub mod error;
pub mod model;
pub mod naming;
pub mod params;
pub mod template;
pub mod typemap;
pub mod writer;

pub use error::Error;

/// Result of a [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The file that was (or would have been) written.
    pub path: PathBuf,
    /// Whether the content differed from what was already on disk.
    pub changed: bool,
}

/// Run the full pipeline: load config and API description, regenerate the
/// template, and write the output file if its content changed.
///
/// `config_path` is the path to a `hppgen.toml` configuration file.
/// `output` optionally overrides the output file path from the config.
///
/// Nothing is written unless the whole template was generated successfully.
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<Outcome> {
    let (generated, default_output) = render(config_path)?;
    let path = output.map(Path::to_path_buf).unwrap_or(default_output);

    let changed = read_existing(&path)?.as_deref() != Some(generated.as_str());
    if changed {
        std::fs::write(&path, &generated)
            .with_context(|| format!("writing output to {}", path.display()))?;
        info!(path = %path.display(), size = generated.len(), "wrote generated header");
    } else {
        info!(path = %path.display(), "generated header already up to date");
    }

    Ok(Outcome { path, changed })
}

/// Regenerate in memory and report whether the configured output file
/// already holds exactly that text.
pub fn check(config_path: &Path, output: Option<&Path>) -> Result<Outcome> {
    let (generated, default_output) = render(config_path)?;
    let path = output.map(Path::to_path_buf).unwrap_or(default_output);
    let changed = read_existing(&path)?.as_deref() != Some(generated.as_str());
    info!(path = %path.display(), up_to_date = !changed, "checked generated header");
    Ok(Outcome { path, changed })
}

/// Regenerate every marker region of `template` from `api`.
///
/// Pure: no I/O. The description is validated first.
pub fn generate(
    api: &model::ApiDescription,
    template: &str,
    conventions: &config::Conventions,
) -> Result<String, Error> {
    api.validate()?;
    let emitter = emit::Emitter::new(api, conventions);
    template::process(template, &emitter)
}

/// Load everything a config points at and produce the new header text plus
/// the configured output path.
fn render(config_path: &Path) -> Result<(String, PathBuf)> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let api_path = config::resolve_path(&cfg.api, base_dir);
    let template_path = config::resolve_path(&cfg.template, base_dir);
    info!(
        api = %api_path.display(),
        template = %template_path.display(),
        "loaded configuration"
    );

    let api = model::load_api(&api_path)?;
    api.warn_unknown_enum_tags();

    let template = std::fs::read_to_string(&template_path)
        .with_context(|| format!("reading template {}", template_path.display()))?;
    let generated = generate(&api, &template, &cfg.conventions)
        .with_context(|| format!("generating from template {}", template_path.display()))?;

    Ok((generated, cfg.output_path(base_dir)))
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading existing output {}", path.display())),
    }
}
