//! Configuration types for `hppgen.toml`.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// API description (YAML).
    pub api: PathBuf,
    /// Template header containing the marker commands.
    pub template: PathBuf,
    /// Where to write the result. Defaults to the template itself, which
    /// is regenerated in place.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub conventions: Conventions,
}

impl Config {
    /// Output path resolved against `base_dir`, falling back to the template.
    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        resolve_path(self.output.as_ref().unwrap_or(&self.template), base_dir)
    }
}

/// Naming and spelling conventions of the wrapped library and of the
/// hand-written template around the generated regions.
///
/// Every field defaults to the GLFW / glfw-hpp spelling, so an absent
/// `[conventions]` table targets that library.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Prefix that turns a template line into a marker command.
    pub marker_prefix: String,
    /// Type-name prefix of library handles (`GLFWwindow*`).
    pub handle_prefix: String,
    /// Function-name prefix (`glfwGetWindowPos`).
    pub function_prefix: String,
    /// Constant-name prefix stripped from hint and attribute names.
    pub define_prefix: String,
    pub true_literal: String,
    pub false_literal: String,
    pub export_macro: String,
    pub nodiscard_macro: String,
    /// Nullary error-check primitive called after every raw call.
    pub error_check: String,
    /// Typed helper resolving a raw window handle to its peer object.
    pub peer_lookup: String,
    /// Member function returning (and lazily creating) the window's peer.
    pub peer_accessor: String,
    /// Feature tag → preprocessor guard for conditionally exported functions.
    pub feature_guards: IndexMap<String, String>,
    pub skipped_enums: Vec<String>,
    pub skipped_methods: Vec<String>,
    pub skipped_trampolines: Vec<String>,
    /// One indentation level.
    pub indent: String,
}

impl Default for Conventions {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            marker_prefix: "// !".into(),
            handle_prefix: "GLFW".into(),
            function_prefix: "glfw".into(),
            define_prefix: "GLFW_".into(),
            true_literal: "GLFW_TRUE".into(),
            false_literal: "GLFW_FALSE".into(),
            export_macro: "GLFW_HPP_EXPORT".into(),
            nodiscard_macro: "GLFW_HPP_NODISCARD".into(),
            error_check: "checkError".into(),
            peer_lookup: "WindowPeer::fromHandle".into(),
            peer_accessor: "getPeer".into(),
            feature_guards: IndexMap::from([("vulkan".to_string(), "VK_VERSION_1_0".to_string())]),
            skipped_enums: strings(&["const", "joystick"]),
            skipped_methods: strings(&[
                "glfwDestroyWindow",
                "glfwSetGammaRamp",
                "glfwGetGammaRamp",
                "glfwSetCursor",
            ]),
            skipped_trampolines: strings(&["Drop"]),
            indent: "    ".into(),
        }
    }
}

/// Resolve a config-relative path. Absolute paths are returned as-is.
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Load and parse a `hppgen.toml` configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    parse_config(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_glfw_conventions() {
        let cfg = parse_config("api = \"api.yaml\"\ntemplate = \"glfw.hpp\"\n").unwrap();
        assert_eq!(cfg.conventions.marker_prefix, "// !");
        assert_eq!(cfg.conventions.feature_guards["vulkan"], "VK_VERSION_1_0");
        assert_eq!(
            cfg.output_path(Path::new("/work")),
            PathBuf::from("/work/glfw.hpp")
        );
    }

    #[test]
    fn partial_conventions_keep_other_defaults() {
        let cfg = parse_config(
            r#"
            api = "api.yaml"
            template = "in.hpp"
            output = "/tmp/out.hpp"

            [conventions]
            error_check = "throwIfFailed"
            skipped_enums = []
            "#,
        )
        .unwrap();
        assert_eq!(cfg.conventions.error_check, "throwIfFailed");
        assert!(cfg.conventions.skipped_enums.is_empty());
        assert_eq!(cfg.conventions.true_literal, "GLFW_TRUE");
        assert_eq!(
            cfg.output_path(Path::new("/work")),
            PathBuf::from("/tmp/out.hpp")
        );
    }
}
