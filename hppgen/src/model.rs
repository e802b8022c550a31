//! API description model — the read-only input of every emitter.
//!
//! Mirrors the YAML document section by section. Mappings whose order shows
//! up in the generated text are `IndexMap`s so document order is kept.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::naming;

/// `count_for` target naming the function's return value.
pub const RETURN_TARGET: &str = "return";

#[derive(Debug, Default, Deserialize)]
pub struct ApiDescription {
    /// Opaque type names re-exported verbatim.
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub enums: IndexMap<String, EnumGroup>,
    #[serde(default)]
    pub defines: IndexMap<String, i64>,
    #[serde(default)]
    pub functions: Vec<FunctionDesc>,
    #[serde(default)]
    pub hints: Hints,
    #[serde(default)]
    pub window_attribs: IndexMap<String, AttribDesc>,
    #[serde(default)]
    pub window_events: IndexMap<String, EventDesc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnumGroup {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub values: Vec<String>,
}

impl EnumGroup {
    /// `(enumerator, raw constant)` pairs in declaration order.
    pub fn enumerators(&self) -> impl Iterator<Item = (String, &str)> {
        self.values.iter().map(|raw| {
            let stripped = raw.strip_prefix(self.prefix.as_str()).unwrap_or(raw);
            let stripped = stripped.strip_suffix(self.suffix.as_str()).unwrap_or(stripped);
            (naming::enumerator_name(stripped), raw.as_str())
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct FunctionDesc {
    pub name: String,
    /// Object kind the function operates on (`window`, `monitor`); its
    /// first parameter is then the receiver handle.
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(rename = "return")]
    pub ret: ReturnDesc,
    #[serde(default)]
    pub parameters: Vec<ParamDesc>,
    /// Feature tag gating the function (`vulkan`).
    #[serde(default)]
    pub features: Option<String>,
}

impl FunctionDesc {
    /// Parameters after the receiver handle.
    pub fn marshaled_params(&self) -> &[ParamDesc] {
        match self.receiver {
            Some(_) => self.parameters.get(1..).unwrap_or_default(),
            None => &self.parameters,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnDesc {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "enum")]
    pub enum_tag: Option<String>,
}

impl ReturnDesc {
    pub fn is_void(&self) -> bool {
        self.ty == "void"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParamDesc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "enum")]
    pub enum_tag: Option<String>,
    /// Written by the call rather than read.
    #[serde(default)]
    pub out: bool,
    /// This parameter carries the length of the named buffer parameter
    /// (or of the return value, see [`RETURN_TARGET`]).
    #[serde(default)]
    pub count_for: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Hints {
    #[serde(default)]
    pub init_hint: IndexMap<String, String>,
    #[serde(default)]
    pub window_hint: IndexMap<String, String>,
}

/// Which hint table an emitter works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Init,
    Window,
}

impl HintKind {
    /// Title-cased kind as it appears in the raw setter (`glfwInitHint`).
    pub fn title(self) -> &'static str {
        match self {
            HintKind::Init => "Init",
            HintKind::Window => "Window",
        }
    }
}

impl Hints {
    pub fn table(&self, kind: HintKind) -> &IndexMap<String, String> {
        match kind {
            HintKind::Init => &self.init_hint,
            HintKind::Window => &self.window_hint,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AttribDesc {
    #[serde(default)]
    pub readonly: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventDesc {
    #[serde(default)]
    pub parameters: Vec<ParamDesc>,
}

/// Load an API description from a YAML file and validate it.
pub fn load_api(path: &Path) -> anyhow::Result<ApiDescription> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading API description {}", path.display()))?;
    let api = parse_api(&content)
        .with_context(|| format!("parsing API description {}", path.display()))?;
    api.validate()
        .with_context(|| format!("validating API description {}", path.display()))?;

    info!(
        path = %path.display(),
        types = api.types.len(),
        enums = api.enums.len(),
        defines = api.defines.len(),
        functions = api.functions.len(),
        events = api.window_events.len(),
        "loaded API description"
    );
    Ok(api)
}

pub fn parse_api(content: &str) -> Result<ApiDescription, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

impl ApiDescription {
    /// Check every cross-reference the emitters rely on, before any text is
    /// produced.
    pub fn validate(&self) -> Result<()> {
        for (group, data) in &self.enums {
            validate_enum_group(group, data)?;
        }
        for f in &self.functions {
            validate_count_relations(&f.name, f.marshaled_params(), true)?;
        }
        for (event, desc) in &self.window_events {
            validate_count_relations(event, &desc.parameters, false)?;
        }
        Ok(())
    }

    /// Warn about enum tags that name no declared enum group. They still map
    /// to an enumeration type, which the template may declare by hand.
    pub fn warn_unknown_enum_tags(&self) {
        let known: HashSet<String> = self.enums.keys().map(|k| naming::to_title_case(k)).collect();
        let tags = self
            .functions
            .iter()
            .flat_map(|f| {
                f.parameters
                    .iter()
                    .map(move |p| (f.name.as_str(), p.enum_tag.as_deref()))
                    .chain(std::iter::once((f.name.as_str(), f.ret.enum_tag.as_deref())))
            })
            .chain(self.window_events.iter().flat_map(|(name, e)| {
                e.parameters
                    .iter()
                    .map(move |p| (name.as_str(), p.enum_tag.as_deref()))
            }));
        for (owner, tag) in tags {
            let Some(tag) = tag else { continue };
            if tag != "bool" && !known.contains(&naming::to_title_case(tag)) {
                warn!(owner, tag, "enum tag names no declared enum group");
            }
        }
    }
}

fn validate_enum_group(group: &str, data: &EnumGroup) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (enumerator, raw) in data.enumerators() {
        if enumerator == "e" {
            return Err(Error::EmptyName {
                raw: raw.to_string(),
                what: "enumerator",
            });
        }
        if let Some(first) = seen.get(&enumerator) {
            return Err(Error::DuplicateEnumerator {
                group: group.to_string(),
                enumerator,
                first: first.to_string(),
                second: raw.to_string(),
            });
        }
        seen.insert(enumerator, raw);
    }
    Ok(())
}

/// A count source must precede the buffer it sizes, claim a buffer nobody
/// else claims, and be resolved before the next count source appears.
/// `return` is only a valid target for functions, and the only one an
/// output count may size. Counted buffers are always inputs.
fn validate_count_relations(owner: &str, params: &[ParamDesc], allow_return: bool) -> Result<()> {
    let fail = |reason: String| Error::InvalidCountRelation {
        owner: owner.to_string(),
        reason,
    };

    let mut claimed: HashSet<&str> = HashSet::new();
    let mut pending: Option<(&str, &str)> = None;

    for (idx, p) in params.iter().enumerate() {
        if let Some((source, target)) = pending
            && p.name == target
        {
            pending = None;
            if p.out {
                return Err(fail(format!(
                    "`{}` is an output buffer sized by `{source}`; only the return value can be a counted output",
                    p.name
                )));
            }
            if p.count_for.is_some() {
                return Err(fail(format!(
                    "`{}` is sized by `{source}` and is itself a count source",
                    p.name
                )));
            }
            continue;
        }

        let Some(target) = p.count_for.as_deref() else {
            continue;
        };
        if let Some((source, pending_target)) = pending {
            return Err(fail(format!(
                "`{}` counts `{target}` while `{source}` still waits for `{pending_target}`",
                p.name
            )));
        }
        if !claimed.insert(target) {
            return Err(fail(format!("`{target}` is claimed by more than one count source")));
        }

        if target == RETURN_TARGET {
            if !allow_return {
                return Err(fail(format!("`{}` counts a return value in a callback", p.name)));
            }
            if !p.out {
                return Err(fail(format!(
                    "`{}` sizes the return value but is not an output",
                    p.name
                )));
            }
            continue;
        }
        if p.out {
            return Err(fail(format!(
                "`{}` is an output but counts the parameter `{target}`",
                p.name
            )));
        }
        if target == p.name {
            return Err(fail(format!("`{}` counts itself", p.name)));
        }
        if params[..idx].iter().any(|q| q.name == target) {
            return Err(fail(format!("`{}` follows the buffer `{target}` it counts", p.name)));
        }
        if !params[idx + 1..].iter().any(|q| q.name == target) {
            return Err(fail(format!("`{}` counts unknown parameter `{target}`", p.name)));
        }
        pending = Some((p.name.as_str(), target));
    }
    Ok(())
}
