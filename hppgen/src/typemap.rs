//! Type mapping — raw C parameter/return spelling → wrapper type plus the
//! conversion expressions in both directions.
//!
//! Shapes are recognized by an ordered rule table; the first rule whose
//! matcher accepts the type wins. Counted buffers are handled outside the
//! table: the element type goes through the rules and the result is wrapped
//! in a sized view.

use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::naming;

/// Stands for the bound name inside an [`Expr`].
const PLACEHOLDER: &str = "$";

/// A conversion expression with a hole for the value being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr(String);

impl Expr {
    pub fn identity() -> Self {
        Expr(PLACEHOLDER.to_string())
    }

    /// Build from a template; `$` marks the converted value. A template
    /// without `$` ignores the bound name.
    pub fn template(text: impl Into<String>) -> Self {
        Expr(text.into())
    }

    pub fn bind(&self, name: &str) -> String {
        self.0.replace(PLACEHOLDER, name)
    }
}

/// Raw type description handed to [`map_type`].
#[derive(Debug, Clone, Copy)]
pub struct RawType<'a> {
    pub ty: &'a str,
    pub enum_tag: Option<&'a str>,
    /// Name of the value holding the element count when this is a counted
    /// buffer.
    pub counted_by: Option<&'a str>,
}

impl<'a> RawType<'a> {
    pub fn new(ty: &'a str, enum_tag: Option<&'a str>) -> Self {
        Self {
            ty,
            enum_tag,
            counted_by: None,
        }
    }

    pub fn counted_by(mut self, count: Option<&'a str>) -> Self {
        self.counted_by = count;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub wrapper: String,
    /// raw → wrapper
    pub forward: Expr,
    /// wrapper → raw
    pub backward: Expr,
}

struct Rule {
    name: &'static str,
    matches: fn(&str, Option<&str>, &Conventions) -> bool,
    map: fn(&str, Option<&str>, &Conventions) -> Mapping,
}

const RULES: &[Rule] = &[
    Rule {
        name: "handle",
        matches: is_handle,
        map: map_handle,
    },
    Rule {
        name: "bool",
        matches: |_, tag, _| tag == Some("bool"),
        map: map_bool,
    },
    Rule {
        name: "enum",
        matches: |_, tag, _| tag.is_some(),
        map: map_enum,
    },
    Rule {
        name: "c-string",
        matches: |ty, _, _| ty == "const char*",
        map: map_c_string,
    },
    Rule {
        name: "passthrough",
        matches: |ty, _, _| is_type_spelling(ty),
        map: |ty, _, _| Mapping {
            wrapper: ty.to_string(),
            forward: Expr::identity(),
            backward: Expr::identity(),
        },
    },
];

/// Map a raw type. `context` names the declaration for error reporting.
pub fn map_type(raw: RawType<'_>, conv: &Conventions, context: &str) -> Result<Mapping> {
    let ty = match raw.counted_by {
        Some(_) => raw.ty.strip_suffix('*').unwrap_or(raw.ty),
        None => raw.ty,
    };

    let rule = RULES
        .iter()
        .find(|rule| (rule.matches)(ty, raw.enum_tag, conv))
        .ok_or_else(|| Error::UnsupportedType {
            ty: raw.ty.to_string(),
            context: context.to_string(),
        })?;
    tracing::trace!(context, ty, rule = rule.name, counted = raw.counted_by.is_some(), "mapped type");
    let element = (rule.map)(ty, raw.enum_tag, conv);

    Ok(match raw.counted_by {
        Some(count) => counted_view(element, count),
        None => element,
    })
}

/// Wrap an element mapping in a read-only sized view.
fn counted_view(element: Mapping, count: &str) -> Mapping {
    let element_ty = if element.wrapper.starts_with("const") {
        element.wrapper
    } else {
        format!("const {}", element.wrapper)
    };
    let wrapper = format!("std::span<{element_ty}>");
    let forward = Expr::template(format!(
        "{wrapper}{{ {}, static_cast<std::size_t>({count}) }}",
        element.forward.0
    ));
    Mapping {
        wrapper,
        forward,
        backward: Expr::template(format!("{PLACEHOLDER}.data()")),
    }
}

/// `GLFWmonitor*` → `monitor`: a prefixed identifier behind exactly one
/// pointer level.
fn handle_ident<'t>(ty: &'t str, conv: &Conventions) -> Option<&'t str> {
    let ident = ty
        .strip_prefix(conv.handle_prefix.as_str())?
        .strip_suffix('*')?
        .trim_end();
    let valid = !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(ident)
}

fn is_handle(ty: &str, _: Option<&str>, conv: &Conventions) -> bool {
    handle_ident(ty, conv).is_some()
}

fn map_handle(ty: &str, _: Option<&str>, conv: &Conventions) -> Mapping {
    let wrapper = naming::title_word(handle_ident(ty, conv).unwrap_or(ty));
    Mapping {
        forward: Expr::template(format!("{wrapper}{{{PLACEHOLDER}}}")),
        backward: Expr::template(format!("{PLACEHOLDER}.handle()")),
        wrapper,
    }
}

fn map_bool(_: &str, _: Option<&str>, conv: &Conventions) -> Mapping {
    Mapping {
        wrapper: "bool".to_string(),
        forward: Expr::template(format!("{PLACEHOLDER} == {}", conv.true_literal)),
        backward: Expr::template(format!(
            "{PLACEHOLDER} ? {} : {}",
            conv.true_literal, conv.false_literal
        )),
    }
}

fn map_enum(_: &str, tag: Option<&str>, _: &Conventions) -> Mapping {
    let wrapper = naming::to_title_case(tag.unwrap_or_default());
    Mapping {
        forward: Expr::template(format!("static_cast<{wrapper}>({PLACEHOLDER})")),
        backward: Expr::template(format!("static_cast<int>({PLACEHOLDER})")),
        wrapper,
    }
}

fn map_c_string(_: &str, _: Option<&str>, _: &Conventions) -> Mapping {
    Mapping {
        wrapper: "std::string_view".to_string(),
        forward: Expr::template(format!("std::string_view{{{PLACEHOLDER}}}")),
        backward: Expr::template(format!("std::string{{{PLACEHOLDER}}}.c_str()")),
    }
}

/// A plain C type spelling: identifiers, qualifiers, pointers.
fn is_type_spelling(ty: &str) -> bool {
    ty.chars().any(|c| c.is_ascii_alphabetic())
        && ty
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '*' | ':'))
}
