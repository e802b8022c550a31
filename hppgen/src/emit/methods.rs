//! Method wrappers for receiver-bound functions, with full parameter
//! marshaling.

use tracing::debug;

use super::Emitter;
use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::model::FunctionDesc;
use crate::naming;
use crate::params::{self, MappedParam};
use crate::typemap::{self, RawType};
use crate::writer::CodeWriter;

/// Wrapper method name for a function bound to `kind`, or `None` when the
/// function belongs to the event machinery (callbacks, user pointers).
///
/// `glfwGetWindowPos` on `window` becomes `position`, `glfwSetWindowPos`
/// becomes `setPosition`.
fn method_name(
    function: &str,
    kind: &str,
    has_inputs: bool,
    conv: &Conventions,
) -> Result<Option<String>> {
    let mut name = function
        .strip_prefix(conv.function_prefix.as_str())
        .unwrap_or(function)
        .replace(&naming::title_word(kind), "");
    if name.contains("Callback") || name.contains("UserPointer") {
        return Ok(None);
    }
    if !has_inputs && let Some(rest) = name.strip_prefix("Get") {
        name = rest.to_string();
    }
    if name.ends_with("Pos") {
        name.push_str("ition");
    }
    if name.is_empty() {
        return Err(Error::EmptyName {
            raw: function.to_string(),
            what: "method",
        });
    }
    Ok(Some(naming::lower_first(&name)))
}

impl Emitter<'_> {
    /// Every wrappable function whose receiver is `kind`.
    pub fn methods(&self, w: &mut CodeWriter, kind: &str) -> Result<()> {
        w.indented(1, |w| {
            let mut count = 0usize;
            for f in &self.api.functions {
                if f.receiver.as_deref() != Some(kind) || self.conv.skipped_methods.contains(&f.name) {
                    continue;
                }
                if self.method(w, kind, f)? {
                    count += 1;
                }
            }
            debug!(kind, methods = count, "emitted methods");
            Ok(())
        })
    }

    /// Emit one method. Returns false when the function is not wrapped.
    fn method(&self, w: &mut CodeWriter, kind: &str, f: &FunctionDesc) -> Result<bool> {
        let params = params::build_params(&f.name, f.marshaled_params(), self.conv)?;
        let (outputs, inputs): (Vec<&MappedParam>, Vec<&MappedParam>) =
            params.iter().partition(|p| p.out);

        let Some(name) = method_name(&f.name, kind, !inputs.is_empty(), self.conv)? else {
            debug!(function = %f.name, "left to the event machinery");
            return Ok(false);
        };

        let ret_count = params::return_count(&params).map(|p| p.name.as_str());
        let ret = typemap::map_type(
            RawType::new(&f.ret.ty, f.ret.enum_tag.as_deref()).counted_by(ret_count),
            self.conv,
            &format!("{} return", f.name),
        )?;

        let nodiscard = if f.ret.is_void() {
            String::new()
        } else {
            self.nodiscard()
        };
        let ret_ty = if outputs.is_empty() { ret.wrapper.as_str() } else { "auto" };
        let signature: Vec<String> = inputs.iter().filter_map(|p| p.declaration()).collect();
        let header = format!("{nodiscard}{ret_ty} {name}({}) const {{", signature.join(", "));

        w.block(&header, "}", |w| {
            let fields: Vec<String> = outputs
                .iter()
                .filter(|p| !p.is_count())
                .map(|p| format!("{} {}", p.pointee(), p.name))
                .collect();
            if !fields.is_empty() {
                w.line(format!("struct {{ {}; }} result{{}};", fields.join("; ")));
            }
            for p in outputs.iter().filter(|p| p.is_count()) {
                w.line(format!("{} {};", p.pointee(), p.name));
            }

            let args: Vec<String> = std::iter::once(Self::handle_member(kind))
                .chain(params.iter().map(|p| match (p.out, p.is_count()) {
                    (true, true) => format!("&{}", p.name),
                    (true, false) => p.backward.bind(&format!("&result.{}", p.name)),
                    (false, _) => p.backward.bind(&p.name),
                }))
                .collect();
            let call = format!("::{}({})", f.name, args.join(", "));

            if f.ret.is_void() {
                w.line(format!("{call};"));
            } else {
                w.line(format!("auto returnValue = {call};"));
            }
            w.line(self.error_check());

            if !f.ret.is_void() {
                w.line(format!("return {};", ret.forward.bind("returnValue")));
            } else if !fields.is_empty() {
                w.line("return result;");
            }
            Ok(())
        })?;
        w.blank();
        Ok(true)
    }
}
