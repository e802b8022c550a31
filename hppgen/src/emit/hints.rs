//! Hint structs: optional fields and the code applying them.

use tracing::debug;

use super::Emitter;
use crate::error::{Error, Result};
use crate::model::HintKind;
use crate::naming;
use crate::writer::CodeWriter;

/// Field type for a hint value kind.
fn hint_value_type(kind: &str) -> String {
    match kind {
        "bool" | "int" => kind.to_string(),
        "string" => "std::string".to_string(),
        other => naming::to_title_case(other),
    }
}

impl Emitter<'_> {
    fn hint_field_name(&self, raw: &str) -> Result<String> {
        let name = naming::to_camel_case(self.strip_define_prefix(raw));
        if name.is_empty() {
            return Err(Error::EmptyName {
                raw: raw.to_string(),
                what: "hint field",
            });
        }
        Ok(name)
    }

    /// `std::optional<T> name;` per hint of `kind`.
    pub fn hint_fields(&self, w: &mut CodeWriter, kind: HintKind) -> Result<()> {
        let table = self.api.hints.table(kind);
        w.indented(1, |w| {
            for (raw, value_kind) in table {
                let name = self.hint_field_name(raw)?;
                w.line(format!("std::optional<{}> {name};", hint_value_type(value_kind)));
            }
            Ok(())
        })?;
        debug!(kind = kind.title(), hints = table.len(), "emitted hint fields");
        Ok(())
    }

    /// Forward every set hint field to the raw hint setter.
    pub fn apply_hints(&self, w: &mut CodeWriter, kind: HintKind) -> Result<()> {
        let table = self.api.hints.table(kind);
        let setter = self.raw_function(&format!("{}Hint", kind.title()));
        w.indented(1, |w| {
            for (raw, value_kind) in table {
                let name = self.hint_field_name(raw)?;
                w.block(&format!("if (info.{name}) {{"), "}", |w| {
                    if value_kind == "string" {
                        w.line(format!("::{setter}String({raw}, info.{name}.value().c_str());"));
                    } else {
                        w.line(format!(
                            "::{setter}({raw}, static_cast<int>(info.{name}.value()));"
                        ));
                    }
                    w.line(self.error_check());
                    Ok(())
                })?;
                w.blank();
            }
            Ok(())
        })?;
        debug!(kind = kind.title(), hints = table.len(), "emitted hint application");
        Ok(())
    }
}
