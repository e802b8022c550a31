//! `enum class` declarations, one per enum group.

use tracing::debug;

use super::Emitter;
use crate::error::Result;
use crate::naming;
use crate::writer::CodeWriter;

impl Emitter<'_> {
    /// One `enum class` for the named group, enumerators in declaration
    /// order, each bound to its raw constant.
    pub fn enum_group(&self, w: &mut CodeWriter, name: &str) -> Result<()> {
        let Some(group) = self.api.enums.get(name) else {
            return Ok(());
        };
        let header = format!(
            "{} enum class {} {{",
            self.conv.export_macro,
            naming::to_title_case(name)
        );
        w.block(&header, "};", |w| {
            for (enumerator, raw) in group.enumerators() {
                w.line(format!("{enumerator} = {raw},"));
            }
            Ok(())
        })?;
        debug!(name, enumerators = group.values.len(), "emitted enum");
        Ok(())
    }

    /// Every enum group except the reserved ones.
    pub fn enums(&self, w: &mut CodeWriter) -> Result<()> {
        for name in self.api.enums.keys() {
            if self.conv.skipped_enums.contains(name) {
                continue;
            }
            self.enum_group(w, name)?;
        }
        Ok(())
    }
}
