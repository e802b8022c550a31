//! Module-interface re-exports of the raw C API.

use tracing::{debug, warn};

use super::Emitter;
use crate::error::Result;
use crate::writer::CodeWriter;

impl Emitter<'_> {
    /// Re-export raw types and functions, and replace each raw `#define`
    /// with a typed constant of the same value.
    pub fn c_api(&self, w: &mut CodeWriter) -> Result<()> {
        for ty in &self.api.types {
            w.line(format!("export using ::{ty};"));
        }

        for f in &self.api.functions {
            let guard = f.features.as_deref().and_then(|feature| {
                let guard = self.conv.feature_guards.get(feature);
                if guard.is_none() {
                    warn!(function = %f.name, feature, "no guard configured for feature, exporting unguarded");
                }
                guard
            });
            if let Some(guard) = guard {
                w.line(format!("#ifdef {guard}"));
            }
            w.line(format!("export using ::{};", f.name));
            if let Some(guard) = guard {
                w.line(format!("#endif // {guard}"));
            }
        }

        for (define, value) in &self.api.defines {
            w.line(format!("#undef {define}"));
            w.line(format!("export constexpr int {define} = {value};"));
        }

        debug!(
            types = self.api.types.len(),
            functions = self.api.functions.len(),
            defines = self.api.defines.len(),
            "emitted C API re-exports"
        );
        Ok(())
    }
}
