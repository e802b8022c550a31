//! Construct emitters — API description → generated C++ declarations.
//!
//! Each emitter writes one construct family into a [`CodeWriter`](crate::writer::CodeWriter) at the
//! base indentation its template region expects, and never touches any
//! state besides that writer.

mod c_api;
mod enums;
mod hints;
mod methods;
mod window;

use crate::config::Conventions;
use crate::model::ApiDescription;

/// Read-only view over everything an emitter may consult.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    api: &'a ApiDescription,
    conv: &'a Conventions,
}

impl<'a> Emitter<'a> {
    pub fn new(api: &'a ApiDescription, conv: &'a Conventions) -> Self {
        Self { api, conv }
    }

    pub fn conventions(&self) -> &'a Conventions {
        self.conv
    }

    /// `m_window`, `m_monitor`: the member holding the receiver handle.
    fn handle_member(kind: &str) -> String {
        format!("m_{kind}")
    }

    /// `checkError();`
    fn error_check(&self) -> String {
        format!("{}();", self.conv.error_check)
    }

    /// `GLFW_HPP_NODISCARD ` (with the trailing space).
    fn nodiscard(&self) -> String {
        format!("{} ", self.conv.nodiscard_macro)
    }

    /// Raw C function name: `glfw` + `suffix`.
    fn raw_function(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.conv.function_prefix)
    }

    /// Strip the constant prefix from a hint or attribute name.
    fn strip_define_prefix<'n>(&self, raw: &'n str) -> &'n str {
        raw.strip_prefix(self.conv.define_prefix.as_str()).unwrap_or(raw)
    }
}
