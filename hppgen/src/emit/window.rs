//! Window-object surface: attribute accessors and the event machinery
//! (peer handler slots, raw callback trampolines, handler setters).

use tracing::debug;

use super::Emitter;
use crate::error::Result;
use crate::params::{self, MappedParam};
use crate::writer::CodeWriter;

impl Emitter<'_> {
    /// Mapped parameters of a window event.
    fn event_params(&self, event: &str) -> Result<Vec<MappedParam>> {
        let params = self
            .api
            .window_events
            .get(event)
            .map(|e| e.parameters.as_slice())
            .unwrap_or_default();
        params::build_params(event, params, self.conv)
    }

    /// `std::function<void(...)>` over the event's visible parameter types.
    pub fn handler_type(&self, event: &str) -> Result<String> {
        let params = self.event_params(event)?;
        let types: Vec<&str> = params.iter().filter_map(|p| p.wrapper.as_deref()).collect();
        Ok(format!("std::function<void({})>", types.join(", ")))
    }

    /// One stored handler slot per event.
    pub fn peer_fields(&self, w: &mut CodeWriter) -> Result<()> {
        w.indented(2, |w| {
            for event in self.api.window_events.keys() {
                w.line(format!("{} handle{event};", self.handler_type(event)?));
            }
            Ok(())
        })
    }

    /// Register a capture-less trampoline per event that finds the window's
    /// peer and forwards converted arguments to its handler, if one is set.
    pub fn callback_setup(&self, w: &mut CodeWriter) -> Result<()> {
        let window_param = format!("{}window* window", self.conv.handle_prefix);
        w.indented(2, |w| {
            for event in self.api.window_events.keys() {
                if self.conv.skipped_trampolines.contains(event) {
                    debug!(event = %event, "trampoline left to the template");
                    continue;
                }
                let params = self.event_params(event)?;
                let raw_params: Vec<String> = std::iter::once(window_param.clone())
                    .chain(params.iter().map(|p| format!("{} {}", p.raw, p.name)))
                    .collect();
                let forwarded: Vec<String> = params
                    .iter()
                    .filter_map(|p| p.forward.as_ref().map(|f| f.bind(&p.name)))
                    .collect();

                let register = format!(
                    "::{}(m_window, []({}) {{",
                    self.raw_function(&format!("Set{event}Callback")),
                    raw_params.join(", ")
                );
                w.block(&register, "});", |w| {
                    w.line(format!("auto peer = {}(window);", self.conv.peer_lookup));
                    w.block(&format!("if (peer && peer->handle{event}) {{"), "}", |w| {
                        w.line(format!("peer->handle{event}({});", forwarded.join(", ")));
                        Ok(())
                    })
                })?;
                w.blank();
            }
            Ok(())
        })?;
        debug!(events = self.api.window_events.len(), "emitted callback setup");
        Ok(())
    }

    /// `setXHandler` per event, moving the handler into the peer slot.
    pub fn handler_setters(&self, w: &mut CodeWriter) -> Result<()> {
        w.indented(1, |w| {
            for event in self.api.window_events.keys() {
                let header = format!(
                    "void set{event}Handler({} handler) const {{",
                    self.handler_type(event)?
                );
                w.block(&header, "}", |w| {
                    w.line(format!(
                        "{}()->handle{event} = std::move(handler);",
                        self.conv.peer_accessor
                    ));
                    Ok(())
                })?;
                w.blank();
            }
            Ok(())
        })
    }

    /// `isX()` per attribute, plus `setX(bool)` unless it is read-only.
    pub fn attributes(&self, w: &mut CodeWriter) -> Result<()> {
        w.indented(1, |w| {
            for (attrib, props) in &self.api.window_attribs {
                let name = crate::naming::to_title_case(self.strip_define_prefix(attrib));
                let getter = format!("{}bool is{name}() const {{", self.nodiscard());
                w.block(&getter, "}", |w| {
                    w.line(format!("return getAttrib(WindowAttrib::e{name});"));
                    Ok(())
                })?;
                w.blank();
                if !props.readonly {
                    w.block(&format!("void set{name}(bool value) const {{"), "}", |w| {
                        w.line(format!("setAttrib(WindowAttrib::e{name}, value);"));
                        Ok(())
                    })?;
                    w.blank();
                }
            }
            Ok(())
        })?;
        debug!(attributes = self.api.window_attribs.len(), "emitted attribute accessors");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Conventions;
    use crate::emit::Emitter;
    use crate::emit::test_support::{api, render};

    const EVENTS: &str = r#"
window_attribs:
  GLFW_FOCUSED: { readonly: true }
  GLFW_AUTO_ICONIFY: { readonly: false }
window_events:
  WindowClose:
    parameters: []
  WindowFocus:
    parameters:
      - { name: focused, type: int, enum: bool }
  Key:
    parameters:
      - { name: key, type: int, enum: key }
      - { name: scancode, type: int }
      - { name: action, type: int, enum: action }
      - { name: mods, type: int, enum: mods }
  Drop:
    parameters:
      - { name: path_count, type: int, count_for: paths }
      - { name: paths, type: "const char**" }
"#;

    #[test]
    fn peer_slots_hide_count_parameters() {
        let api = api(EVENTS);
        let conv = Conventions::default();
        let out = render(|w| Emitter::new(&api, &conv).peer_fields(w));
        assert_eq!(
            out,
            "        std::function<void()> handleWindowClose;\n\
             \x20       std::function<void(bool)> handleWindowFocus;\n\
             \x20       std::function<void(Key, int, Action, Mods)> handleKey;\n\
             \x20       std::function<void(std::span<const std::string_view>)> handleDrop;\n"
        );
    }

    #[test]
    fn key_trampoline_forwards_converted_arguments() {
        let api = api(EVENTS);
        let conv = Conventions::default();
        let out = render(|w| Emitter::new(&api, &conv).callback_setup(w));
        let expected = "        ::glfwSetKeyCallback(m_window, [](GLFWwindow* window, int key, int scancode, int action, int mods) {\n\
             \x20           auto peer = WindowPeer::fromHandle(window);\n\
             \x20           if (peer && peer->handleKey) {\n\
             \x20               peer->handleKey(static_cast<Key>(key), scancode, static_cast<Action>(action), static_cast<Mods>(mods));\n\
             \x20           }\n\
             \x20       });\n\n";
        assert!(out.contains(expected), "{out}");
        assert!(out.contains("peer->handleWindowFocus(focused == GLFW_TRUE);"));
        assert!(out.contains("peer->handleWindowClose();"));
    }

    #[test]
    fn skipped_trampolines_are_left_out() {
        let api = api(EVENTS);
        let conv = Conventions::default();
        let out = render(|w| Emitter::new(&api, &conv).callback_setup(w));
        assert!(!out.contains("glfwSetDropCallback"));
        assert!(!out.contains("reinterpret_cast"));
        assert_eq!(out.matches("Callback(m_window").count(), 3);
    }

    #[test]
    fn handler_setters_move_into_peer() {
        let api = api(EVENTS);
        let conv = Conventions::default();
        let out = render(|w| Emitter::new(&api, &conv).handler_setters(w));
        assert!(out.starts_with(
            "    void setWindowCloseHandler(std::function<void()> handler) const {\n\
             \x20       getPeer()->handleWindowClose = std::move(handler);\n\
             \x20   }\n\n"
        ));
        assert!(out.contains(
            "void setDropHandler(std::function<void(std::span<const std::string_view>)> handler) const {"
        ));
    }

    #[test]
    fn readonly_attributes_get_no_setter() {
        let api = api(EVENTS);
        let conv = Conventions::default();
        let out = render(|w| Emitter::new(&api, &conv).attributes(w));
        assert_eq!(
            out,
            "    GLFW_HPP_NODISCARD bool isFocused() const {\n\
             \x20       return getAttrib(WindowAttrib::eFocused);\n\
             \x20   }\n\
             \n\
             \x20   GLFW_HPP_NODISCARD bool isAutoIconify() const {\n\
             \x20       return getAttrib(WindowAttrib::eAutoIconify);\n\
             \x20   }\n\
             \n\
             \x20   void setAutoIconify(bool value) const {\n\
             \x20       setAttrib(WindowAttrib::eAutoIconify, value);\n\
             \x20   }\n\
             \n"
        );
    }
}
