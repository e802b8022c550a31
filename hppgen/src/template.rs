//! Template director: walks the template line by line, echoes
//! hand-written text, and regenerates every marker region.
//!
//! A region on disk looks like:
//!
//! ```text
//! // !begin_generated
//! // !generate_enums
//! ...generated text...
//! // !end_generated
//! ```
//!
//! A bare command line (no surrounding markers) is accepted too, so a fresh
//! template and a previously generated file are both valid input, and
//! regenerating is a fixed point.

use tracing::debug;

use crate::emit::Emitter;
use crate::error::{Error, Result};
use crate::model::HintKind;
use crate::writer::CodeWriter;

/// A marker command, named after the text following the marker prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    BeginGenerated,
    EndGenerated,
    Enums,
    CApi,
    InitHintDefs,
    WindowHintDefs,
    ApplyInitHints,
    ApplyWindowHints,
    WindowPeer,
    WindowCallbackSetup,
    WindowMethods,
    MonitorMethods,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::BeginGenerated,
        Command::EndGenerated,
        Command::Enums,
        Command::CApi,
        Command::InitHintDefs,
        Command::WindowHintDefs,
        Command::ApplyInitHints,
        Command::ApplyWindowHints,
        Command::WindowPeer,
        Command::WindowCallbackSetup,
        Command::WindowMethods,
        Command::MonitorMethods,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::BeginGenerated => "begin_generated",
            Command::EndGenerated => "end_generated",
            Command::Enums => "generate_enums",
            Command::CApi => "generate_c_api",
            Command::InitHintDefs => "generate_init_hint_defs",
            Command::WindowHintDefs => "generate_window_hint_defs",
            Command::ApplyInitHints => "generate_apply_init_hints",
            Command::ApplyWindowHints => "generate_apply_window_hints",
            Command::WindowPeer => "generate_window_peer",
            Command::WindowCallbackSetup => "generate_window_callback_setup",
            Command::WindowMethods => "generate_window_methods",
            Command::MonitorMethods => "generate_monitor_methods",
        }
    }

    pub fn parse(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Run the emitters that fill this command's region.
    fn emit(self, emitter: &Emitter<'_>, w: &mut CodeWriter) -> Result<()> {
        match self {
            Command::BeginGenerated | Command::EndGenerated => Ok(()),
            Command::Enums => emitter.enums(w),
            Command::CApi => emitter.c_api(w),
            Command::InitHintDefs => emitter.hint_fields(w, HintKind::Init),
            Command::WindowHintDefs => emitter.hint_fields(w, HintKind::Window),
            Command::ApplyInitHints => emitter.apply_hints(w, HintKind::Init),
            Command::ApplyWindowHints => emitter.apply_hints(w, HintKind::Window),
            Command::WindowPeer => emitter.peer_fields(w),
            Command::WindowCallbackSetup => emitter.callback_setup(w),
            Command::WindowMethods => {
                emitter.methods(w, "window")?;
                emitter.handler_setters(w)?;
                emitter.attributes(w)
            }
            Command::MonitorMethods => emitter.methods(w, "monitor"),
        }
    }
}

/// Regenerate every region of `template`.
///
/// The text after the final newline is dropped, every line is right-trimmed,
/// and every emitted line ends with `\n`.
pub fn process(template: &str, emitter: &Emitter<'_>) -> Result<String> {
    let conv = emitter.conventions();
    let prefix = conv.marker_prefix.as_str();
    let begin_marker = format!("{prefix}{}", Command::BeginGenerated.name());
    let end_marker = format!("{prefix}{}", Command::EndGenerated.name());

    let mut w = CodeWriter::new(conv.indent.as_str());
    // Line number of the begin marker of the region being replaced.
    let mut open: Option<usize> = None;
    let mut regions = 0usize;

    let mut lines: Vec<&str> = template.split('\n').collect();
    lines.pop();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end();

        let Some(name) = line.strip_prefix(prefix) else {
            if open.is_none() {
                w.verbatim(line);
            }
            continue;
        };
        let command = Command::parse(name).ok_or_else(|| Error::UnknownCommand {
            line: line_no,
            command: name.to_string(),
        })?;

        match command {
            Command::BeginGenerated => {
                if let Some(opened) = open {
                    return Err(Error::NestedRegion {
                        line: line_no,
                        opened,
                    });
                }
                open = Some(line_no);
            }
            Command::EndGenerated => {
                if open.take().is_none() {
                    return Err(Error::UnexpectedEnd { line: line_no });
                }
            }
            _ => {
                w.verbatim(&begin_marker);
                w.verbatim(line);
                command.emit(emitter, &mut w)?;
                w.verbatim(&end_marker);
                regions += 1;
                debug!(command = command.name(), line = line_no, "regenerated region");
            }
        }
    }

    if let Some(line) = open {
        return Err(Error::UnterminatedRegion { line });
    }
    debug!(regions, "template processed");
    Ok(w.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Conventions;
    use crate::emit::test_support::api;

    const API: &str = r#"
enums:
  action:
    prefix: GLFW_
    values: [GLFW_RELEASE, GLFW_PRESS]
hints:
  init_hint:
    GLFW_JOYSTICK_HAT_BUTTONS: bool
"#;

    fn run(template: &str) -> Result<String> {
        let api = api(API);
        let conv = Conventions::default();
        process(template, &Emitter::new(&api, &conv))
    }

    #[test]
    fn command_names_round_trip() {
        for c in Command::ALL {
            assert_eq!(Command::parse(c.name()), Some(c));
        }
        assert_eq!(Command::parse("generate_everything"), None);
    }

    #[test]
    fn fresh_command_is_wrapped_in_markers() {
        let out = run("namespace glfw {\n// !generate_enums\n}\n").unwrap();
        assert_eq!(
            out,
            "namespace glfw {\n\
             // !begin_generated\n\
             // !generate_enums\n\
             GLFW_HPP_EXPORT enum class Action {\n\
             \x20   eRelease = GLFW_RELEASE,\n\
             \x20   ePress = GLFW_PRESS,\n\
             };\n\
             // !end_generated\n\
             }\n"
        );
    }

    #[test]
    fn stale_region_body_is_replaced() {
        let stale = "a\n// !begin_generated\n// !generate_init_hint_defs\n    std::optional<int> old;\n// !end_generated\nb\n";
        assert_eq!(
            run(stale).unwrap(),
            "a\n// !begin_generated\n// !generate_init_hint_defs\n    std::optional<bool> joystickHatButtons;\n// !end_generated\nb\n"
        );
    }

    #[test]
    fn output_is_a_fixed_point() {
        let once = run("x\n\n// !generate_enums\n  // comment  \n// !generate_init_hint_defs\n").unwrap();
        assert_eq!(run(&once).unwrap(), once);
    }

    #[test]
    fn text_outside_regions_passes_through() {
        let text = "/* header */\n\n   indented line\n#define X 1\n// ! not quite\n";
        let err = run(text).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { line: 5, .. }));

        let text = "/* header */\n\n   indented line\n#define X 1\n//! near miss\n";
        assert_eq!(run(text).unwrap(), text);
    }

    #[test]
    fn trailing_segment_and_whitespace_are_dropped() {
        assert_eq!(run("keep  \r\nlast without newline").unwrap(), "keep\n");
        assert_eq!(run("").unwrap(), "");
    }

    #[test]
    fn malformed_regions_fail() {
        assert_eq!(
            run("// !generate_windows\n").unwrap_err(),
            Error::UnknownCommand {
                line: 1,
                command: "generate_windows".into()
            }
        );
        assert_eq!(
            run("// !begin_generated\n// !generate_enums\n").unwrap_err(),
            Error::UnterminatedRegion { line: 1 }
        );
        assert_eq!(
            run("// !end_generated\n").unwrap_err(),
            Error::UnexpectedEnd { line: 1 }
        );
        assert_eq!(
            run("// !begin_generated\n// !begin_generated\n").unwrap_err(),
            Error::NestedRegion { line: 2, opened: 1 }
        );
    }
}
