/// The GLFW wrapper header as regenerated by the build script.
pub const GLFW_HPP: &str = include_str!(concat!(env!("OUT_DIR"), "/glfw.hpp"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_paired() {
        let mut open = false;
        for line in GLFW_HPP.lines() {
            match line {
                "// !begin_generated" => {
                    assert!(!open, "nested region");
                    open = true;
                }
                "// !end_generated" => {
                    assert!(open, "stray end marker");
                    open = false;
                }
                _ => {}
            }
        }
        assert!(!open);
    }

    #[test]
    fn test_braces_balance() {
        let opened = GLFW_HPP.matches('{').count();
        let closed = GLFW_HPP.matches('}').count();
        assert_eq!(opened, closed);
    }

    #[test]
    fn test_lines_are_trimmed() {
        assert!(GLFW_HPP.ends_with("#endif // GLFW_HPP_INCLUDED\n"));
        for line in GLFW_HPP.lines() {
            assert_eq!(line, line.trim_end(), "trailing whitespace: {line:?}");
        }
    }

    #[test]
    fn test_wrappers_present() {
        assert!(GLFW_HPP.contains("GLFW_HPP_EXPORT enum class Action {"));
        assert!(GLFW_HPP.contains("    void setIcon(std::span<const GLFWimage> images) const {"));
        assert!(GLFW_HPP.contains("        std::function<void(Key, int, Action, Mods)> handleKey;"));
        assert!(GLFW_HPP.contains("auto peer = WindowPeer::fromHandle(window);"));
        assert!(!GLFW_HPP.contains("staleMethodFromAnOlderRun"));
    }
}
