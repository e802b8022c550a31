//! Identifier transforms shared by all emitters.

/// Title-case a single word: a cased character is upper-cased when it
/// follows an uncased one and lower-cased otherwise, so `vidmode` becomes
/// `Vidmode`, `GLFW` becomes `Glfw` and `3d` becomes `3D`.
pub fn title_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_cased = false;
    for c in word.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// `snake_case` / `SCREAMING_CASE` → `TitleCase`.
pub fn to_title_case(name: &str) -> String {
    name.split('_').map(title_word).collect()
}

/// `snake_case` / `SCREAMING_CASE` → `camelCase`.
pub fn to_camel_case(name: &str) -> String {
    lower_first(&to_title_case(name))
}

/// Enumerator identifier for a stripped constant name: `RIGHT_UP` → `eRightUp`.
pub fn enumerator_name(name: &str) -> String {
    format!("e{}", to_title_case(name))
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_word_follows_cased_boundaries() {
        assert_eq!(title_word("vidmode"), "Vidmode");
        assert_eq!(title_word("GLFW"), "Glfw");
        assert_eq!(title_word("3d"), "3D");
        assert_eq!(title_word("F12"), "F12");
        assert_eq!(title_word(""), "");
    }

    #[test]
    fn title_case_joins_parts() {
        assert_eq!(to_title_case("input_mode_cursor"), "InputModeCursor");
        assert_eq!(to_title_case("FOCUS_ON_SHOW"), "FocusOnShow");
        assert_eq!(to_title_case("hat_state"), "HatState");
    }

    #[test]
    fn camel_case_lowers_first_letter() {
        assert_eq!(to_camel_case("CONTEXT_VERSION_MAJOR"), "contextVersionMajor");
        assert_eq!(to_camel_case("JOYSTICK_HAT_BUTTONS"), "joystickHatButtons");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn enumerator_names() {
        assert_eq!(enumerator_name("A"), "eA");
        assert_eq!(enumerator_name("RIGHT_UP"), "eRightUp");
        assert_eq!(enumerator_name("0"), "e0");
        assert_eq!(enumerator_name("KP_ADD"), "eKpAdd");
    }
}
