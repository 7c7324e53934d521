//! Keyed submission for the panel's text input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send the draft and suppress the default newline.
    Submit,
    /// Let the input insert a literal newline.
    InsertNewline,
    /// Not a line-submit key.
    Ignore,
}

/// `Enter` submits; `Enter` with the modifier held (Shift in the browser)
/// inserts a newline instead.
pub fn key_action(key: &str, modifier: bool) -> KeyAction {
    match (key, modifier) {
        ("Enter", false) => KeyAction::Submit,
        ("Enter", true) => KeyAction::InsertNewline,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_without_modifier_submits() {
        assert_eq!(key_action("Enter", false), KeyAction::Submit);
    }

    #[test]
    fn enter_with_modifier_inserts_newline() {
        assert_eq!(key_action("Enter", true), KeyAction::InsertNewline);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_action("a", false), KeyAction::Ignore);
        assert_eq!(key_action("Tab", true), KeyAction::Ignore);
    }
}
