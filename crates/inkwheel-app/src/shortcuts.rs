//! Keyboard shortcut registry and documentation.

use inkwheel_core::ToolKind;

use crate::ui::UiAction;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("P", false, "Pen"),
            Shortcut::new("L", false, "Line"),
            Shortcut::new("R", false, "Rectangle"),
            Shortcut::new("E", false, "Ellipse"),
            Shortcut::new("C", false, "Open the color picker"),
            Shortcut::new("S", true, "Save..."),
            Shortcut::new("O", true, "Open..."),
            Shortcut::new("Escape", false, "Close the color picker or message"),
        ]
    }

    /// Shortcut label for a tool, shown in toolbar tooltips.
    pub fn tool_key(tool: ToolKind) -> &'static str {
        match tool {
            ToolKind::Ink => "P",
            ToolKind::Line => "L",
            ToolKind::Rectangle => "R",
            ToolKind::Ellipse => "E",
        }
    }

    /// Action bound to a key press. `key` is the logical key text, or the
    /// name of a named key such as "Escape".
    pub fn action_for(key: &str, ctrl: bool) -> Option<UiAction> {
        let key = key.to_ascii_lowercase();
        match (key.as_str(), ctrl) {
            ("p", false) => Some(UiAction::SetTool(ToolKind::Ink)),
            ("l", false) => Some(UiAction::SetTool(ToolKind::Line)),
            ("r", false) => Some(UiAction::SetTool(ToolKind::Rectangle)),
            ("e", false) => Some(UiAction::SetTool(ToolKind::Ellipse)),
            ("c", false) => Some(UiAction::OpenPicker),
            ("s", true) => Some(UiAction::Save),
            ("o", true) => Some(UiAction::Open),
            ("escape", _) => Some(UiAction::Dismiss),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_keys() {
        for tool in ToolKind::ALL {
            let key = ShortcutRegistry::tool_key(tool);
            assert_eq!(ShortcutRegistry::action_for(key, false), Some(UiAction::SetTool(tool)));
        }
        assert_eq!(
            ShortcutRegistry::action_for("R", false),
            Some(UiAction::SetTool(ToolKind::Rectangle))
        );
    }

    #[test]
    fn test_ctrl_bindings() {
        assert_eq!(ShortcutRegistry::action_for("s", true), Some(UiAction::Save));
        assert_eq!(ShortcutRegistry::action_for("o", true), Some(UiAction::Open));
        assert_eq!(ShortcutRegistry::action_for("p", true), None);
        assert_eq!(ShortcutRegistry::action_for("s", false), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("S", true, "Save").format(), "Ctrl+S");
        assert_eq!(Shortcut::new("P", false, "Pen").format(), "P");
    }
}
