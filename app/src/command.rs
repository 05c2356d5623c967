use eframe::egui::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // File Menu
    Quit,

    // View Menu
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

pub struct Command {
    pub id: CommandId,
    pub text: &'static str,
    pub shortcut: Option<(Modifiers, Key)>,
    pub shortcut_text: &'static str,
}

pub struct CommandRegistry {
    pub commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands = vec![
            // File Menu
            Command {
                id: CommandId::Quit,
                text: "Quit",
                shortcut: Some((Modifiers::COMMAND, Key::Q)),
                shortcut_text: "Ctrl+Q",
            },
            // View Menu
            Command {
                id: CommandId::ZoomIn,
                text: "Zoom In",
                shortcut: Some((Modifiers::COMMAND, Key::Equals)),
                shortcut_text: "Ctrl+=",
            },
            Command {
                id: CommandId::ZoomOut,
                text: "Zoom Out",
                shortcut: Some((Modifiers::COMMAND, Key::Minus)),
                shortcut_text: "Ctrl+-",
            },
            Command {
                id: CommandId::ResetZoom,
                text: "Reset Zoom",
                shortcut: Some((Modifiers::COMMAND, Key::Num0)),
                shortcut_text: "Ctrl+0",
            },
        ];
        Self { commands }
    }

    pub fn find(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|&cmd| cmd.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_a_distinct_shortcut() {
        let registry = CommandRegistry::new();
        let mut seen = Vec::new();
        for cmd in &registry.commands {
            let shortcut = cmd.shortcut.expect("shortcut");
            assert!(!seen.contains(&shortcut), "{:?} reuses a shortcut", cmd.id);
            seen.push(shortcut);
        }
        assert_eq!(
            registry.find(CommandId::ResetZoom).map(|c| c.text),
            Some("Reset Zoom")
        );
    }
}
