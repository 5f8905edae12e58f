//! Numbered command menus.

use std::fmt;

use crate::constants::MENU_PROMPT;

/// A command a menu entry dispatches.
pub trait MenuCommand: Copy + PartialEq + fmt::Debug + 'static {
    /// Short word accepted in place of the entry number.
    fn keyword(self) -> &'static str;
}

/// Commands for modes that never show a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoCommand {}

impl MenuCommand for NoCommand {
    fn keyword(self) -> &'static str {
        match self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry<C> {
    pub command: C,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<C> {
    header: String,
    entries: Vec<MenuEntry<C>>,
    footer: String,
}

impl<C> Default for Menu<C> {
    fn default() -> Self {
        Self {
            header: String::new(),
            entries: Vec::new(),
            footer: String::new(),
        }
    }
}

impl<C: MenuCommand> Menu<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop header, footer and entries so the menu can be rebuilt.
    pub fn clear(&mut self) {
        self.header.clear();
        self.footer.clear();
        self.entries.clear();
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = header.into();
    }

    pub fn set_footer(&mut self, footer: impl Into<String>) {
        self.footer = footer.into();
    }

    pub fn add(&mut self, command: C, label: impl Into<String>) {
        self.entries.push(MenuEntry {
            command,
            label: label.into(),
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[MenuEntry<C>] {
        &self.entries
    }

    /// Resolve a line of input to a command: the 1-based entry number, the
    /// label, or the command keyword, ignoring case.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<C> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Ok(number) = line.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| self.entries.get(index))
                .map(|entry| entry.command);
        }
        self.entries
            .iter()
            .find(|entry| {
                entry.label.eq_ignore_ascii_case(line) || entry.command.keyword().eq_ignore_ascii_case(line)
            })
            .map(|entry| entry.command)
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.header.is_empty() {
            out.push_str(&self.header);
            out.push_str("\n\n");
        }
        for (index, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", index + 1, entry.label));
        }
        if !self.footer.is_empty() {
            out.push('\n');
            out.push_str(&self.footer);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(MENU_PROMPT);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Choice {
        Continue,
        Supplies,
    }

    impl MenuCommand for Choice {
        fn keyword(self) -> &'static str {
            match self {
                Self::Continue => "continue",
                Self::Supplies => "supplies",
            }
        }
    }

    fn menu() -> Menu<Choice> {
        let mut menu = Menu::new();
        menu.set_header("Independence");
        menu.add(Choice::Continue, "Continue on trail");
        menu.add(Choice::Supplies, "Check supplies");
        menu
    }

    #[test]
    fn parses_numbers_labels_and_keywords() {
        let menu = menu();
        assert_eq!(menu.parse("1"), Some(Choice::Continue));
        assert_eq!(menu.parse(" 2 "), Some(Choice::Supplies));
        assert_eq!(menu.parse("CHECK SUPPLIES"), Some(Choice::Supplies));
        assert_eq!(menu.parse("continue"), Some(Choice::Continue));
    }

    #[test]
    fn rejects_unknown_input() {
        let menu = menu();
        assert_eq!(menu.parse("0"), None);
        assert_eq!(menu.parse("3"), None);
        assert_eq!(menu.parse(""), None);
        assert_eq!(menu.parse("fly"), None);
    }

    #[test]
    fn renders_numbered_entries() {
        let text = menu().render();
        assert!(text.starts_with("Independence\n\n  1. Continue on trail\n  2. Check supplies\n"));
        assert!(text.ends_with(MENU_PROMPT));
    }
}
