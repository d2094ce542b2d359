//! Keyboard bindings for the presenter screen.

use crossterm::event::KeyCode;

use crate::session::Intent;

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Close,
}

/// Translate a key into a command, given the offered categories and the
/// active one. Unbound keys return `None`.
pub fn map_key(key: KeyCode, categories: &[String], active: &str) -> Option<Command> {
    let intent = match key {
        KeyCode::Enter | KeyCode::Char(' ') => Intent::Draw,
        KeyCode::Char('a') | KeyCode::Char('A') => Intent::Reveal,
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit.to_digit(10)? as usize - 1;
            Intent::SwitchCategory(categories.get(index)?.clone())
        }
        KeyCode::Tab => Intent::SwitchCategory(cycle(categories, active, 1)?),
        KeyCode::BackTab => {
            Intent::SwitchCategory(cycle(categories, active, categories.len().saturating_sub(1))?)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Command::Close),
        _ => return None,
    };

    Some(Command::Intent(intent))
}

fn cycle(categories: &[String], active: &str, step: usize) -> Option<String> {
    if categories.is_empty() {
        return None;
    }

    let next = match categories.iter().position(|category| category == active) {
        Some(position) => (position + step) % categories.len(),
        None => 0,
    };
    categories.get(next).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        ["单选题", "多选题", "判断题"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn switch(category: &str) -> Option<Command> {
        Some(Command::Intent(Intent::SwitchCategory(category.to_string())))
    }

    #[test]
    fn test_draw_and_reveal_keys() {
        let categories = categories();
        let draw = Some(Command::Intent(Intent::Draw));

        assert_eq!(map_key(KeyCode::Enter, &categories, "单选题"), draw);
        assert_eq!(map_key(KeyCode::Char(' '), &categories, "单选题"), draw);
        assert_eq!(
            map_key(KeyCode::Char('a'), &categories, "单选题"),
            Some(Command::Intent(Intent::Reveal))
        );
    }

    #[test]
    fn test_number_keys_select_category() {
        let categories = categories();

        assert_eq!(map_key(KeyCode::Char('1'), &categories, "判断题"), switch("单选题"));
        assert_eq!(map_key(KeyCode::Char('3'), &categories, "单选题"), switch("判断题"));
        assert_eq!(map_key(KeyCode::Char('4'), &categories, "单选题"), None);
    }

    #[test]
    fn test_tab_cycles_categories() {
        let categories = categories();

        assert_eq!(map_key(KeyCode::Tab, &categories, "单选题"), switch("多选题"));
        assert_eq!(map_key(KeyCode::Tab, &categories, "判断题"), switch("单选题"));
        assert_eq!(map_key(KeyCode::BackTab, &categories, "单选题"), switch("判断题"));
        assert_eq!(map_key(KeyCode::Tab, &categories, "unknown"), switch("单选题"));
        assert_eq!(map_key(KeyCode::Tab, &[], "单选题"), None);
    }

    #[test]
    fn test_close_keys() {
        let categories = categories();

        assert_eq!(map_key(KeyCode::Char('q'), &categories, ""), Some(Command::Close));
        assert_eq!(map_key(KeyCode::Esc, &categories, ""), Some(Command::Close));
        assert_eq!(map_key(KeyCode::Char('x'), &categories, ""), None);
    }
}
