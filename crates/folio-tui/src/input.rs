use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSection,
    PrevSection,
    ScrollLineDown,
    ScrollLineUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    /// First 'g' of "gg"
    PendingG,
    GalleryLeft,
    GalleryRight,
    OpenLightbox,
    TogglePlayback,
    ToggleInfo,
    /// Open the focused media (or the lightbox image) outside the terminal
    OpenExternal,
    WorkMenu,
    ContactMenu,
    MenuUp,
    MenuDown,
    MenuExpand,
    MenuCollapse,
    MenuSelect,
    LightboxNext,
    LightboxPrev,
    LightboxClose,
    ExitMode,
    None,
}

pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    resolve_key(key, app.mode(), &app.keymap, app.pending_key)
}

/// Map a key press to an action for the current mode
pub fn resolve_key(key: KeyEvent, mode: Mode, keymap: &Keymap, pending_key: Option<char>) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        return Action::Quit;
    }

    match mode {
        Mode::Lightbox { .. } => handle_lightbox_mode(key),
        Mode::Menu(_) => handle_menu_mode(key, keymap),
        Mode::Normal => handle_normal_mode(key, keymap, pending_key),
    }
}

fn handle_normal_mode(key: KeyEvent, keymap: &Keymap, pending_key: Option<char>) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.is_g_prefix(&binding) {
        return match (pending_key, keymap.sequence_g_action()) {
            (Some('g'), Some(action)) => *action,
            _ => Action::PendingG,
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}

fn handle_menu_mode(key: KeyEvent, keymap: &Keymap) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MenuDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MenuUp,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => Action::MenuExpand,
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => Action::MenuCollapse,
        (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::MenuSelect,
        (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => Action::ExitMode,
        _ => {
            // The menu keys switch or close menus
            let binding = KeyBinding::new(key.code, key.modifiers);
            match keymap.get(&binding) {
                Some(Action::WorkMenu) => Action::WorkMenu,
                Some(Action::ContactMenu) => Action::ContactMenu,
                _ => Action::None,
            }
        }
    }
}

fn handle_lightbox_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => Action::LightboxClose,
        (KeyCode::Right, _)
        | (KeyCode::Char('l'), KeyModifiers::NONE)
        | (KeyCode::Char('n'), KeyModifiers::NONE)
        | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::LightboxNext,
        (KeyCode::Left, _)
        | (KeyCode::Char('h'), KeyModifiers::NONE)
        | (KeyCode::Char('p'), KeyModifiers::NONE) => Action::LightboxPrev,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenExternal,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::MenuKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_uses_keymap() {
        let keymap = Keymap::default();
        assert_eq!(
            resolve_key(press(KeyCode::Char('l')), Mode::Normal, &keymap, None),
            Action::GalleryRight
        );
        assert_eq!(
            resolve_key(press(KeyCode::Enter), Mode::Normal, &keymap, None),
            Action::OpenLightbox
        );
        assert_eq!(
            resolve_key(press(KeyCode::Char('z')), Mode::Normal, &keymap, None),
            Action::None
        );
    }

    #[test]
    fn test_gg_sequence() {
        let keymap = Keymap::default();
        let g = press(KeyCode::Char('g'));
        assert_eq!(resolve_key(g, Mode::Normal, &keymap, None), Action::PendingG);
        assert_eq!(resolve_key(g, Mode::Normal, &keymap, Some('g')), Action::JumpToTop);
    }

    #[test]
    fn test_lightbox_captures_keys() {
        let keymap = Keymap::default();
        let mode = Mode::Lightbox { gallery: 0 };
        assert_eq!(resolve_key(press(KeyCode::Esc), mode, &keymap, None), Action::LightboxClose);
        assert_eq!(resolve_key(press(KeyCode::Right), mode, &keymap, None), Action::LightboxNext);
        assert_eq!(resolve_key(press(KeyCode::Left), mode, &keymap, None), Action::LightboxPrev);
        // Page keys do nothing while the lightbox is open
        assert_eq!(resolve_key(press(KeyCode::Char('j')), mode, &keymap, None), Action::None);
    }

    #[test]
    fn test_menu_mode() {
        let keymap = Keymap::default();
        let mode = Mode::Menu(MenuKind::Work);
        assert_eq!(resolve_key(press(KeyCode::Down), mode, &keymap, None), Action::MenuDown);
        assert_eq!(resolve_key(press(KeyCode::Enter), mode, &keymap, None), Action::MenuSelect);
        assert_eq!(resolve_key(press(KeyCode::Char('c')), mode, &keymap, None), Action::ContactMenu);
        assert_eq!(resolve_key(press(KeyCode::Esc), mode, &keymap, None), Action::ExitMode);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(resolve_key(key, Mode::Lightbox { gallery: 1 }, &keymap, None), Action::Quit);
    }
}
