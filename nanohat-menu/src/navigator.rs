//! Menu navigation state machine
//!
//! Pure state: the navigator owns the current path into the menu tree and
//! which view is up, and turns one button press into one state change plus
//! an `Effect` telling the caller what to draw or run. Nothing here touches
//! the display or the system.

use crate::actions::ActionId;
use crate::events::Button;
use crate::menu::{Menu, MenuNode, NodeKind};
use crate::pager::ScrollCursor;
use nanohat_ui::NavLabels;
use nanohat_ui::pages::{MenuPage, MenuRow};

/// Menu rows visible under the title
const MENU_WINDOW: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Boot screen, also reached with Exit from the root level
    Home,
    Menu,
    /// A leaf's own content; the path still points at the leaf
    Page { action: ActionId, cursor: ScrollCursor },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Redraw the current view
    Render,
    /// A leaf was selected; run it and show what it produces
    Run(ActionId),
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    path: Vec<usize>,
    view: View,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            path: vec![0],
            view: View::Home,
        }
    }
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Mutable access to the page cursor, if a page is showing.
    pub fn cursor_mut(&mut self) -> Option<&mut ScrollCursor> {
        match &mut self.view {
            View::Page { cursor, .. } => Some(cursor),
            View::Home | View::Menu => None,
        }
    }

    pub fn handle(&mut self, menu: &Menu, button: Button) -> Effect {
        self.heal(menu);

        let effect = match self.view {
            View::Home => match button {
                Button::Down | Button::Select => {
                    self.view = View::Menu;
                    Effect::Render
                }
                Button::Back => Effect::Ignored,
            },
            View::Menu => self.handle_menu(menu, button),
            View::Page { .. } => self.handle_page(button),
        };
        log::debug!("{button:?} -> {effect:?}, path {:?}", self.path);
        effect
    }

    fn handle_menu(&mut self, menu: &Menu, button: Button) -> Effect {
        let Some((&index, prefix)) = self.path.split_last() else {
            return Effect::Ignored;
        };
        let Some(level) = menu.level(prefix) else {
            return Effect::Ignored;
        };

        match button {
            Button::Down => {
                if level.is_empty() {
                    return Effect::Ignored;
                }
                let next = (index + 1) % level.len();
                self.set_last(next);
                Effect::Render
            }
            Button::Select => match level.get(index).map(|node| &node.kind) {
                Some(NodeKind::Interior(children)) if !children.is_empty() => {
                    self.path.push(0);
                    Effect::Render
                }
                Some(NodeKind::Leaf(ActionId::Cancel)) => {
                    // Leave the confirmation gate with its parent level's
                    // first entry selected
                    if self.path.len() > 1 {
                        self.path.pop();
                        self.set_last(0);
                    }
                    Effect::Render
                }
                Some(NodeKind::Leaf(action)) => {
                    self.view = View::Page {
                        action: *action,
                        cursor: ScrollCursor::default(),
                    };
                    Effect::Run(*action)
                }
                Some(NodeKind::Interior(_)) | None => Effect::Ignored,
            },
            Button::Back => {
                if self.path.len() == 1 {
                    self.view = View::Home;
                } else {
                    self.path.pop();
                }
                Effect::Render
            }
        }
    }

    fn handle_page(&mut self, button: Button) -> Effect {
        match button {
            Button::Down => {
                if let Some(cursor) = self.cursor_mut() {
                    cursor.advance();
                }
                Effect::Render
            }
            Button::Select => {
                if let Some(cursor) = self.cursor_mut() {
                    cursor.retreat();
                }
                Effect::Render
            }
            Button::Back => {
                self.view = View::Menu;
                Effect::Render
            }
        }
    }

    fn set_last(&mut self, index: usize) {
        if let Some(last) = self.path.last_mut() {
            *last = index;
        }
    }

    /// Pull the path back onto the tree: out-of-range indices become 0 and a
    /// path running past a leaf is cut at the leaf.
    fn heal(&mut self, menu: &Menu) {
        if self.path.is_empty() {
            self.path.push(0);
        }

        let mut level: &[MenuNode] = &menu.entries;
        for depth in 0..self.path.len() {
            if self.path[depth] >= level.len() {
                log::debug!("Index {} out of range at depth {depth}", self.path[depth]);
                self.path[depth] = 0;
            }
            let Some(node) = level.get(self.path[depth]) else {
                break;
            };
            match node.children() {
                Some(children) => level = children,
                None => {
                    self.path.truncate(depth + 1);
                    break;
                }
            }
        }
    }

    /// The menu level at the current path, windowed to the visible rows.
    #[must_use]
    pub fn menu_page(&self, menu: &Menu) -> MenuPage {
        let (selected, prefix) = self.path.split_last().map_or((0, &[][..]), |(i, p)| (*i, p));
        let level = menu.level(prefix).unwrap_or_default();

        let title = match menu.node(prefix) {
            Some(parent) => parent.name.as_str(),
            None => menu.home.as_str(),
        };

        let start = if selected >= MENU_WINDOW {
            selected + 1 - MENU_WINDOW
        } else {
            0
        };
        let rows = level
            .iter()
            .enumerate()
            .skip(start)
            .take(MENU_WINDOW)
            .map(|(i, node)| MenuRow {
                label: node.name.clone(),
                selected: i == selected,
            })
            .collect();

        MenuPage {
            title: format!("[ {title} ]"),
            rows,
            nav: NavLabels {
                down: Some("Down"),
                next: Some("Next"),
                back: Some(if prefix.is_empty() { "Exit" } else { "Back" }),
            },
        }
    }
}
