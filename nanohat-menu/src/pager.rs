//! Scrolling and paging of line lists
//!
//! Fact providers hand back plain lines of text. A `ScrollTable` shows them a
//! few rows at a time and moves one row per key press; a `PagedTable` splits
//! them into fixed pages and moves a page at a time. Either way the cursor is
//! clamped against the content on every render, since the list can shrink
//! between two refreshes.

use nanohat_ui::NavLabels;
use nanohat_ui::pages::TablePage;

/// Characters that fit on one table row
pub const MAX_LINE_CHARS: usize = 20;
/// Rows available between the top of the panel and the nav bar
const TABLE_ROWS: usize = 4;
const EMPTY_PLACEHOLDER: &str = "No data";

/// Position within a scrollable page.
///
/// `limit` is the highest valid position seen on the last render; until the
/// first render it is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollCursor {
    position: usize,
    limit: usize,
}

impl Default for ScrollCursor {
    fn default() -> Self {
        Self {
            position: 0,
            limit: usize::MAX,
        }
    }
}

impl ScrollCursor {
    #[must_use]
    pub fn position(self) -> usize {
        self.position
    }

    pub fn advance(&mut self) {
        self.position = self.position.saturating_add(1).min(self.limit);
    }

    pub fn retreat(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Record the highest valid position and pull the cursor back inside it.
    pub fn clamp_to(&mut self, limit: usize) {
        self.limit = limit;
        self.position = self.position.min(limit);
    }
}

/// Lines shown through a window, one row per Down/Up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollTable {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl ScrollTable {
    #[must_use]
    pub fn new(title: Option<&str>, lines: Vec<String>) -> Self {
        Self {
            title: title.map(ToString::to_string),
            lines: fit_lines(lines),
        }
    }

    /// Visible rows; a title takes one of them.
    #[must_use]
    pub fn window(&self) -> usize {
        if self.title.is_some() {
            TABLE_ROWS - 1
        } else {
            TABLE_ROWS
        }
    }

    #[must_use]
    pub fn last_position(&self) -> usize {
        self.lines.len().saturating_sub(self.window())
    }

    pub fn render(&self, cursor: &mut ScrollCursor) -> TablePage {
        cursor.clamp_to(self.last_position());
        let start = cursor.position();
        let end = (start + self.window()).min(self.lines.len());

        TablePage {
            title: self.title.clone(),
            lines: self.lines[start..end].to_vec(),
            nav: NavLabels {
                down: (end < self.lines.len()).then_some("Down"),
                next: (start > 0).then_some("Up"),
                back: Some("Exit"),
            },
        }
    }
}

/// Lines pre-split into pages, one page per PgDn/PgUp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagedTable {
    pub title: String,
    pub pages: Vec<Vec<String>>,
}

impl PagedTable {
    #[must_use]
    pub fn new(title: &str, pages: Vec<Vec<String>>) -> Self {
        let mut pages: Vec<Vec<String>> = pages
            .into_iter()
            .filter(|page| !page.is_empty())
            .map(fit_lines)
            .collect();
        if pages.is_empty() {
            pages.push(vec![EMPTY_PLACEHOLDER.to_string()]);
        }
        Self {
            title: title.to_string(),
            pages,
        }
    }

    /// Chunk a flat list into pages that fit under the title row.
    #[must_use]
    pub fn from_lines(title: &str, lines: Vec<String>) -> Self {
        let pages = lines
            .chunks(TABLE_ROWS - 1)
            .map(<[String]>::to_vec)
            .collect();
        Self::new(title, pages)
    }

    pub fn render(&self, cursor: &mut ScrollCursor) -> TablePage {
        let last = self.pages.len().saturating_sub(1);
        cursor.clamp_to(last);
        let current = cursor.position();

        let title = if self.pages.len() > 1 {
            format!("{} ({}/{})", self.title, current + 1, self.pages.len())
        } else {
            self.title.clone()
        };

        TablePage {
            title: Some(title),
            lines: self.pages.get(current).cloned().unwrap_or_default(),
            nav: NavLabels {
                down: (current < last).then_some("PgDn"),
                next: (current > 0).then_some("PgUp"),
                back: Some("Exit"),
            },
        }
    }
}

/// Truncate each line to the panel width; an empty list gets a placeholder.
fn fit_lines(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        return vec![EMPTY_PLACEHOLDER.to_string()];
    }
    lines
        .into_iter()
        .map(|line| {
            if line.chars().count() > MAX_LINE_CHARS {
                line.chars().take(MAX_LINE_CHARS).collect()
            } else {
                line
            }
        })
        .collect()
}
