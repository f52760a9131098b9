//! Header navigation menus.
//!
//! "Work" lists the portfolio's buckets, each expandable into its projects,
//! followed by projects that belong to no bucket. "Contact" lists the
//! contact links. At most one menu is open at a time.

use folio_core::Portfolio;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Work,
    Contact,
}

impl MenuKind {
    pub fn label(self) -> &'static str {
        match self {
            MenuKind::Work => "Work",
            MenuKind::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Bucket { index: usize, expanded: bool },
    Project(String),
    Link(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub label: String,
    pub kind: RowKind,
    /// Nested under a bucket
    pub nested: bool,
}

/// What activating a row asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    ScrollTo(String),
    OpenLink(String),
    Expanded,
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    open: Option<MenuKind>,
    expanded: Option<usize>,
    cursor: usize,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_menu(&self) -> Option<MenuKind> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Open a menu, closing the other one; toggles when already open
    pub fn toggle(&mut self, kind: MenuKind) {
        if self.open == Some(kind) {
            self.close();
        } else {
            self.open = Some(kind);
            self.cursor = 0;
            self.expanded = None;
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.expanded = None;
        self.cursor = 0;
    }

    pub fn rows(&self, portfolio: &Portfolio) -> Vec<MenuRow> {
        match self.open {
            Some(MenuKind::Work) => self.work_rows(portfolio),
            Some(MenuKind::Contact) => portfolio
                .site
                .contact
                .links()
                .into_iter()
                .map(|(label, url)| MenuRow {
                    label: label.to_string(),
                    kind: RowKind::Link(url),
                    nested: false,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    fn work_rows(&self, portfolio: &Portfolio) -> Vec<MenuRow> {
        let mut rows = Vec::new();
        for (index, bucket) in portfolio.buckets.iter().enumerate() {
            let expanded = self.expanded == Some(index);
            rows.push(MenuRow {
                label: bucket.name.clone(),
                kind: RowKind::Bucket { index, expanded },
                nested: false,
            });
            if expanded {
                rows.extend(bucket.projects.iter().filter_map(|id| {
                    let project = portfolio.project(id).ok()?;
                    Some(MenuRow {
                        label: project.title.clone(),
                        kind: RowKind::Project(project.id.clone()),
                        nested: true,
                    })
                }));
            }
        }
        rows.extend(portfolio.unbucketed().into_iter().map(|p| MenuRow {
            label: p.title.clone(),
            kind: RowKind::Project(p.id.clone()),
            nested: false,
        }));
        rows
    }

    pub fn move_cursor(&mut self, delta: isize, portfolio: &Portfolio) {
        let len = self.rows(portfolio).len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn set_cursor(&mut self, row: usize, portfolio: &Portfolio) {
        let len = self.rows(portfolio).len();
        self.cursor = row.min(len.saturating_sub(1));
    }

    /// Expand (`true`) or collapse the bucket under the cursor
    pub fn set_expanded(&mut self, expand: bool, portfolio: &Portfolio) {
        let rows = self.rows(portfolio);
        let Some(row) = rows.get(self.cursor) else {
            return;
        };
        match row.kind {
            RowKind::Bucket { index, .. } => {
                self.expanded = expand.then_some(index);
            }
            RowKind::Project(_) if row.nested && !expand => {
                // Collapse the parent and land on it
                if let Some(parent) = rows[..self.cursor]
                    .iter()
                    .rposition(|r| matches!(r.kind, RowKind::Bucket { .. }))
                {
                    self.cursor = parent;
                }
                self.expanded = None;
            }
            _ => {}
        }
    }

    /// Activate the row under the cursor
    pub fn activate(&mut self, portfolio: &Portfolio) -> NavOutcome {
        let Some(row) = self.rows(portfolio).into_iter().nth(self.cursor) else {
            return NavOutcome::Nothing;
        };
        debug!("Menu activate: {}", row.label);
        match row.kind {
            RowKind::Bucket { index, expanded } => {
                self.expanded = if expanded { None } else { Some(index) };
                NavOutcome::Expanded
            }
            RowKind::Project(id) => {
                self.close();
                NavOutcome::ScrollTo(id)
            }
            RowKind::Link(url) => {
                self.close();
                NavOutcome::OpenLink(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio() -> Portfolio {
        Portfolio::from_toml(
            r#"
            [site]
            name = "Ada"
            [site.contact]
            email = "ada@example.com"
            linkedin = "https://linkedin.com/in/ada"

            [[project]]
            id = "a"
            title = "Alpha"
            media = ["a.jpg"]

            [[project]]
            id = "b"
            title = "Beta"
            media = ["b.jpg"]

            [[project]]
            id = "c"
            title = "Gamma"
            media = ["c.jpg"]

            [[bucket]]
            name = "Industrial"
            projects = ["a", "b"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_opening_one_menu_closes_the_other() {
        let mut nav = NavMenu::new();
        nav.toggle(MenuKind::Work);
        assert_eq!(nav.open_menu(), Some(MenuKind::Work));
        nav.toggle(MenuKind::Contact);
        assert_eq!(nav.open_menu(), Some(MenuKind::Contact));
        nav.toggle(MenuKind::Contact);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_work_rows_expand_buckets() {
        let p = portfolio();
        let mut nav = NavMenu::new();
        nav.toggle(MenuKind::Work);

        let labels: Vec<_> = nav.rows(&p).into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Industrial", "Gamma"]);

        assert_eq!(nav.activate(&p), NavOutcome::Expanded);
        let rows = nav.rows(&p);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].nested);
        assert_eq!(rows[2].kind, RowKind::Project("b".to_string()));

        nav.move_cursor(2, &p);
        assert_eq!(nav.activate(&p), NavOutcome::ScrollTo("b".to_string()));
        assert!(!nav.is_open());
    }

    #[test]
    fn test_collapse_from_nested_row() {
        let p = portfolio();
        let mut nav = NavMenu::new();
        nav.toggle(MenuKind::Work);
        nav.set_expanded(true, &p);
        nav.move_cursor(1, &p);
        nav.set_expanded(false, &p);
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.expanded(), None);
    }

    #[test]
    fn test_contact_links() {
        let p = portfolio();
        let mut nav = NavMenu::new();
        nav.toggle(MenuKind::Contact);
        assert_eq!(nav.rows(&p).len(), 2);
        nav.move_cursor(10, &p);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(
            nav.activate(&p),
            NavOutcome::OpenLink("https://linkedin.com/in/ada".to_string())
        );
    }
}
