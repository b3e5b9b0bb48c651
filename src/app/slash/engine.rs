use crate::app::slash::catalog::{
    Catalog, CommandAction, CommandLeaf, CommandMenu, CommandNode,
};
use crate::domain::models::EditorContext;

/// A command as presented to the navigator and the popup widget, with its
/// effective action already resolved (menus become prefix inserters).
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredCommand {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_menu: bool,
    pub action: CommandAction,
}

/// A group of the filtered view. `source_id` is set only on the synthetic
/// group produced by entering a menu namespace; the navigator's ascend
/// transition keys on its presence.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGroup {
    pub title: String,
    pub source_id: Option<String>,
    pub commands: Vec<FilteredCommand>,
}

/// Whether the palette may open at all in the current trigger context.
#[must_use]
pub fn allow(ctx: &EditorContext) -> bool {
    !ctx.in_raw_html
}

enum Entry<'a> {
    Leaf(&'a CommandLeaf),
    Menu(&'a CommandMenu),
}

impl Entry<'_> {
    fn title(&self) -> &'static str {
        match self {
            Entry::Leaf(leaf) => leaf.title,
            Entry::Menu(menu) => menu.title,
        }
    }

    fn description(&self) -> Option<&'static str> {
        match self {
            Entry::Leaf(leaf) => leaf.description,
            Entry::Menu(menu) => menu.description,
        }
    }

    fn search_terms(&self) -> &'static [&'static str] {
        match self {
            Entry::Leaf(leaf) => leaf.search_terms,
            Entry::Menu(menu) => menu.search_terms,
        }
    }

    fn survives(&self, ctx: &EditorContext) -> bool {
        let predicate = match self {
            Entry::Leaf(leaf) => leaf.predicate,
            Entry::Menu(menu) => menu.predicate,
        };
        predicate.map_or(true, |p| p(ctx))
    }

    fn matches(&self, search: &str) -> bool {
        if self.title().to_lowercase().contains(search) {
            return true;
        }
        if let Some(desc) = self.description() {
            if desc.to_lowercase().contains(search) {
                return true;
            }
        }
        self.search_terms()
            .iter()
            .any(|term| term.to_lowercase().contains(search))
    }

    fn resolve(&self) -> FilteredCommand {
        match self {
            Entry::Leaf(leaf) => FilteredCommand {
                id: leaf.id.to_string(),
                title: leaf.title.to_string(),
                description: leaf.description.map(str::to_string),
                is_menu: false,
                action: leaf.action.clone(),
            },
            // Selecting a menu never runs a document action directly; it
            // re-inserts the namespace prefix, which re-enters the trigger
            // and routes the next filter call through the namespace path.
            Entry::Menu(menu) => FilteredCommand {
                id: menu.id.to_string(),
                title: menu.title.to_string(),
                description: menu.description.map(str::to_string),
                is_menu: true,
                action: CommandAction::InsertInline(format!("/{}.", menu.id)),
            },
        }
    }
}

/// Menu ids present anywhere in the catalog, as `"<id>."` prefixes. Entries
/// with blank ids are skipped; `validate` flags them at startup.
fn menu_prefixes(catalog: &Catalog) -> Vec<(String, &CommandMenu)> {
    let mut prefixes: Vec<(String, &CommandMenu)> = catalog
        .iter()
        .flat_map(|group| &group.commands)
        .filter_map(|node| match node {
            CommandNode::Menu(menu) if !menu.id.trim().is_empty() => {
                Some((format!("{}.", menu.id.to_lowercase()), menu))
            }
            _ => None,
        })
        .collect();
    // Longest prefix wins on overlapping matches; the stable sort keeps
    // catalog order for equal lengths.
    prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    prefixes
}

/// Filter the catalog against the in-progress query. Pure: same inputs,
/// same output, no side effects.
#[must_use]
pub fn filter(catalog: &Catalog, query: &str, ctx: &EditorContext) -> Vec<FilteredGroup> {
    let mut search = query.to_lowercase();

    // Namespace entry: a query like "variable.na" switches the active view
    // to that menu's children and strips the prefix from the search string.
    let mut namespace: Option<&CommandMenu> = None;
    for (prefix, menu) in menu_prefixes(catalog) {
        if search.starts_with(&prefix) {
            search = search[prefix.len()..].to_string();
            namespace = Some(menu);
            break;
        }
    }

    let groups: Vec<(String, Option<String>, Vec<Entry<'_>>)> = match namespace {
        Some(menu) => vec![(
            menu.title.to_string(),
            Some(menu.id.to_string()),
            menu.children.iter().map(Entry::Leaf).collect(),
        )],
        None => catalog
            .iter()
            .map(|group| {
                let entries = group
                    .commands
                    .iter()
                    .map(|node| match node {
                        CommandNode::Leaf(leaf) => Entry::Leaf(leaf),
                        CommandNode::Menu(menu) => Entry::Menu(menu),
                    })
                    .collect();
                (group.title.to_string(), None, entries)
            })
            .collect(),
    };

    groups
        .into_iter()
        .filter_map(|(title, source_id, entries)| {
            let commands: Vec<FilteredCommand> = entries
                .into_iter()
                .filter(|entry| entry.survives(ctx))
                .filter(|entry| search.is_empty() || entry.matches(&search))
                .map(|entry| entry.resolve())
                .collect();

            if commands.is_empty() {
                None
            } else {
                Some(FilteredGroup {
                    title,
                    source_id,
                    commands,
                })
            }
        })
        .collect()
}
