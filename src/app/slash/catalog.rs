use crate::domain::models::{Block, EditorContext};
use anyhow::{bail, Result};
use std::collections::HashSet;

/// Decides whether a command is offered given the current editor state.
/// `false` hides the command from the filtered view entirely.
pub type ActivationPredicate = fn(&EditorContext) -> bool;

/// What selecting a command does to the host document.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandAction {
    /// Replace the trigger text with nothing and insert a block after the
    /// one being edited. Closes the palette.
    InsertBlock(Block),
    /// Replace the trigger text with literal text. The palette closes unless
    /// the inserted text re-establishes a trigger; menu descent relies on
    /// exactly that by inserting `/<id>.`.
    InsertInline(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandLeaf {
    /// Unique within its containing list.
    pub id: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub search_terms: &'static [&'static str],
    pub predicate: Option<ActivationPredicate>,
    pub action: CommandAction,
}

/// A command that opens a nested list instead of acting directly. Only one
/// level of nesting exists: children are always leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMenu {
    pub id: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub search_terms: &'static [&'static str],
    pub predicate: Option<ActivationPredicate>,
    pub children: Vec<CommandLeaf>,
}

/// Leaf vs menu is a construction-time fact, not a runtime shape check.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandNode {
    Leaf(CommandLeaf),
    Menu(CommandMenu),
}

impl CommandNode {
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            CommandNode::Leaf(leaf) => leaf.id,
            CommandNode::Menu(menu) => menu.id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            CommandNode::Leaf(leaf) => leaf.title,
            CommandNode::Menu(menu) => menu.title,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        match self {
            CommandNode::Leaf(leaf) => leaf.description,
            CommandNode::Menu(menu) => menu.description,
        }
    }

    #[must_use]
    pub fn search_terms(&self) -> &'static [&'static str] {
        match self {
            CommandNode::Leaf(leaf) => leaf.search_terms,
            CommandNode::Menu(menu) => menu.search_terms,
        }
    }

    #[must_use]
    pub fn predicate(&self) -> Option<ActivationPredicate> {
        match self {
            CommandNode::Leaf(leaf) => leaf.predicate,
            CommandNode::Menu(menu) => menu.predicate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandGroup {
    pub title: &'static str,
    pub commands: Vec<CommandNode>,
}

pub type Catalog = Vec<CommandGroup>;

/// Static-catalog sanity pass, run once at startup before the terminal is
/// entered. The engine tolerates a bad entry at runtime by skipping it, but a
/// broken default catalog is a bug that should fail loudly here.
pub fn validate(catalog: &Catalog) -> Result<()> {
    let mut menu_ids: HashSet<&str> = HashSet::new();

    for group in catalog {
        let mut seen: HashSet<&str> = HashSet::new();
        for node in &group.commands {
            let id = node.id();
            if id.trim().is_empty() {
                bail!("command with empty id in group {:?}", group.title);
            }
            if id.contains('.') || id.contains(char::is_whitespace) {
                bail!("command id {id:?} must not contain '.' or whitespace");
            }
            if id != id.to_lowercase() {
                bail!("command id {id:?} must be lowercase");
            }
            if !seen.insert(id) {
                bail!("duplicate command id {id:?} in group {:?}", group.title);
            }

            if let CommandNode::Menu(menu) = node {
                if !menu_ids.insert(menu.id) {
                    bail!("menu id {id:?} appears more than once in the catalog");
                }
                if menu.children.is_empty() {
                    bail!("menu {id:?} has no children");
                }
                let mut child_seen: HashSet<&str> = HashSet::new();
                for child in &menu.children {
                    if child.id.trim().is_empty() {
                        bail!("menu {id:?} has a child with an empty id");
                    }
                    if !child_seen.insert(child.id) {
                        bail!("duplicate child id {:?} in menu {id:?}", child.id);
                    }
                }
            }
        }
    }
    Ok(())
}

fn no_footer_yet(ctx: &EditorContext) -> bool {
    !ctx.has_footer
}

fn variable_leaf(id: &'static str, title: &'static str, var: &'static str) -> CommandLeaf {
    CommandLeaf {
        id,
        title,
        description: Some("Insert a personalization variable"),
        search_terms: &["variable", "merge", "personalize"],
        predicate: None,
        action: CommandAction::InsertInline(format!("{{{{{var}}}}}")),
    }
}

fn social_leaf(id: &'static str, title: &'static str, url: &'static str) -> CommandLeaf {
    CommandLeaf {
        id,
        title,
        description: Some("Insert a social link button"),
        search_terms: &["social", "link", "profile"],
        predicate: None,
        action: CommandAction::InsertBlock(Block::Button {
            label: title.to_string(),
            url: url.to_string(),
        }),
    }
}

/// The built-in command catalog. Constructed once and treated as immutable.
#[must_use]
pub fn default_catalog() -> Catalog {
    vec![
        CommandGroup {
            title: "Blocks",
            commands: vec![
                CommandNode::Leaf(CommandLeaf {
                    id: "text",
                    title: "Text",
                    description: Some("Plain paragraph text"),
                    search_terms: &["paragraph", "body"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Text {
                        text: String::new(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "h1",
                    title: "Heading 1",
                    description: Some("Large section heading"),
                    search_terms: &["title", "heading", "big"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Heading {
                        level: 1,
                        text: String::new(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "h2",
                    title: "Heading 2",
                    description: Some("Medium section heading"),
                    search_terms: &["subtitle", "heading"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Heading {
                        level: 2,
                        text: String::new(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "h3",
                    title: "Heading 3",
                    description: Some("Small section heading"),
                    search_terms: &["heading", "small"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Heading {
                        level: 3,
                        text: String::new(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "quote",
                    title: "Quote",
                    description: Some("Pull quote or citation"),
                    search_terms: &["blockquote", "citation"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Quote {
                        text: String::new(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "button",
                    title: "Button",
                    description: Some("Call-to-action link"),
                    search_terms: &["cta", "link", "action"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Button {
                        label: "Click me".to_string(),
                        url: "https://".to_string(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "image",
                    title: "Image",
                    description: Some("Image from a URL"),
                    search_terms: &["picture", "photo", "img"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Image {
                        src: "https://".to_string(),
                        alt: String::new(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "divider",
                    title: "Divider",
                    description: Some("Horizontal rule"),
                    search_terms: &["hr", "rule", "separator"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Divider),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "spacer",
                    title: "Spacer",
                    description: Some("Vertical whitespace"),
                    search_terms: &["space", "gap", "margin"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Spacer),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "footer",
                    title: "Footer",
                    description: Some("Unsubscribe footer (one per template)"),
                    search_terms: &["unsubscribe", "legal"],
                    predicate: Some(no_footer_yet),
                    action: CommandAction::InsertBlock(Block::Footer {
                        text: "You received this email because… {{unsubscribe_url}}".to_string(),
                    }),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "html",
                    title: "HTML",
                    description: Some("Raw HTML block"),
                    search_terms: &["code", "raw", "markup"],
                    predicate: None,
                    action: CommandAction::InsertBlock(Block::Html {
                        source: String::new(),
                    }),
                }),
            ],
        },
        CommandGroup {
            title: "Personalization",
            commands: vec![
                CommandNode::Menu(CommandMenu {
                    id: "variable",
                    title: "Variable",
                    description: Some("Insert a merge variable"),
                    search_terms: &["merge", "personalize", "placeholder"],
                    predicate: None,
                    children: vec![
                        variable_leaf("name", "Name", "user.name"),
                        variable_leaf("email", "Email", "user.email"),
                        variable_leaf("company", "Company", "user.company"),
                        variable_leaf("unsubscribe", "Unsubscribe URL", "unsubscribe_url"),
                        variable_leaf("date", "Current date", "date"),
                    ],
                }),
                CommandNode::Menu(CommandMenu {
                    id: "social",
                    title: "Social link",
                    description: Some("Insert a social profile button"),
                    search_terms: &["twitter", "github", "linkedin"],
                    predicate: None,
                    children: vec![
                        social_leaf("twitter", "Twitter / X", "https://x.com/"),
                        social_leaf("github", "GitHub", "https://github.com/"),
                        social_leaf("linkedin", "LinkedIn", "https://linkedin.com/in/"),
                    ],
                }),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        validate(&default_catalog()).unwrap();
    }

    #[test]
    fn rejects_duplicate_ids_within_a_group() {
        let catalog = vec![CommandGroup {
            title: "G",
            commands: vec![
                CommandNode::Leaf(CommandLeaf {
                    id: "dup",
                    title: "A",
                    description: None,
                    search_terms: &[],
                    predicate: None,
                    action: CommandAction::InsertInline("a".to_string()),
                }),
                CommandNode::Leaf(CommandLeaf {
                    id: "dup",
                    title: "B",
                    description: None,
                    search_terms: &[],
                    predicate: None,
                    action: CommandAction::InsertInline("b".to_string()),
                }),
            ],
        }];
        assert!(validate(&catalog).is_err());
    }

    #[test]
    fn rejects_empty_and_dotted_ids() {
        let empty = vec![CommandGroup {
            title: "G",
            commands: vec![CommandNode::Leaf(CommandLeaf {
                id: "",
                title: "A",
                description: None,
                search_terms: &[],
                predicate: None,
                action: CommandAction::InsertInline("a".to_string()),
            })],
        }];
        assert!(validate(&empty).is_err());

        let dotted = vec![CommandGroup {
            title: "G",
            commands: vec![CommandNode::Leaf(CommandLeaf {
                id: "a.b",
                title: "A",
                description: None,
                search_terms: &[],
                predicate: None,
                action: CommandAction::InsertInline("a".to_string()),
            })],
        }];
        assert!(validate(&dotted).is_err());
    }

    #[test]
    fn rejects_childless_menu() {
        let catalog = vec![CommandGroup {
            title: "G",
            commands: vec![CommandNode::Menu(CommandMenu {
                id: "empty",
                title: "Empty",
                description: None,
                search_terms: &[],
                predicate: None,
                children: vec![],
            })],
        }];
        assert!(validate(&catalog).is_err());
    }
}
