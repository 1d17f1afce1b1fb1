//! Command-bar page table and expansion.
//!
//! Pages are static configuration. A group item is an action, a link to a
//! nested page, or a `ChildPages` marker that transcludes another page's
//! items in place. Transclusion is a single static flattening pass, one
//! level deep: a marker inside a transcluded page is a configuration error,
//! not a recursion site. That keeps the graph finite without cycle
//! detection.

use std::collections::HashSet;

use thiserror::Error;

use crate::registry::{self, ActionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Root,
    WorkspaceActions,
    ViewOptions,
}

impl PageId {
    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Root => "root",
            PageId::WorkspaceActions => "workspace-actions",
            PageId::ViewOptions => "view-options",
        }
    }
}

pub struct Page {
    pub id: PageId,
    pub title: Option<&'static str>,
    pub parent: Option<PageId>,
    pub groups: &'static [Group],
}

pub struct Group {
    pub label: &'static str,
    pub items: &'static [GroupItem],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupItem {
    Action(ActionId),
    Page(PageId),
    ChildPages(PageId),
}

/// A page after all `ChildPages` markers have been flattened away. Only
/// resolved pages are handed to render surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    pub id: PageId,
    pub title: Option<&'static str>,
    pub groups: Vec<ResolvedGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub label: &'static str,
    pub items: Vec<ResolvedItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedItem {
    Action(ActionId),
    Page(PageId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate action id `{0}` in catalog")]
    DuplicateActionId(&'static str),
    #[error("action id `{0}` missing from catalog")]
    MissingActionId(&'static str),
    #[error("duplicate page id `{0}` in page table")]
    DuplicatePage(&'static str),
    #[error("page `{0}` references unknown page `{1}`")]
    UnknownPage(&'static str, &'static str),
    #[error("page `{0}` transcludes `{1}`, which itself contains a child-pages marker")]
    NestedTransclusion(&'static str, &'static str),
    #[error("page `{0}` has a cyclic or dangling parent chain")]
    BadParentChain(&'static str),
}

#[derive(Clone, Copy)]
pub struct PageGraph {
    pages: &'static [Page],
}

impl PageGraph {
    pub fn builtin() -> Self {
        Self {
            pages: registry::pages(),
        }
    }

    pub fn root(&self) -> PageId {
        PageId::Root
    }

    fn lookup(&self, id: PageId) -> Option<&'static Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn get(&self, id: PageId) -> &'static Page {
        self.lookup(id)
            .unwrap_or_else(|| panic!("page `{}` is not in the page table", id.as_str()))
    }

    /// Expand a page's groups, splicing each `ChildPages` marker with the
    /// referenced page's items in declared order. Resolution is
    /// deterministic and never duplicates an item.
    pub fn resolve(&self, id: PageId) -> ResolvedPage {
        let page = self.get(id);
        let groups = page
            .groups
            .iter()
            .map(|group| ResolvedGroup {
                label: group.label,
                items: group
                    .items
                    .iter()
                    .flat_map(|item| self.expand_item(page, *item))
                    .collect(),
            })
            .collect();
        ResolvedPage {
            id: page.id,
            title: page.title,
            groups,
        }
    }

    fn expand_item(&self, page: &Page, item: GroupItem) -> Vec<ResolvedItem> {
        match item {
            GroupItem::Action(id) => vec![ResolvedItem::Action(id)],
            GroupItem::Page(id) => vec![ResolvedItem::Page(id)],
            GroupItem::ChildPages(target) => {
                let child = self.get(target);
                child
                    .groups
                    .iter()
                    .flat_map(|g| g.items.iter())
                    .map(|item| match item {
                        GroupItem::Action(id) => ResolvedItem::Action(*id),
                        GroupItem::Page(id) => ResolvedItem::Page(*id),
                        GroupItem::ChildPages(_) => panic!(
                            "page `{}` transcludes `{}`, which itself transcludes",
                            page.id.as_str(),
                            target.as_str()
                        ),
                    })
                    .collect()
            }
        }
    }

    /// Startup self-check over the whole page table: unique page ids, no
    /// dangling references, no nested transclusion, and a finite acyclic
    /// parent chain from every page to the root.
    pub fn self_check(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        for page in self.pages {
            if !ids.insert(page.id) {
                return Err(ConfigError::DuplicatePage(page.id.as_str()));
            }
        }

        for page in self.pages {
            for group in page.groups {
                for item in group.items {
                    let target = match item {
                        GroupItem::Action(_) => continue,
                        GroupItem::Page(id) | GroupItem::ChildPages(id) => *id,
                    };
                    let Some(child) = self.lookup(target) else {
                        return Err(ConfigError::UnknownPage(
                            page.id.as_str(),
                            target.as_str(),
                        ));
                    };
                    if matches!(item, GroupItem::ChildPages(_))
                        && child
                            .groups
                            .iter()
                            .flat_map(|g| g.items.iter())
                            .any(|i| matches!(i, GroupItem::ChildPages(_)))
                    {
                        return Err(ConfigError::NestedTransclusion(
                            page.id.as_str(),
                            target.as_str(),
                        ));
                    }
                }
            }

            // Walk the parent chain; it must reach a parentless page in at
            // most `pages.len()` hops.
            let mut current = page;
            let mut hops = 0;
            while let Some(parent) = current.parent {
                hops += 1;
                if hops > self.pages.len() {
                    return Err(ConfigError::BadParentChain(page.id.as_str()));
                }
                match self.lookup(parent) {
                    Some(next) => current = next,
                    None => return Err(ConfigError::BadParentChain(page.id.as_str())),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pages_pass_self_check() {
        PageGraph::builtin().self_check().unwrap();
    }

    #[test]
    fn test_parent_chains_terminate_at_root() {
        let graph = PageGraph::builtin();
        let root = graph.get(graph.root());
        assert!(root.parent.is_none());
        for id in [PageId::WorkspaceActions, PageId::ViewOptions] {
            assert_eq!(graph.get(id).parent, Some(PageId::Root));
        }
    }

    #[test]
    fn test_root_expands_workspace_actions_in_order() {
        let graph = PageGraph::builtin();
        let resolved = graph.resolve(PageId::Root);
        let workspace_group = &resolved.groups[0];
        assert_eq!(workspace_group.label, "Workspace");
        assert_eq!(
            workspace_group.items,
            vec![
                ResolvedItem::Action(ActionId::DuplicateWorkspace),
                ResolvedItem::Action(ActionId::PinWorkspace),
                ResolvedItem::Action(ActionId::ArchiveWorkspace),
                ResolvedItem::Action(ActionId::DeleteWorkspace),
            ]
        );
    }

    #[test]
    fn test_resolution_keeps_links_and_never_duplicates() {
        let graph = PageGraph::builtin();
        let resolved = graph.resolve(PageId::Root);
        let mut actions = Vec::new();
        let mut links = Vec::new();
        for group in &resolved.groups {
            for item in &group.items {
                match item {
                    ResolvedItem::Action(id) => actions.push(*id),
                    ResolvedItem::Page(id) => links.push(*id),
                }
            }
        }
        assert_eq!(links, vec![PageId::ViewOptions]);
        let unique: HashSet<ActionId> = actions.iter().copied().collect();
        assert_eq!(unique.len(), actions.len());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let graph = PageGraph::builtin();
        assert_eq!(graph.resolve(PageId::Root), graph.resolve(PageId::Root));
    }
}
