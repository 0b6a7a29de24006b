//! Selected or editing item reference
//!
//! A selection holds only an id. It is resolved against the current items
//! every time it is read, so it can never point at a removed item.

use super::id::ItemId;
use super::item::ListItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    id: Option<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: ItemId) {
        self.id = Some(id);
    }

    pub fn clear(&mut self) {
        self.id = None;
    }

    /// The selected id, without checking it still exists
    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.id == Some(id)
    }

    /// Clears the selection if it points at `removed`
    pub fn forget(&mut self, removed: ItemId) {
        if self.id == Some(removed) {
            self.id = None;
        }
    }

    /// Looks up the selected item, clearing a dangling selection
    pub fn resolve<'a, T: ListItem>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let id = self.id?;
        let found = items.iter().find(|item| item.id() == id);
        if found.is_none() {
            self.id = None;
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Todo, TodoDraft};
    use chrono::Utc;

    fn todos() -> Vec<Todo> {
        vec![
            Todo::create(ItemId::new(0), Utc::now(), TodoDraft::new("zero")).unwrap(),
            Todo::create(ItemId::new(1), Utc::now(), TodoDraft::new("one")).unwrap(),
        ]
    }

    #[test]
    fn resolves_selected_item() {
        let items = todos();
        let mut selection = Selection::new();
        selection.select(ItemId::new(1));

        assert_eq!(selection.resolve(&items).map(|t| t.text.as_str()), Some("one"));
        assert!(selection.is_selected(ItemId::new(1)));
    }

    #[test]
    fn id_zero_is_a_valid_selection() {
        let items = todos();
        let mut selection = Selection::new();
        selection.select(ItemId::new(0));

        assert_eq!(selection.resolve(&items).map(|t| t.text.as_str()), Some("zero"));
    }

    #[test]
    fn dangling_selection_clears_itself() {
        let mut items = todos();
        let mut selection = Selection::new();
        selection.select(ItemId::new(1));

        items.retain(|t| t.id != ItemId::new(1));

        assert!(selection.resolve(&items).is_none());
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn forget_only_clears_matching_id() {
        let mut selection = Selection::new();
        selection.select(ItemId::new(1));

        selection.forget(ItemId::new(2));
        assert_eq!(selection.id(), Some(ItemId::new(1)));

        selection.forget(ItemId::new(1));
        assert_eq!(selection.id(), None);
    }
}
