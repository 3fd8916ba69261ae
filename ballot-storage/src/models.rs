use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::schema::StorageKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    #[must_use]
    pub const fn new(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> + '_ {
        self.items.iter()
    }

    /// Appends an open item and returns its id.
    pub fn add(&mut self, text: &str) -> Result<u32, StorageError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StorageError::EmptyTodo);
        }
        let id = self
            .items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
            .ok_or(StorageError::IdsExhausted {
                key: StorageKey::Todos,
            })?;
        self.items.push(TodoItem {
            id,
            text: text.to_owned(),
            done: false,
        });
        Ok(id)
    }

    /// Flips the done flag, returning the new state.
    pub fn toggle(&mut self, id: u32) -> Result<bool, StorageError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StorageError::NotFound {
                key: StorageKey::Todos,
                id,
            })?;
        item.done = !item.done;
        Ok(item.done)
    }

    pub fn remove(&mut self, id: u32) -> Result<TodoItem, StorageError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StorageError::NotFound {
                key: StorageKey::Todos,
                id,
            })?;
        Ok(self.items.remove(position))
    }
}
