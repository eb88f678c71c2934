//! Key/value storage abstraction over browser `localStorage`/`sessionStorage`

use crate::error::ClientResult;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// String key/value store with the semantics of the Web Storage API.
///
/// Every call is atomic on its own; there are no transactions.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> ClientResult<()> {
        (**self).clear()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> ClientResult<()> {
        (**self).clear()
    }
}

/// In-memory store, used off-browser and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `items`
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RefCell::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}
