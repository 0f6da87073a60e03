//! Todo Model
//!
//! Owns the todo list. Every mutation replaces the list, persists it and
//! then notifies the registered listener.

use log::{debug, error, warn};

use crate::config::AppConfig;
use crate::models::{next_id, Todo};
use crate::storage::{
    backup_key, decode_todos, encode_todos, StorageError, StorageResult, TodoStorage,
};

type Listener = Box<dyn FnMut(&[Todo])>;

pub struct TodoModel<S: TodoStorage> {
    todos: Vec<Todo>,
    storage: S,
    key: String,
    /// False while the stored value is unreadable and could not be backed up
    persist: bool,
    on_todo_list_changed: Option<Listener>,
}

impl<S: TodoStorage> TodoModel<S> {
    /// Model over an explicit list
    pub fn new(storage: S, key: impl Into<String>, todos: Vec<Todo>) -> Self {
        Self {
            todos,
            storage,
            key: key.into(),
            persist: true,
            on_todo_list_changed: None,
        }
    }

    /// Load the persisted list, or the configured seed when nothing is stored
    pub fn load(storage: S, config: &AppConfig) -> StorageResult<Self> {
        let todos = read_list(&storage, config)?;
        Ok(Self::new(storage, config.storage_key.clone(), todos))
    }

    /// Like `load`, but an unreadable list does not stop the app. The raw
    /// value is copied to `backup_key` and the seed is used. If the copy
    /// fails, nothing is written until the page is reloaded.
    pub fn open(mut storage: S, config: &AppConfig) -> Self {
        let key = config.storage_key.clone();
        match read_list(&storage, config) {
            Ok(todos) => Self::new(storage, key, todos),
            Err(e) => {
                error!("cannot load {:?}: {}; starting from seed", key, e);
                let persist = back_up(&mut storage, &key);
                let mut model = Self::new(storage, key, config.seed.clone());
                model.persist = persist;
                model
            }
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register the change listener, replacing any previous one
    pub fn bind_todo_list_changed(&mut self, listener: impl FnMut(&[Todo]) + 'static) {
        self.on_todo_list_changed = Some(Box::new(listener));
    }

    /// Append a new incomplete todo and return its id
    pub fn add(&mut self, text: &str) -> StorageResult<u32> {
        let id = next_id(&self.todos).ok_or(StorageError::IdsExhausted)?;
        self.todos.push(Todo::new(id, text));
        debug!("added todo {}", id);
        self.commit()?;
        Ok(id)
    }

    pub fn delete(&mut self, id: u32) -> StorageResult<()> {
        self.todos = self.todos.iter().filter(|todo| todo.id != id).cloned().collect();
        debug!("deleted todo {}", id);
        self.commit()
    }

    pub fn toggle(&mut self, id: u32) -> StorageResult<()> {
        self.todos = self
            .todos
            .iter()
            .map(|todo| if todo.id == id { todo.toggled() } else { todo.clone() })
            .collect();
        debug!("toggled todo {}", id);
        self.commit()
    }

    pub fn edit(&mut self, id: u32, text: &str) -> StorageResult<()> {
        self.todos = self
            .todos
            .iter()
            .map(|todo| if todo.id == id { todo.with_text(text) } else { todo.clone() })
            .collect();
        debug!("edited todo {}", id);
        self.commit()
    }

    /// Persist, then notify. The listener runs even when the write fails.
    fn commit(&mut self) -> StorageResult<()> {
        let written = if self.persist {
            encode_todos(&self.todos).and_then(|raw| self.storage.write(&self.key, &raw))
        } else {
            Err(StorageError::Unreadable(self.key.clone()))
        };
        if let Err(e) = &written {
            warn!("commit of {} todos not persisted: {}", self.todos.len(), e);
        }
        if let Some(listener) = self.on_todo_list_changed.as_mut() {
            listener(&self.todos);
        }
        written
    }
}

fn read_list<S: TodoStorage>(storage: &S, config: &AppConfig) -> StorageResult<Vec<Todo>> {
    match storage.read(&config.storage_key)? {
        Some(raw) => decode_todos(&raw),
        None => {
            debug!("no persisted list under {:?}, using seed", config.storage_key);
            Ok(config.seed.clone())
        }
    }
}

/// Copy the value under `key` to its backup key. True when `key` may now
/// be overwritten.
fn back_up<S: TodoStorage>(storage: &mut S, key: &str) -> bool {
    let backup = backup_key(key);
    let copied = storage
        .read(key)
        .and_then(|raw| match raw {
            Some(raw) => storage.write(&backup, &raw),
            None => Ok(()),
        });
    match copied {
        Ok(()) => {
            warn!("unreadable value under {:?} moved to {:?}", key, backup);
            true
        }
        Err(e) => {
            error!("cannot back up {:?}: {}; changes will not be saved", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn empty_model() -> TodoModel<MemoryStorage> {
        TodoModel::load(MemoryStorage::new(), &AppConfig::default()).unwrap()
    }

    fn persisted(model: &TodoModel<MemoryStorage>) -> Vec<Todo> {
        let raw = model.storage().read("todos").unwrap().unwrap();
        decode_todos(&raw).unwrap()
    }

    fn done(id: u32, text: &str) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            complete: true,
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut model = empty_model();
        for text in ["a", "b", "c", "d"] {
            model.add(text).unwrap();
        }
        let ids: Vec<u32> = model.todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let texts: Vec<&str> = model.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_ids_continue_from_max_after_delete() {
        let mut model = empty_model();
        model.add("a").unwrap();
        model.add("b").unwrap();
        model.add("c").unwrap();
        model.delete(2).unwrap();
        assert_eq!(model.add("d").unwrap(), 4);
        model.delete(4).unwrap();
        model.delete(3).unwrap();
        assert_eq!(model.add("e").unwrap(), 2);
    }

    #[test]
    fn test_add_after_max_id_is_refused() {
        let storage = MemoryStorage::with_entry(
            "todos",
            r#"[{"id":4294967295,"text":"last","complete":false}]"#,
        );
        let mut model = TodoModel::open(storage, &AppConfig::default());

        assert!(matches!(model.add("y"), Err(StorageError::IdsExhausted)));
        assert!(matches!(model.add("z"), Err(StorageError::IdsExhausted)));
        assert_eq!(model.todos(), &[Todo::new(u32::MAX, "last")]);
        assert_eq!(model.storage().writes(), 0);
    }

    #[test]
    fn test_delete_removes_only_match() {
        let mut model = empty_model();
        model.add("a").unwrap();
        model.add("b").unwrap();
        model.add("c").unwrap();
        model.delete(2).unwrap();
        assert_eq!(model.todos(), &[Todo::new(1, "a"), Todo::new(3, "c")]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut model = empty_model();
        model.add("a").unwrap();
        model.toggle(1).unwrap();
        assert!(model.todos()[0].complete);
        model.toggle(1).unwrap();
        assert!(!model.todos()[0].complete);
    }

    #[test]
    fn test_edit_replaces_text_of_match() {
        let mut model = empty_model();
        model.add("a").unwrap();
        model.add("b").unwrap();
        model.toggle(2).unwrap();
        model.edit(2, "bee").unwrap();
        assert_eq!(model.todos()[0], Todo::new(1, "a"));
        assert_eq!(model.todos()[1], done(2, "bee"));
    }

    #[test]
    fn test_walkthrough() {
        let mut model = empty_model();
        model.add("buy milk").unwrap();
        assert_eq!(model.todos(), &[Todo::new(1, "buy milk")]);
        model.toggle(1).unwrap();
        assert_eq!(model.todos(), &[done(1, "buy milk")]);
        assert_eq!(persisted(&model), model.todos());
        model.delete(1).unwrap();
        assert!(model.todos().is_empty());
        assert!(persisted(&model).is_empty());
    }

    #[test]
    fn test_every_mutation_commits_once() {
        let mut model = empty_model();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = seen.clone();
        model.bind_todo_list_changed(move |todos| sink.borrow_mut().push(todos.len()));

        model.add("a").unwrap();
        model.add("b").unwrap();
        model.toggle(1).unwrap();
        model.edit(2, "c").unwrap();
        model.delete(1).unwrap();
        model.delete(99).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 2, 2, 1, 1]);
        assert_eq!(model.storage().writes(), 6);
    }

    #[test]
    fn test_load_prefers_persisted_over_seed() {
        let storage =
            MemoryStorage::with_entry("todos", r#"[{"id":5,"text":"kept","complete":true}]"#);
        let config = AppConfig {
            seed: vec![Todo::new(1, "seed")],
            ..AppConfig::default()
        };
        let model = TodoModel::load(storage, &config).unwrap();
        assert_eq!(model.todos(), &[done(5, "kept")]);
    }

    #[test]
    fn test_load_uses_seed_when_empty() {
        let config = AppConfig {
            seed: vec![Todo::new(1, "seed")],
            ..AppConfig::default()
        };
        let mut model = TodoModel::load(MemoryStorage::new(), &config).unwrap();
        assert_eq!(model.todos(), &[Todo::new(1, "seed")]);
        assert_eq!(model.add("next").unwrap(), 2);
    }

    #[test]
    fn test_load_malformed_fails() {
        let storage = MemoryStorage::with_entry("todos", "not json");
        let result = TodoModel::load(storage, &AppConfig::default());
        assert!(matches!(result, Err(StorageError::Malformed(_))));
    }

    const UNREADABLE: &str = r#"[{"id":1.5,"text":"important","complete":false}]"#;

    #[test]
    fn test_open_backs_up_unreadable_list() {
        let storage = MemoryStorage::with_entry("todos", UNREADABLE);
        let mut model = TodoModel::open(storage, &AppConfig::default());
        assert!(model.todos().is_empty());

        model.add("new").unwrap();
        assert_eq!(persisted(&model), vec![Todo::new(1, "new")]);
        assert_eq!(
            model.storage().read("todos.corrupt").unwrap().as_deref(),
            Some(UNREADABLE)
        );
    }

    /// Memory storage that refuses backup writes
    struct NoBackupStorage(MemoryStorage);

    impl TodoStorage for NoBackupStorage {
        fn read(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
            if key.ends_with(".corrupt") {
                return Err(StorageError::Write(format!("{}: quota exceeded", key)));
            }
            self.0.write(key, value)
        }
    }

    #[test]
    fn test_open_keeps_unreadable_list_when_backup_fails() {
        let storage = NoBackupStorage(MemoryStorage::with_entry("todos", UNREADABLE));
        let mut model = TodoModel::open(storage, &AppConfig::default());
        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        model.bind_todo_list_changed(move |_| *counter.borrow_mut() += 1);

        assert!(matches!(model.add("new"), Err(StorageError::Unreadable(_))));
        assert_eq!(model.todos(), &[Todo::new(1, "new")]);
        assert_eq!(*notified.borrow(), 1);
        assert_eq!(
            model.storage().read("todos").unwrap().as_deref(),
            Some(UNREADABLE)
        );
        assert_eq!(model.storage().0.writes(), 0);
    }

    struct FullStorage;

    impl TodoStorage for FullStorage {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Write(format!("{}: quota exceeded", key)))
        }
    }

    #[test]
    fn test_failed_write_still_notifies() {
        let mut model = TodoModel::new(FullStorage, "todos", Vec::new());
        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        model.bind_todo_list_changed(move |_| *counter.borrow_mut() += 1);

        assert!(matches!(model.add("a"), Err(StorageError::Write(_))));
        assert_eq!(model.todos().len(), 1);
        assert_eq!(*notified.borrow(), 1);
    }
}
