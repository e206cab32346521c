// SPDX-License-Identifier: PMPL-1.0-or-later

//! The active-language state shared by every consumer.
//!
//! [`LanguageSelection`] is a cheap-to-clone handle: every clone observes the
//! same current language, so a switch made through one handle is visible
//! through all of them immediately. The application root builds it once and
//! passes it down explicitly; there is no global instance.
//!
//! `set` has three side effects besides the in-memory swap, all
//! fire-and-forget:
//!
//! 1. the new code is written to a [`PreferenceStore`] under [`STORAGE_KEY`];
//! 2. the code is mirrored into a [`LocaleAttribute`] (the `<html lang>`
//!    analogue);
//! 3. subscribers are called with the new [`Language`].
//!
//! A storage failure is logged and otherwise ignored. Concurrent `set`
//! calls are serialized up to the notification step, so the in-memory value,
//! the stored value and the attribute always name the same language.

mod catalog;
mod document;

pub use catalog::{default_languages, is_language_subtag, LanguageCatalog};
pub use document::{DocumentLocale, LocaleAttribute};

use crate::storage::{MemoryPreferenceStore, PreferenceStore, STORAGE_KEY};
use crate::types::Language;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Handle returned by [`LanguageSelection::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Language) + Send + Sync>;

struct Inner {
    current: RwLock<Language>,
    /// Held across the swap, persist and reflect steps of `set`.
    update: Mutex<()>,
    catalog: LanguageCatalog,
    store: Box<dyn PreferenceStore>,
    attribute: Box<dyn LocaleAttribute>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

/// Shared, observable "current language" value.
#[derive(Clone)]
pub struct LanguageSelection {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for LanguageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageSelection")
            .field("current", &self.current().code)
            .field("catalog", &self.inner.catalog.len())
            .finish()
    }
}

impl LanguageSelection {
    /// Restores the persisted choice if it names a catalog language,
    /// otherwise starts from the catalog default.
    pub fn initialize(
        catalog: LanguageCatalog,
        store: impl PreferenceStore + 'static,
        attribute: impl LocaleAttribute + 'static,
    ) -> Self {
        let restored = match store.load(STORAGE_KEY) {
            Ok(Some(code)) => {
                let found = catalog.find(&code).cloned();
                if found.is_none() {
                    tracing::debug!(code = %code, "persisted language is not in the catalog");
                }
                found
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "could not read persisted language");
                None
            }
        };
        let current = restored.unwrap_or_else(|| catalog.default_language().clone());
        attribute.reflect(&current.code);
        tracing::debug!(code = %current.code, "language selection initialised");

        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(current),
                update: Mutex::new(()),
                catalog,
                store: Box::new(store),
                attribute: Box::new(attribute),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Selection backed by in-memory storage and a private attribute.
    pub fn in_memory(catalog: LanguageCatalog) -> Self {
        Self::initialize(catalog, MemoryPreferenceStore::new(), DocumentLocale::new())
    }

    pub fn current(&self) -> Language {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_code(&self) -> String {
        self.current().code
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.inner.catalog
    }

    /// Switches the active language, then persists, reflects and notifies.
    pub fn set(&self, language: Language) {
        {
            let _update = self
                .inner
                .update
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *self
                .inner
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner) = language.clone();

            if let Err(err) = self.inner.store.save(STORAGE_KEY, &language.code) {
                tracing::warn!(code = %language.code, error = %err, "could not persist language choice");
            }
            self.inner.attribute.reflect(&language.code);
        }
        tracing::info!(code = %language.code, "active language changed");

        // Call listeners outside every lock so they may subscribe, read or set.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&language);
        }
    }

    /// Switches to the catalog language with `code`. Returns `false` and
    /// changes nothing when the code is not in the catalog.
    pub fn set_code(&self, code: &str) -> bool {
        match self.inner.catalog.find(code).cloned() {
            Some(language) => {
                self.set(language);
                true
            }
            None => false,
        }
    }

    /// Registers a callback invoked with every newly selected language.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Language) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a callback. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Channel-based observer for consumers that prefer polling a receiver,
    /// e.g. on another thread. Sends are dropped once the receiver is gone.
    pub fn watch(&self) -> (SubscriptionId, Receiver<Language>) {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribe(move |language| {
            let _ = tx.send(language.clone());
        });
        (id, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::UnavailableStore;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn starts_at_catalog_default() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        assert_eq!(selection.current_code(), "en");
    }

    #[test]
    fn clones_share_state() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        let other = selection.clone();
        assert!(selection.set_code("th"));
        assert_eq!(other.current_code(), "th");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        assert!(!selection.set_code("xx"));
        assert_eq!(selection.current_code(), "en");
    }

    #[test]
    fn storage_failure_does_not_block_switch() {
        let document = DocumentLocale::new();
        let selection =
            LanguageSelection::initialize(LanguageCatalog::default(), UnavailableStore, document.clone());
        assert_eq!(document.get().as_deref(), Some("en"));

        selection.set_code("ja");
        assert_eq!(selection.current_code(), "ja");
        assert_eq!(document.get().as_deref(), Some("ja"));
    }

    #[test]
    fn listeners_fire_until_unsubscribed() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = selection.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        selection.set_code("th");
        selection.set_code("fr");
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(selection.unsubscribe(id));
        assert!(!selection.unsubscribe(id));
        selection.set_code("de");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listener_may_read_selection() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (reader, sink) = (selection.clone(), Arc::clone(&seen));
        selection.subscribe(move |language| {
            assert_eq!(reader.current_code(), language.code);
            sink.lock().expect("lock").push(language.code.clone());
        });
        selection.set_code("zh");
        assert_eq!(*seen.lock().expect("lock"), vec!["zh".to_string()]);
    }

    #[test]
    fn concurrent_sets_leave_state_storage_and_attribute_agreeing() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let document = DocumentLocale::new();
        let selection =
            LanguageSelection::initialize(LanguageCatalog::default(), Arc::clone(&store), document.clone());

        let handles: Vec<_> = ["th", "ja", "zh", "fr", "de", "es"]
            .into_iter()
            .map(|code| {
                let selection = selection.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        selection.set_code(code);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("setter thread");
        }

        let current = selection.current_code();
        assert_eq!(store.load(STORAGE_KEY).expect("load").as_deref(), Some(current.as_str()));
        assert_eq!(document.get().as_deref(), Some(current.as_str()));
    }

    #[test]
    fn listener_may_switch_again() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        let handle = selection.clone();
        selection.subscribe(move |language| {
            if language.code == "th" {
                handle.set_code("ja");
            }
        });
        selection.set_code("th");
        assert_eq!(selection.current_code(), "ja");
    }

    #[test]
    fn watch_receives_changes() {
        let selection = LanguageSelection::in_memory(LanguageCatalog::default());
        let (_id, rx) = selection.watch();
        selection.set_code("es");
        assert_eq!(rx.try_recv().expect("event").code, "es");
        assert!(rx.try_recv().is_err());
    }
}
