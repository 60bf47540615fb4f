//! The process-wide authenticated flag.
//!
//! # Invariants
//! - Storage key is `authenticated`; only the value `true` means
//!   authenticated. Any other value, or no value, means unauthenticated.
//! - Only `AuthGate` can change the flag; everything else reads it.

use crate::auth::store::{SessionStore, StoreResult};
use log::{error, info, warn};

pub const SESSION_KEY: &str = "authenticated";
pub const AUTHENTICATED_VALUE: &str = "true";

pub struct SessionContext {
    store: Box<dyn SessionStore>,
    authenticated: bool,
}

impl SessionContext {
    /// Loads the flag from `store`.
    ///
    /// A storage read failure is logged and treated as unauthenticated.
    pub fn load(store: Box<dyn SessionStore>) -> Self {
        let authenticated = match store.get(SESSION_KEY) {
            Ok(value) => {
                let authenticated = value.as_deref() == Some(AUTHENTICATED_VALUE);
                info!("event=session_load module=session status=ok authenticated={authenticated}");
                authenticated
            }
            Err(err) => {
                warn!(
                    "event=session_load module=session status=error authenticated=false error={err}"
                );
                false
            }
        };
        Self {
            store,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Raw stored value under [`SESSION_KEY`].
    pub fn stored_value(&self) -> StoreResult<Option<String>> {
        self.store.get(SESSION_KEY)
    }

    /// Persists the flag, then flips it. Nothing changes if the write fails.
    pub(crate) fn mark_authenticated(&mut self) -> StoreResult<()> {
        self.store.set(SESSION_KEY, AUTHENTICATED_VALUE)?;
        self.authenticated = true;
        Ok(())
    }

    /// Clears the flag immediately; a storage failure is reported but the
    /// in-memory flag is already cleared.
    pub(crate) fn clear(&mut self) -> StoreResult<()> {
        self.authenticated = false;
        self.store.remove(SESSION_KEY).inspect_err(|err| {
            error!("event=session_clear module=session status=error error={err}");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionContext, SESSION_KEY};
    use crate::auth::store::{MemorySessionStore, SessionStore, StoreError, StoreResult};
    use crate::db::DbError;

    struct UnreadableStore;

    impl SessionStore for UnreadableStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn only_literal_true_counts_as_authenticated() {
        for (value, expected) in [("true", true), ("TRUE", false), ("1", false), ("", false)] {
            let mut store = MemorySessionStore::new();
            store.set(SESSION_KEY, value).expect("seed");
            let session = SessionContext::load(Box::new(store));
            assert_eq!(session.is_authenticated(), expected, "value {value:?}");
        }
        let session = SessionContext::load(Box::new(MemorySessionStore::new()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn mark_and_clear_flip_the_flag() {
        let mut session = SessionContext::load(Box::new(MemorySessionStore::new()));
        session.mark_authenticated().expect("mark");
        assert!(session.is_authenticated());
        session.clear().expect("clear");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn read_failure_loads_as_unauthenticated() {
        let session = SessionContext::load(Box::new(UnreadableStore));
        assert!(!session.is_authenticated());
        assert!(session.stored_value().is_err());
    }
}
