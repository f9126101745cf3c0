//! Token Store
//!
//! The bearer token lives in browser local storage under `token`. Pages
//! reach it through an injected [`TokenHandle`] rather than touching
//! storage directly.

use leptos::*;
use std::ops::Deref;
use std::rc::Rc;
use thiserror::Error;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";

/// Persisted home of the session token
pub trait TokenStore {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Local storage is not available")]
    Unavailable,

    #[error("Local storage refused the write: {0}")]
    Rejected(String),
}

/// `window.localStorage` backed store
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokens;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokens {
    fn get_token(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn set_token(&self, token: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(TOKEN_KEY, token)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}

/// Shared handle provided through Leptos context
#[derive(Clone)]
pub struct TokenHandle(Rc<dyn TokenStore>);

impl TokenHandle {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self(Rc::new(store))
    }
}

impl Deref for TokenHandle {
    type Target = dyn TokenStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Provide the token store to the component tree
pub fn provide_token_store(handle: TokenHandle) {
    provide_context(handle);
}

/// Token store provided by [`provide_token_store`]
pub fn use_token_store() -> TokenHandle {
    use_context::<TokenHandle>().expect("TokenHandle not found")
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryTokens;
    use super::*;

    #[test]
    fn test_handle_derefs_to_store() {
        let handle = TokenHandle::new(MemoryTokens::default());
        assert_eq!(handle.get_token(), None);

        handle.set_token("abc").unwrap();
        let copy = handle.clone();
        assert_eq!(copy.get_token().as_deref(), Some("abc"));
    }
}
