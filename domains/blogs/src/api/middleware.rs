//! Blogs domain state and auth backend integration

use axum::extract::FromRef;
use folio_auth::AuthBackend;
use folio_media::MediaResolver;

use crate::repository::BlogStore;

/// Application state for the Blogs domain
#[derive(Clone)]
pub struct BlogsState {
    pub store: BlogStore,
    pub auth: AuthBackend,
    pub media: MediaResolver,
}

impl FromRef<BlogsState> for AuthBackend {
    fn from_ref(state: &BlogsState) -> Self {
        state.auth.clone()
    }
}
