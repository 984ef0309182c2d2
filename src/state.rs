use crate::{config::Config, store::DynPostStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: DynPostStore,
    pub config: Config,
}

impl FromRef<AppState> for DynPostStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
