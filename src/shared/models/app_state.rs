use std::sync::Arc;

use crate::{data_access::data_context::DataContext, settings::Settings};

pub struct AppState {
    pub data_context: DataContext,
    pub settings: Settings,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(data_context: DataContext, settings: Settings) -> SharedState {
        Arc::new(AppState {
            data_context,
            settings,
        })
    }
}
