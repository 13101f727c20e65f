//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
    pub mod errors;
    pub mod validation;
}

pub use shared::models::*;
pub use shared::dto::*;
pub use shared::errors::*;
pub use shared::validation;
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod auth;
}
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod task_store;
}
//---------------------------------------

//---------------------------------------
pub mod services {
    pub mod task_service;
}
//---------------------------------------

//---------------------------------------
pub mod client {
    pub mod task_api;
    pub mod task_board;
    pub mod task_form;
    pub mod task_view;
}

pub use client::*;
//---------------------------------------
