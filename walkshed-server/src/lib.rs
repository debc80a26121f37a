//! Web shell of the Detroit amenity finder

pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;
