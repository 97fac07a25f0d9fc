//! Category CRUD feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories/` | List all categories |
//! | POST | `/categories/` | Create a category |
//! | GET | `/categories/{id}` | Get category by id |
//! | PUT | `/categories/{id}` | Update a category (partial) |
//! | DELETE | `/categories/{id}` | Delete a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgCategoryRepository;
pub use services::CategoryService;
