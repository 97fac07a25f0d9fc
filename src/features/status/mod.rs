//! Service status: info, liveness and metrics.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Service info and endpoint map |
//! | GET | `/health` | Process liveness (no database access) |
//! | GET | `/health/db` | Database round trip, 503 when it fails |
//! | GET | `/metrics` | Status snapshot, not access-logged |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::StatusService;
