//! HTTP server for FlavorHub.
//!
//! Exposes the recipe catalog as a JSON REST API and maps service outcomes to
//! status codes.
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | `GET` | `/api/recipes` | 200 list (`?difficulty=`, `?cuisine=`, `?search=`) | |
//! | `GET` | `/api/recipes/{id}` | 200 recipe | 404 |
//! | `POST` | `/api/recipes` | 201 recipe | 400 |
//! | `PUT` | `/api/recipes/{id}` | 200 recipe | 400, 404 |
//! | `DELETE` | `/api/recipes/{id}` | 204 | |
//! | `PUT` | `/api/recipes/{id}/rate` | 200 recipe | 400, 404, 409 |
//! | `GET` | `/health` | 200 | |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use handler::{AppState, HealthResponse, RatingRequest, RecipeQuery};
pub use router::{build_router, build_router_with_cors};
pub use server::FlavorHubServer;
