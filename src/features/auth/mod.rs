//! Cookie-based JWT authentication.
//!
//! Issues an access/refresh token pair as HttpOnly cookies and validates
//! them on every protected request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/register` | No | Register new user |
//! | POST | `/api/auth/login` | No | Login, sets auth cookies |
//! | POST | `/api/auth/refresh` | No | Rotate tokens from refresh cookie |
//! | POST | `/api/auth/logout` | Yes | Clear auth cookies |
//! | GET | `/api/auth/profile` | Yes | Current user |

pub mod cookies;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
