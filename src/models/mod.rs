//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL,
//! junto con los requests/responses de cada recurso.

pub mod driver;
pub mod envelope;
pub mod notification;
pub mod route;
pub mod send;
pub mod user;
pub mod vehicle;
