//! Services module
//!
//! Lógica transversal que no pertenece a un recurso concreto.

pub mod notification_service;

pub use notification_service::NotificationService;
