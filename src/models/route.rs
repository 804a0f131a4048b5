//! Modelo de Route

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::vehicle::VehicleSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: i32,
    pub code: String,
    pub desc_route: Option<String>,
    pub vehicle_id: Option<i32>,
}

/// Ruta con su vehículo resuelto, para el listado de referencia
#[derive(Debug, Clone, Serialize)]
pub struct RouteWithVehicle {
    pub id: i32,
    pub code: String,
    pub desc_route: Option<String>,
    pub vehicle_id: Option<i32>,
    pub vehicle: Option<VehicleSummary>,
}

/// Datos del vehículo de una ruta para la validación de asignación
#[derive(Debug, Clone, FromRow)]
pub struct RouteVehicle {
    pub route_id: i32,
    pub capacity: Option<i32>,
    pub brand: Option<String>,
    pub code: Option<String>,
}
