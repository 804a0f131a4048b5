//! Modelo de Vehicle
//!
//! La capacidad es el máximo de unidades que el vehículo puede transportar;
//! una ruta sin vehículo (o con vehículo sin capacidad) bloquea la asignación.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub code: String,
    pub brand: Option<String>,
    pub capacity: Option<i32>,
}

/// Proyección del vehículo anidada en los listados de rutas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub id: i32,
    pub code: String,
    pub brand: Option<String>,
    pub capacity: Option<i32>,
}
