use sqlx::{FromRow, PgPool};

use crate::models::route::{RouteVehicle, RouteWithVehicle};
use crate::models::vehicle::VehicleSummary;
use crate::utils::errors::AppError;

#[derive(Debug, FromRow)]
struct RouteVehicleRow {
    id: i32,
    code: String,
    desc_route: Option<String>,
    vehicle_id: Option<i32>,
    v_id: Option<i32>,
    v_code: Option<String>,
    v_brand: Option<String>,
    v_capacity: Option<i32>,
}

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Capacidad, marca y código del vehículo de una ruta, si la ruta existe.
    /// Una ruta sin vehículo (o con vehículo sin capacidad) devuelve los
    /// campos del vehículo en NULL.
    pub async fn find_route_vehicle(&self, route_id: i32) -> Result<Option<RouteVehicle>, AppError> {
        let row = sqlx::query_as::<_, RouteVehicle>(
            r#"
            SELECT r.id AS route_id, v.capacity, v.brand, v.code
            FROM main_routes r
            LEFT JOIN main_vehicles v ON v.id = r.vehicle_id
            WHERE r.id = $1
            "#,
        )
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_with_vehicles(&self) -> Result<Vec<RouteWithVehicle>, AppError> {
        let rows = sqlx::query_as::<_, RouteVehicleRow>(
            r#"
            SELECT
                r.id, r.code, r.desc_route, r.vehicle_id,
                v.id AS v_id, v.code AS v_code, v.brand AS v_brand, v.capacity AS v_capacity
            FROM main_routes r
            LEFT JOIN main_vehicles v ON v.id = r.vehicle_id
            ORDER BY r.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let routes = rows
            .into_iter()
            .map(|row| RouteWithVehicle {
                id: row.id,
                code: row.code,
                desc_route: row.desc_route,
                vehicle_id: row.vehicle_id,
                vehicle: row.v_id.map(|id| VehicleSummary {
                    id,
                    code: row.v_code.unwrap_or_default(),
                    brand: row.v_brand,
                    capacity: row.v_capacity,
                }),
            })
            .collect();

        Ok(routes)
    }
}
