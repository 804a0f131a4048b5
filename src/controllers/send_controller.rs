//! Ciclo de vida de los envíos
//!
//! Creación, actualización con validación de asignaciones y listado
//! filtrado. Toda operación mutante despacha su notificación al propietario
//! a través del despachador; la entrega es best-effort y nunca bloquea el
//! resultado de la operación.

use chrono::Utc;
use serde_json::json;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::envelope::{ApiResponse, Pagination};
use crate::models::send::{
    plan_changes, CreateSendRequest, NewSend, SendFilterRequest, SendState, UpdateSendRequest,
};
use crate::models::user::ADMIN_ROLE;
use crate::repositories::{DriverRepository, RouteRepository, SendRepository, UserRepository};
use crate::services::NotificationService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::time::now_in_timezone;

pub struct SendController {
    sends: SendRepository,
    routes: RouteRepository,
    drivers: DriverRepository,
    users: UserRepository,
    notifications: NotificationService,
    utc_offset: i32,
}

impl SendController {
    pub fn new(state: &AppState) -> Self {
        Self {
            sends: SendRepository::new(state.pool.clone()),
            routes: RouteRepository::new(state.pool.clone()),
            drivers: DriverRepository::new(state.pool.clone()),
            users: UserRepository::new(state.pool.clone()),
            notifications: state.notifications.clone(),
            utc_offset: state.config.utc_offset,
        }
    }

    pub async fn create_send(
        &self,
        user: &AuthenticatedUser,
        request: CreateSendRequest,
    ) -> Result<ApiResponse, AppError> {
        let units = request.units.unwrap_or(1);

        if let Some(route_id) = request.route_id {
            self.check_route_assignment(route_id, units).await?;
        }
        if let Some(driver_id) = request.driver_id {
            self.check_driver_assignment(driver_id, None).await?;
        }

        let created = self
            .sends
            .insert(&NewSend {
                unique_id: Utc::now().timestamp_millis(),
                reference: request.reference,
                address: request.address,
                width: request.width,
                height: request.height,
                length: request.length,
                user_id: Some(user.id),
                route_id: request.route_id,
                driver_id: request.driver_id,
                state: SendState::Waiting.code(),
                units,
                create_datetime: now_in_timezone(self.utc_offset),
            })
            .await?;

        self.notifications.send_created(&user.email, &created).await;

        Ok(ApiResponse::text(200, "send-created"))
    }

    pub async fn update_send(
        &self,
        user: &AuthenticatedUser,
        raw_id: &str,
        patch: UpdateSendRequest,
    ) -> Result<ApiResponse, AppError> {
        let id = raw_id
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::business("invalid-send-id"))?;

        if patch.is_empty() {
            return Err(AppError::business("no-fields-to-update"));
        }

        let send = self
            .sends
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("send-not-found".to_string()))?;

        if user.rol_id != ADMIN_ROLE && send.user_id != Some(user.id) {
            return Err(AppError::Forbidden("insufficient-permissions".to_string()));
        }

        if let Some(route_id) = patch.route_id {
            let units = patch.units.unwrap_or(send.units);
            self.check_route_assignment(route_id, units).await?;
        }
        if let Some(driver_id) = patch.driver_id {
            self.check_driver_assignment(driver_id, Some(send.id)).await?;
        }

        let changes = plan_changes(send.state, &patch, now_in_timezone(self.utc_offset));
        let updated = self.sends.update(send.id, &changes).await?;

        if let Some(owner_id) = updated.user_id {
            if let Some(owner) = self.users.find_identity(owner_id).await? {
                self.notifications
                    .send_updated(&owner.email, &updated, &user.name)
                    .await;
            }
        }

        Ok(ApiResponse::data_text(
            200,
            serde_json::to_value(&updated)?,
            "send-updated",
        ))
    }

    pub async fn get_sends_filtered(
        &self,
        user: &AuthenticatedUser,
        filter: SendFilterRequest,
    ) -> Result<ApiResponse, AppError> {
        let page = filter.page.unwrap_or(1);
        let limit = filter.limit.unwrap_or(20);
        // Los no administradores solo ven sus propios envíos, pidan lo que pidan
        let user_filter = if user.rol_id == ADMIN_ROLE {
            filter.user_id
        } else {
            Some(user.id)
        };

        let offset = (page - 1) * limit;
        let sends = self
            .sends
            .list_filtered(filter.state, user_filter, limit, offset)
            .await?;
        let total = self.sends.count_filtered(filter.state, user_filter).await?;

        Ok(
            ApiResponse::data_message(200, serde_json::to_value(&sends)?, "sends-filtered")
                .with_pagination(Pagination::new(page, limit, total)),
        )
    }

    /// La ruta debe existir y su vehículo debe tener capacidad suficiente
    /// para las unidades efectivas del envío
    async fn check_route_assignment(&self, route_id: i32, send_units: i32) -> Result<(), AppError> {
        let route = self
            .routes
            .find_route_vehicle(route_id)
            .await?
            .ok_or_else(|| AppError::business("route-not-found"))?;

        let Some(capacity) = route.capacity else {
            return Err(AppError::business("route-has-no-vehicle-assigned"));
        };

        if send_units > capacity {
            return Err(AppError::business_with_data(
                "vehicle-capacity-exceeded",
                json!({
                    "vehicleCapacity": capacity,
                    "sendUnits": send_units,
                    "vehicleBrand": route.brand,
                    "vehicleCode": route.code,
                }),
            ));
        }

        Ok(())
    }

    /// El conductor debe existir y no tener otro envío en espera o en
    /// tránsito
    async fn check_driver_assignment(
        &self,
        driver_id: i32,
        exclude_send: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(conflict) = self
            .sends
            .find_active_send_for_driver(driver_id, exclude_send)
            .await?
        {
            return Err(AppError::business_with_data(
                "driver-not-available",
                json!({
                    "driverName": conflict.driver_name,
                    "conflictingSendId": conflict.unique_id,
                    "conflictingSendReference": conflict.reference,
                }),
            ));
        }

        if !self.drivers.exists(driver_id).await? {
            return Err(AppError::business("driver-not-found"));
        }

        Ok(())
    }
}
