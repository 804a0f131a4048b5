//! Modelo de Send
//!
//! El envío es la entidad central. Los atributos descriptivos (referencia,
//! dirección y dimensiones) quedan fijos en la creación; solo los campos
//! operativos y los timestamps de estado cambian después.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::time::{sql_datetime, sql_datetime_opt};

/// Estados del envío - contrato público
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Waiting = 1,
    InTransit = 2,
    Delivered = 3,
    Cancelled = 4,
}

impl SendState {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Fila de main_sends
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Send {
    pub id: i32,
    pub user_id: Option<i32>,
    pub unique_id: i64,
    pub route_id: Option<i32>,
    pub driver_id: Option<i32>,
    pub reference: String,
    pub address: String,
    pub units: i32,
    pub state: i32,
    #[serde(with = "sql_datetime")]
    pub create_datetime: NaiveDateTime,
    #[serde(with = "sql_datetime_opt")]
    pub transit_datetime: Option<NaiveDateTime>,
    #[serde(with = "sql_datetime_opt")]
    pub deliver_datetime: Option<NaiveDateTime>,
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

/// Valores para el INSERT de un envío nuevo
#[derive(Debug, Clone)]
pub struct NewSend {
    pub unique_id: i64,
    pub reference: String,
    pub address: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub user_id: Option<i32>,
    pub route_id: Option<i32>,
    pub driver_id: Option<i32>,
    pub state: i32,
    pub units: i32,
    pub create_datetime: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSendRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub reference: String,

    #[validate(length(min = 1, message = "is required"))]
    pub address: String,

    pub width: f64,
    pub height: f64,
    pub length: f64,

    #[validate(range(min = 1, message = "must be a positive number"))]
    pub units: Option<i32>,

    #[validate(range(min = 1, message = "must be a positive number"))]
    pub route_id: Option<i32>,

    #[validate(range(min = 1, message = "must be a positive number"))]
    pub driver_id: Option<i32>,
}

/// Patch de actualización: solo campos operativos. La dirección y las
/// dimensiones son inmutables después de la creación.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSendRequest {
    #[validate(range(min = 1, max = 4, message = "must be between 1 and 4"))]
    pub state: Option<i32>,

    #[validate(range(min = 1, message = "must be a positive number"))]
    pub units: Option<i32>,

    #[validate(range(min = 1, message = "must be a positive number"))]
    pub route_id: Option<i32>,

    #[validate(range(min = 1, message = "must be a positive number"))]
    pub driver_id: Option<i32>,
}

impl UpdateSendRequest {
    pub fn is_empty(&self) -> bool {
        self.state.is_none()
            && self.units.is_none()
            && self.route_id.is_none()
            && self.driver_id.is_none()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendFilterRequest {
    pub user_id: Option<i32>,
    pub state: Option<i32>,

    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub limit: Option<i64>,
}

/// Campos resueltos que escribirá un UPDATE
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendChanges {
    pub units: Option<i32>,
    pub route_id: Option<i32>,
    pub driver_id: Option<i32>,
    pub state: Option<i32>,
    pub transit_datetime: Option<NaiveDateTime>,
    pub deliver_datetime: Option<NaiveDateTime>,
}

impl SendChanges {
    pub fn is_empty(&self) -> bool {
        self.units.is_none()
            && self.route_id.is_none()
            && self.driver_id.is_none()
            && self.state.is_none()
    }
}

/// Resolver los campos que escribirá la actualización.
///
/// El estado explícito del patch gana siempre; si no hay estado explícito y
/// el patch asigna ruta o conductor sobre un envío en espera, el envío pasa
/// automáticamente a tránsito. El estado resuelto 2 estampa
/// `transit_datetime` y el 3 `deliver_datetime`, aun si ya tenían valor;
/// el 4 no estampa nada.
pub fn plan_changes(
    current_state: i32,
    patch: &UpdateSendRequest,
    now: NaiveDateTime,
) -> SendChanges {
    let assigning = patch.route_id.is_some() || patch.driver_id.is_some();
    let resolved = match patch.state {
        Some(state) => Some(state),
        None if assigning && current_state == SendState::Waiting.code() => {
            Some(SendState::InTransit.code())
        }
        None => None,
    };

    SendChanges {
        units: patch.units,
        route_id: patch.route_id,
        driver_id: patch.driver_id,
        state: resolved,
        transit_datetime: (resolved == Some(SendState::InTransit.code())).then_some(now),
        deliver_datetime: (resolved == Some(SendState::Delivered.code())).then_some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_assignment_moves_waiting_send_to_transit() {
        let patch = UpdateSendRequest {
            driver_id: Some(1),
            ..Default::default()
        };
        let changes = plan_changes(SendState::Waiting.code(), &patch, now());
        assert_eq!(changes.state, Some(SendState::InTransit.code()));
        assert_eq!(changes.transit_datetime, Some(now()));
        assert_eq!(changes.deliver_datetime, None);
    }

    #[test]
    fn test_route_assignment_also_triggers_transit() {
        let patch = UpdateSendRequest {
            route_id: Some(3),
            units: Some(2),
            ..Default::default()
        };
        let changes = plan_changes(SendState::Waiting.code(), &patch, now());
        assert_eq!(changes.state, Some(SendState::InTransit.code()));
        assert_eq!(changes.units, Some(2));
    }

    #[test]
    fn test_explicit_state_wins_over_auto_transition() {
        let patch = UpdateSendRequest {
            driver_id: Some(1),
            state: Some(SendState::Cancelled.code()),
            ..Default::default()
        };
        let changes = plan_changes(SendState::Waiting.code(), &patch, now());
        assert_eq!(changes.state, Some(SendState::Cancelled.code()));
        assert_eq!(changes.transit_datetime, None);
        assert_eq!(changes.deliver_datetime, None);
    }

    #[test]
    fn test_assignment_does_not_touch_non_waiting_state() {
        let patch = UpdateSendRequest {
            driver_id: Some(1),
            ..Default::default()
        };
        let changes = plan_changes(SendState::Delivered.code(), &patch, now());
        assert_eq!(changes.state, None);
        assert_eq!(changes.transit_datetime, None);
    }

    #[test]
    fn test_delivered_state_stamps_deliver_datetime() {
        let patch = UpdateSendRequest {
            state: Some(SendState::Delivered.code()),
            ..Default::default()
        };
        let changes = plan_changes(SendState::InTransit.code(), &patch, now());
        assert_eq!(changes.state, Some(SendState::Delivered.code()));
        assert_eq!(changes.deliver_datetime, Some(now()));
        assert_eq!(changes.transit_datetime, None);
    }

    #[test]
    fn test_units_only_patch_keeps_state_untouched() {
        let patch = UpdateSendRequest {
            units: Some(4),
            ..Default::default()
        };
        let changes = plan_changes(SendState::InTransit.code(), &patch, now());
        assert_eq!(changes.state, None);
        assert_eq!(changes.transit_datetime, None);
        assert!(!changes.is_empty());
    }
}
