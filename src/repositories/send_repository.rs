use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::send::{NewSend, Send, SendChanges};
use crate::utils::errors::AppError;

/// Envío activo que bloquea la asignación de un conductor
#[derive(Debug, FromRow)]
pub struct DriverConflict {
    pub id: i32,
    pub unique_id: i64,
    pub reference: String,
    pub driver_name: String,
}

pub struct SendRepository {
    pool: PgPool,
}

impl SendRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Send>, AppError> {
        let send = sqlx::query_as::<_, Send>("SELECT * FROM main_sends WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(send)
    }

    pub async fn find_by_unique_id(&self, unique_id: i64) -> Result<Option<Send>, AppError> {
        let send = sqlx::query_as::<_, Send>("SELECT * FROM main_sends WHERE unique_id = $1")
            .bind(unique_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(send)
    }

    /// Buscar otro envío activo (en espera o en tránsito) ya asignado al
    /// conductor, excluyendo opcionalmente el envío en edición
    pub async fn find_active_send_for_driver(
        &self,
        driver_id: i32,
        exclude_send: Option<i32>,
    ) -> Result<Option<DriverConflict>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"SELECT s.id, s.unique_id, s.reference, d.name AS driver_name
            FROM main_sends s
            JOIN main_drivers d ON d.id = s.driver_id
            WHERE s.driver_id = "#,
        );
        builder.push_bind(driver_id);
        builder.push(" AND s.state IN (1, 2)");
        if let Some(send_id) = exclude_send {
            builder.push(" AND s.id <> ");
            builder.push_bind(send_id);
        }
        builder.push(" LIMIT 1");

        let conflict = builder
            .build_query_as::<DriverConflict>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(conflict)
    }

    pub async fn insert(&self, send: &NewSend) -> Result<Send, AppError> {
        let created = sqlx::query_as::<_, Send>(
            r#"
            INSERT INTO main_sends
                (unique_id, reference, address, width, height, length,
                 user_id, route_id, driver_id, state, units, create_datetime)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(send.unique_id)
        .bind(&send.reference)
        .bind(&send.address)
        .bind(send.width)
        .bind(send.height)
        .bind(send.length)
        .bind(send.user_id)
        .bind(send.route_id)
        .bind(send.driver_id)
        .bind(send.state)
        .bind(send.units)
        .bind(send.create_datetime)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// UPDATE a nivel de campo: solo escribe lo presente en los cambios
    pub async fn update(&self, id: i32, changes: &SendChanges) -> Result<Send, AppError> {
        let mut builder = Self::build_update(id, changes);

        let updated = builder
            .build_query_as::<Send>()
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    fn build_update(id: i32, changes: &SendChanges) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE main_sends SET ");
        let mut fields = builder.separated(", ");

        if let Some(units) = changes.units {
            fields.push("units = ");
            fields.push_bind_unseparated(units);
        }
        if let Some(route_id) = changes.route_id {
            fields.push("route_id = ");
            fields.push_bind_unseparated(route_id);
        }
        if let Some(driver_id) = changes.driver_id {
            fields.push("driver_id = ");
            fields.push_bind_unseparated(driver_id);
        }
        if let Some(state) = changes.state {
            fields.push("state = ");
            fields.push_bind_unseparated(state);
        }
        if let Some(transit_datetime) = changes.transit_datetime {
            fields.push("transit_datetime = ");
            fields.push_bind_unseparated(transit_datetime);
        }
        if let Some(deliver_datetime) = changes.deliver_datetime {
            fields.push("deliver_datetime = ");
            fields.push_bind_unseparated(deliver_datetime);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING *");

        builder
    }

    pub async fn list_filtered(
        &self,
        state: Option<i32>,
        user_id: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Send>, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM main_sends WHERE 1=1");
        Self::push_filters(&mut builder, state, user_id);
        builder.push(" ORDER BY id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let sends = builder
            .build_query_as::<Send>()
            .fetch_all(&self.pool)
            .await?;

        Ok(sends)
    }

    /// Conteo independiente para la paginación, con los mismos filtros
    pub async fn count_filtered(
        &self,
        state: Option<i32>,
        user_id: Option<i32>,
    ) -> Result<i64, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM main_sends WHERE 1=1");
        Self::push_filters(&mut builder, state, user_id);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    fn push_filters(
        builder: &mut QueryBuilder<'static, Postgres>,
        state: Option<i32>,
        user_id: Option<i32>,
    ) {
        if let Some(user_id) = user_id {
            builder.push(" AND user_id = ");
            builder.push_bind(user_id);
        }
        if let Some(state) = state {
            builder.push(" AND state = ");
            builder.push_bind(state);
        }
    }

    /// Listado para tracking: todos los envíos o solo los del propietario
    pub async fn list_for_owner(&self, owner: Option<i32>) -> Result<Vec<Send>, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM main_sends WHERE 1=1");
        Self::push_filters(&mut builder, None, owner);
        builder.push(" ORDER BY create_datetime DESC");

        let sends = builder
            .build_query_as::<Send>()
            .fetch_all(&self.pool)
            .await?;

        Ok(sends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_only_writes_present_fields() {
        let changes = SendChanges {
            units: Some(3),
            state: Some(2),
            ..Default::default()
        };
        let builder = SendRepository::build_update(9, &changes);
        let sql = builder.sql();

        assert_eq!(
            sql,
            "UPDATE main_sends SET units = $1, state = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn test_update_stamps_transit_datetime() {
        let changes = SendChanges {
            driver_id: Some(1),
            state: Some(2),
            transit_datetime: Some(
                chrono::NaiveDate::from_ymd_opt(2023, 1, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap(),
            ),
            ..Default::default()
        };
        let builder = SendRepository::build_update(1, &changes);
        let sql = builder.sql();

        assert!(sql.contains("driver_id = $1"));
        assert!(sql.contains("state = $2"));
        assert!(sql.contains("transit_datetime = $3"));
        assert!(!sql.contains("deliver_datetime"));
    }

    #[test]
    fn test_filters_compose_with_bind_placeholders() {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM main_sends WHERE 1=1");
        SendRepository::push_filters(&mut builder, Some(1), Some(42));

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM main_sends WHERE 1=1 AND user_id = $1 AND state = $2"
        );
    }

    #[test]
    fn test_no_filters_leaves_base_query() {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM main_sends WHERE 1=1");
        SendRepository::push_filters(&mut builder, None, None);

        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM main_sends WHERE 1=1");
    }
}
