//! Manejo de fechas del sistema
//!
//! Los timestamps de los envíos se guardan en la zona horaria fija de
//! operación y se serializan con el formato `YYYY-MM-DD HH:mm:ss`.

use chrono::{FixedOffset, NaiveDateTime, Utc};

pub const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hora actual en la zona horaria fija de operación
pub fn now_in_timezone(utc_offset_hours: i32) -> NaiveDateTime {
    let seconds = utc_offset_hours.clamp(-23, 23) * 3600;
    match FixedOffset::east_opt(seconds) {
        Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
        None => Utc::now().naive_utc(),
    }
}

/// Timestamp RFC3339 para los payloads del canal realtime
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Formato serde para columnas datetime no nulas
pub mod sql_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::SQL_DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(
        datetime: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&datetime.format(SQL_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&value, SQL_DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Formato serde para columnas datetime opcionales
pub mod sql_datetime_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::SQL_DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(
        datetime: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match datetime {
            Some(datetime) => serializer.collect_str(&datetime.format(SQL_DATETIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        value
            .map(|value| {
                NaiveDateTime::parse_from_str(&value, SQL_DATETIME_FORMAT)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "sql_datetime")]
        datetime: NaiveDateTime,
        #[serde(with = "sql_datetime_opt")]
        optional: Option<NaiveDateTime>,
    }

    #[test]
    fn test_sql_datetime_format() {
        let datetime = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let wrapper = Wrapper {
            datetime,
            optional: None,
        };

        let json = serde_json::to_value(&wrapper).unwrap();
        assert_eq!(json["datetime"], "2023-01-01 10:00:00");
        assert!(json["optional"].is_null());

        let parsed: Wrapper = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.datetime, datetime);
        assert_eq!(parsed.optional, None);
    }

    #[test]
    fn test_offsets_shift_the_clock() {
        let utc = now_in_timezone(0);
        let shifted = now_in_timezone(2);
        let delta = shifted.signed_duration_since(utc).num_minutes();
        assert!((119..=121).contains(&delta));
    }
}
