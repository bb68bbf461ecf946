//! In-memory store fixtures shared by the storage and api test suites

use crate::{Observation, Station};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub const SCHEMA: [&str; 2] = [
    "CREATE TABLE measurement (\
        id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)",
    "CREATE TABLE station (\
        id INTEGER PRIMARY KEY, station TEXT, name TEXT, \
        latitude FLOAT, longitude FLOAT, elevation FLOAT)",
];

pub fn obs(station: &str, date: &str, prcp: Option<f64>, tobs: Option<f64>) -> Observation {
    Observation {
        station_id: station.to_string(),
        date: date.to_string(),
        precipitation: prcp,
        temperature: tobs,
    }
}

pub fn station(id: &str, name: &str) -> Station {
    Station {
        station_id: id.to_string(),
        name: name.to_string(),
        latitude: Some(21.2716),
        longitude: Some(-157.8168),
        elevation: Some(3.0),
    }
}

/// Single-connection in-memory store holding the given rows
pub async fn memory_pool(observations: &[Observation], stations: &[Station]) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    create_schema(&pool).await;
    seed(&pool, observations, stations).await;
    pool
}

pub async fn create_schema(pool: &SqlitePool) {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await.unwrap();
    }
}

pub async fn seed(pool: &SqlitePool, observations: &[Observation], stations: &[Station]) {
    for o in observations {
        sqlx::query(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&o.station_id)
        .bind(&o.date)
        .bind(o.precipitation)
        .bind(o.temperature)
        .execute(pool)
        .await
        .unwrap();
    }
    for s in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&s.station_id)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(pool)
        .await
        .unwrap();
    }
}
