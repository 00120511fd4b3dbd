//! Remote SQL store over a sqlx SQLite pool.
//!
//! The connection is an owned, lifecycle-managed resource: constructed from
//! the configured URL at startup, re-established on demand with capped
//! exponential backoff when it drops. No URL configured means the app runs
//! local-only and every method here reports the store as unavailable.

use anyhow::{anyhow, Result};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePool;
use sqlx::{Row, Sqlite};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::domain::models::{
    Appointment, AppointmentStatus, EstablishmentInfo, ExpenseEntry, PaymentMethod, RevenueEntry,
    ServiceItem, User, UserRole, Vehicle, VehicleSize,
};

const INITIAL_BACKOFF: Duration = Duration::from_secs(5);
const MAX_BACKOFF: Duration = Duration::from_secs(300);

struct ConnState {
    pool: Option<SqlitePool>,
    next_attempt: Option<Instant>,
    backoff: Duration,
}

pub struct CloudDb {
    url: Option<String>,
    state: Mutex<ConnState>,
}

impl CloudDb {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            state: Mutex::new(ConnState {
                pool: None,
                next_attempt: None,
                backoff: INITIAL_BACKOFF,
            }),
        }
    }

    /// Whether a remote store URL is configured at all.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Current pool, connecting if due. `None` while unconfigured or inside
    /// the backoff window after a failed attempt.
    async fn pool(&self) -> Option<SqlitePool> {
        let url = self.url.as_deref()?;
        let mut state = self.state.lock().await;

        if let Some(pool) = &state.pool {
            return Some(pool.clone());
        }
        if let Some(next) = state.next_attempt {
            if Instant::now() < next {
                return None;
            }
        }

        match Self::connect_to(url).await {
            Ok(pool) => {
                log::info!("connected to remote store");
                state.pool = Some(pool.clone());
                state.next_attempt = None;
                state.backoff = INITIAL_BACKOFF;
                Some(pool)
            }
            Err(e) => {
                log::warn!(
                    "remote store connection failed (retry in {:?}): {e}",
                    state.backoff
                );
                state.next_attempt = Some(Instant::now() + state.backoff);
                state.backoff = (state.backoff * 2).min(MAX_BACKOFF);
                None
            }
        }
    }

    async fn connect_to(url: &str) -> Result<SqlitePool> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;
        Ok(pool)
    }

    /// Eagerly establish the connection; used at startup so a bad URL shows
    /// up in the logs immediately instead of on the first request.
    pub async fn connect(&self) -> bool {
        self.pool().await.is_some()
    }

    /// Liveness probe. A failed ping drops the pool so the next call goes
    /// through the reconnect path.
    pub async fn ping(&self) -> bool {
        let Some(pool) = self.pool().await else {
            return false;
        };
        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("remote store ping failed: {e}");
                let mut state = self.state.lock().await;
                state.pool = None;
                state.next_attempt = Some(Instant::now() + state.backoff);
                false
            }
        }
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        for ddl in [
            r#"CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                phone TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                role TEXT NOT NULL,
                points INTEGER DEFAULT 0
            )"#,
            r#"CREATE TABLE IF NOT EXISTS appointments (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                customer_name TEXT NOT NULL,
                customer_phone TEXT NOT NULL,
                service_label TEXT NOT NULL,
                price REAL DEFAULT 0,
                scheduled_at TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                vehicle_snapshot TEXT
            )"#,
            r#"CREATE TABLE IF NOT EXISTS services (
                id TEXT PRIMARY KEY,
                label TEXT NOT NULL,
                description TEXT,
                price REAL NOT NULL,
                price_medium REAL,
                price_large REAL,
                old_price REAL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS vehicles (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                brand TEXT NOT NULL,
                model TEXT NOT NULL,
                year TEXT NOT NULL,
                color TEXT NOT NULL,
                plate TEXT,
                size TEXT NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS revenue (
                id TEXT PRIMARY KEY,
                service_type TEXT NOT NULL,
                vehicle_size TEXT NOT NULL,
                amount REAL NOT NULL,
                payment TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS expenses (
                id TEXT PRIMARY KEY,
                amount REAL NOT NULL,
                note TEXT,
                incurred_on TEXT NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS establishment (
                id TEXT PRIMARY KEY,
                name TEXT,
                address TEXT,
                phone TEXT,
                instagram TEXT,
                logo_url TEXT,
                waze_url TEXT
            )"#,
        ] {
            sqlx::query(ddl).execute(pool).await?;
        }
        Ok(())
    }

    async fn require_pool(&self) -> Result<SqlitePool> {
        self.pool()
            .await
            .ok_or_else(|| anyhow!("remote store unavailable"))
    }

    // --- appointments ---

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let pool = self.require_pool().await?;
        let rows = sqlx::query("SELECT * FROM appointments ORDER BY scheduled_at ASC")
            .fetch_all(&pool)
            .await?;
        rows.iter().map(row_to_appointment).collect()
    }

    pub async fn upsert_appointment(&self, a: &Appointment) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query(
            r#"INSERT OR REPLACE INTO appointments
               (id, user_id, customer_name, customer_phone, service_label, price,
                scheduled_at, status, created_at, vehicle_snapshot)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&a.id)
        .bind(&a.user_id)
        .bind(&a.customer_name)
        .bind(&a.customer_phone)
        .bind(&a.service_label)
        .bind(a.price)
        .bind(&a.scheduled_at)
        .bind(a.status.as_str())
        .bind(&a.created_at)
        .bind(&a.vehicle_snapshot)
        .execute(&pool)
        .await?;
        Ok(())
    }

    pub async fn delete_appointment(&self, id: &str) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    // --- services ---

    pub async fn list_services(&self) -> Result<Vec<ServiceItem>> {
        let pool = self.require_pool().await?;
        let rows = sqlx::query("SELECT * FROM services ORDER BY price ASC")
            .fetch_all(&pool)
            .await?;
        Ok(rows
            .iter()
            .map(|row| ServiceItem {
                id: row.get("id"),
                label: row.get("label"),
                description: row.get::<Option<String>, _>("description").unwrap_or_default(),
                price: row.get("price"),
                price_medium: row.get("price_medium"),
                price_large: row.get("price_large"),
                old_price: row.get("old_price"),
            })
            .collect())
    }

    pub async fn upsert_service(&self, s: &ServiceItem) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query(
            r#"INSERT OR REPLACE INTO services
               (id, label, description, price, price_medium, price_large, old_price)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&s.id)
        .bind(&s.label)
        .bind(&s.description)
        .bind(s.price)
        .bind(s.price_medium)
        .bind(s.price_large)
        .bind(s.old_price)
        .execute(&pool)
        .await?;
        Ok(())
    }

    pub async fn delete_service(&self, id: &str) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    // --- revenue ---

    pub async fn list_revenue(&self) -> Result<Vec<RevenueEntry>> {
        let pool = self.require_pool().await?;
        let rows = sqlx::query("SELECT * FROM revenue ORDER BY recorded_at DESC")
            .fetch_all(&pool)
            .await?;
        rows.iter().map(row_to_revenue).collect()
    }

    pub async fn upsert_revenue(&self, entry: &RevenueEntry) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query(
            r#"INSERT OR REPLACE INTO revenue
               (id, service_type, vehicle_size, amount, payment, recorded_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&entry.id)
        .bind(&entry.service_type)
        .bind(entry.vehicle_size.as_str())
        .bind(entry.amount)
        .bind(entry.payment.as_str())
        .bind(&entry.recorded_at)
        .execute(&pool)
        .await?;
        Ok(())
    }

    pub async fn delete_revenue(&self, id: &str) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query("DELETE FROM revenue WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    // --- expenses ---

    pub async fn list_expenses(&self) -> Result<Vec<ExpenseEntry>> {
        let pool = self.require_pool().await?;
        let rows = sqlx::query("SELECT * FROM expenses ORDER BY incurred_on DESC")
            .fetch_all(&pool)
            .await?;
        Ok(rows
            .iter()
            .map(|row| ExpenseEntry {
                id: row.get("id"),
                amount: row.get("amount"),
                note: row.get::<Option<String>, _>("note").unwrap_or_default(),
                incurred_on: row.get("incurred_on"),
            })
            .collect())
    }

    pub async fn upsert_expense(&self, entry: &ExpenseEntry) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query(
            "INSERT OR REPLACE INTO expenses (id, amount, note, incurred_on) VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(entry.amount)
        .bind(&entry.note)
        .bind(&entry.incurred_on)
        .execute(&pool)
        .await?;
        Ok(())
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    // --- users ---

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let pool = self.require_pool().await?;
        let row = sqlx::query("SELECT * FROM users WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&pool)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>> {
        let pool = self.require_pool().await?;
        let row = sqlx::query("SELECT * FROM users WHERE phone = ? LIMIT 1")
            .bind(phone)
            .fetch_optional(&pool)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<Option<User>> {
        let pool = self.require_pool().await?;
        let row = sqlx::query("SELECT * FROM users WHERE phone = ? AND password = ? LIMIT 1")
            .bind(phone)
            .bind(password)
            .fetch_optional(&pool)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn insert_user(&self, user: &User) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query(
            "INSERT INTO users (id, name, phone, password, role, points) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(user.points)
        .execute(&pool)
        .await?;
        Ok(())
    }

    pub async fn add_points(&self, user_id: &str, delta: i64) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(delta)
            .bind(user_id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    // --- vehicles ---

    pub async fn list_user_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>> {
        let pool = self.require_pool().await?;
        let rows = sqlx::query("SELECT * FROM vehicles WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&pool)
            .await?;
        rows.iter().map(row_to_vehicle).collect()
    }

    pub async fn insert_vehicle(&self, v: &Vehicle) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query(
            r#"INSERT INTO vehicles (id, user_id, brand, model, year, color, plate, size)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&v.id)
        .bind(&v.user_id)
        .bind(&v.brand)
        .bind(&v.model)
        .bind(&v.year)
        .bind(&v.color)
        .bind(&v.plate)
        .bind(v.size.as_str())
        .execute(&pool)
        .await?;
        Ok(())
    }

    pub async fn delete_vehicle(&self, id: &str) -> Result<()> {
        let pool = self.require_pool().await?;
        sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    // --- establishment ---

    pub async fn get_establishment(&self) -> Result<Option<EstablishmentInfo>> {
        let pool = self.require_pool().await?;
        let row = sqlx::query("SELECT * FROM establishment LIMIT 1")
            .fetch_optional(&pool)
            .await?;
        Ok(row.map(|row| EstablishmentInfo {
            name: row.get::<Option<String>, _>("name").unwrap_or_default(),
            address: row.get::<Option<String>, _>("address").unwrap_or_default(),
            phone: row.get::<Option<String>, _>("phone").unwrap_or_default(),
            instagram: row.get::<Option<String>, _>("instagram").unwrap_or_default(),
            logo_url: row.get("logo_url"),
            waze_url: row.get("waze_url"),
        }))
    }

    pub async fn save_establishment(&self, info: &EstablishmentInfo) -> Result<()> {
        let pool = self.require_pool().await?;
        // Singleton row: fixed primary key.
        sqlx::query(
            r#"INSERT OR REPLACE INTO establishment
               (id, name, address, phone, instagram, logo_url, waze_url)
               VALUES ('1', ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&info.name)
        .bind(&info.address)
        .bind(&info.phone)
        .bind(&info.instagram)
        .bind(&info.logo_url)
        .bind(&info.waze_url)
        .execute(&pool)
        .await?;
        Ok(())
    }
}

fn row_to_appointment(row: &sqlx::sqlite::SqliteRow) -> Result<Appointment> {
    let status: String = row.get("status");
    Ok(Appointment {
        id: row.get("id"),
        user_id: row.get("user_id"),
        customer_name: row.get("customer_name"),
        customer_phone: row.get("customer_phone"),
        service_label: row.get("service_label"),
        price: row.get("price"),
        scheduled_at: row.get("scheduled_at"),
        status: AppointmentStatus::parse(&status)
            .ok_or_else(|| anyhow!("unknown appointment status: {status}"))?,
        created_at: row.get("created_at"),
        vehicle_snapshot: row.get("vehicle_snapshot"),
    })
}

fn row_to_revenue(row: &sqlx::sqlite::SqliteRow) -> Result<RevenueEntry> {
    let size: String = row.get("vehicle_size");
    let payment: String = row.get("payment");
    Ok(RevenueEntry {
        id: row.get("id"),
        service_type: row.get("service_type"),
        vehicle_size: VehicleSize::parse(&size)
            .ok_or_else(|| anyhow!("unknown vehicle size: {size}"))?,
        amount: row.get("amount"),
        payment: PaymentMethod::parse(&payment)
            .ok_or_else(|| anyhow!("unknown payment method: {payment}"))?,
        recorded_at: row.get("recorded_at"),
    })
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        phone: row.get("phone"),
        password: row.get("password"),
        role: UserRole::parse(&role).ok_or_else(|| anyhow!("unknown user role: {role}"))?,
        points: row.get("points"),
    })
}

fn row_to_vehicle(row: &sqlx::sqlite::SqliteRow) -> Result<Vehicle> {
    let size: String = row.get("size");
    Ok(Vehicle {
        id: row.get("id"),
        user_id: row.get("user_id"),
        brand: row.get("brand"),
        model: row.get("model"),
        year: row.get("year"),
        color: row.get("color"),
        plate: row.get("plate"),
        size: VehicleSize::parse(&size).ok_or_else(|| anyhow!("unknown vehicle size: {size}"))?,
    })
}
