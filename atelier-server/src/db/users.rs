//! User accessors

use shared::error::AppResult;
use shared::models::{NewUser, Role, User};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{db_err, new_record_key};

const USER_TABLE: &str = "user";

/// All users, unbounded
pub async fn find_all(db: &Surreal<Db>) -> AppResult<Vec<User>> {
    let users: Vec<User> = db
        .query("SELECT *, record::id(id) AS id FROM user ORDER BY created_at")
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(users)
}

pub async fn find_by_email(db: &Surreal<Db>, email: &str) -> AppResult<Option<User>> {
    let user: Option<User> = db
        .query("SELECT *, record::id(id) AS id FROM user WHERE email = $email LIMIT 1")
        .bind(("email", email.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(user)
}

pub async fn find_by_id(db: &Surreal<Db>, id: &str) -> AppResult<Option<User>> {
    let user: Option<User> = db
        .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", USER_TABLE))
        .bind(("id", id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(user)
}

/// Insert a user with defaults filled and creation time stamped
pub async fn create(db: &Surreal<Db>, data: NewUser) -> AppResult<User> {
    let id = new_record_key();
    let address = data.joined_address();
    let user = User {
        id: None,
        name: data.name,
        email: data.email,
        password_hash: data.password_hash,
        role: data.role,
        verified: data.verified,
        phone: data.phone,
        address,
        address_line: data.address_line,
        barangay: data.barangay,
        city: data.city,
        province: data.province,
        zip: data.zip,
        country: data.country,
        backup_address: String::new(),
        profile_image: String::new(),
        preferred_theme: "Default".to_string(),
        created_at: now_millis(),
    };

    db.query("CREATE type::thing($tb, $id) CONTENT $data")
        .bind(("tb", USER_TABLE))
        .bind(("id", id.clone()))
        .bind(("data", user.clone()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;

    Ok(User {
        id: Some(id),
        ..user
    })
}

/// Field-level merge update; returns the updated document
pub async fn update(db: &Surreal<Db>, id: &str, data: serde_json::Value) -> AppResult<Option<User>> {
    let user: Option<User> = db
        .query("UPDATE type::thing($tb, $id) MERGE $data; SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", USER_TABLE))
        .bind(("id", id.to_string()))
        .bind(("data", data))
        .await
        .map_err(db_err)?
        .take(1)
        .map_err(db_err)?;
    Ok(user)
}

/// Unconditional delete; returns the removed document
pub async fn remove(db: &Surreal<Db>, id: &str) -> AppResult<Option<User>> {
    let user = find_by_id(db, id).await?;
    if user.is_some() {
        db.query("DELETE type::thing($tb, $id)")
            .bind(("tb", USER_TABLE))
            .bind(("id", id.to_string()))
            .await
            .map_err(db_err)?
            .check()
            .map_err(db_err)?;
    }
    Ok(user)
}

/// Bootstrap the admin account from configured credentials if absent.
///
/// Runs once at startup, not per request.
pub async fn ensure_admin(
    db: &Surreal<Db>,
    admin_email: &str,
    admin_password_hash: String,
) -> AppResult<User> {
    if let Some(existing) = find_by_email(db, admin_email).await? {
        return Ok(existing);
    }
    let admin = create(
        db,
        NewUser {
            name: "Admin".to_string(),
            email: admin_email.to_string(),
            password_hash: admin_password_hash,
            role: Role::Admin,
            verified: true,
            phone: String::new(),
            address_line: String::new(),
            barangay: String::new(),
            city: String::new(),
            province: String::new(),
            zip: String::new(),
            country: String::new(),
        },
    )
    .await?;
    tracing::info!(email = admin_email, "Admin account bootstrapped");
    Ok(admin)
}
