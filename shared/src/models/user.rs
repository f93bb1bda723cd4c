//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

/// User entity as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// Argon2 hash; empty string for OAuth-created accounts
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub phone: String,
    /// Joined display address built from the individual fields
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub address_line: String,
    #[serde(default)]
    pub barangay: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub backup_address: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default = "default_theme")]
    pub preferred_theme: String,
    #[serde(default)]
    pub created_at: i64,
}

fn default_theme() -> String {
    "Default".to_string()
}

impl User {
    /// Credential-free projection safe to return to clients
    pub fn sanitized(&self) -> UserPublic {
        UserPublic {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            verified: self.verified,
            phone: self.phone.clone(),
            address: self.address.clone(),
            address_line: self.address_line.clone(),
            barangay: self.barangay.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            zip: self.zip.clone(),
            country: self.country.clone(),
            backup_address: self.backup_address.clone(),
            profile_image: self.profile_image.clone(),
            preferred_theme: self.preferred_theme.clone(),
        }
    }
}

/// User view without the credential hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
    pub phone: String,
    pub address: String,
    pub address_line: String,
    pub barangay: String,
    pub city: String,
    pub province: String,
    pub zip: String,
    pub country: String,
    pub backup_address: String,
    pub profile_image: String,
    pub preferred_theme: String,
}

/// Fields supplied at account creation; the accessor fills the rest
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
    pub phone: String,
    pub address_line: String,
    pub barangay: String,
    pub city: String,
    pub province: String,
    pub zip: String,
    pub country: String,
}

impl NewUser {
    /// Joined display address in the fixed field order
    pub fn joined_address(&self) -> String {
        join_address(
            &self.address_line,
            &self.barangay,
            &self.city,
            &self.province,
            &self.zip,
            &self.country,
        )
    }
}

/// PATCH /api/users/me payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserProfileUpdate {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7))]
    pub phone: String,
    #[serde(default)]
    pub address_line: String,
    #[validate(length(min = 2))]
    pub barangay: String,
    #[validate(length(min = 2))]
    pub city: String,
    #[validate(length(min = 2))]
    pub province: String,
    #[validate(length(min = 3))]
    pub zip: String,
    #[validate(length(min = 2))]
    pub country: String,
    #[serde(default)]
    pub backup_address: String,
    #[serde(default)]
    pub profile_image: String,
    pub preferred_theme: Option<String>,
}

impl UserProfileUpdate {
    pub fn joined_address(&self) -> String {
        join_address(
            &self.address_line,
            &self.barangay,
            &self.city,
            &self.province,
            &self.zip,
            &self.country,
        )
    }
}

/// Display address format: "line, barangay, city, province, zip, country"
pub fn join_address(
    line: &str,
    barangay: &str,
    city: &str,
    province: &str,
    zip: &str,
    country: &str,
) -> String {
    format!("{line}, {barangay}, {city}, {province}, {zip}, {country}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Some("u1".into()),
            name: "Maria".into(),
            email: "maria@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::Customer,
            verified: true,
            phone: "09170000000".into(),
            address: String::new(),
            address_line: String::new(),
            barangay: "San Isidro".into(),
            city: "Makati".into(),
            province: "Metro Manila".into(),
            zip: "1200".into(),
            country: "PH".into(),
            backup_address: String::new(),
            profile_image: String::new(),
            preferred_theme: "Default".into(),
            created_at: 0,
        }
    }

    #[test]
    fn sanitized_view_has_no_hash() {
        let user = sample_user();
        let public = serde_json::to_value(user.sanitized()).expect("serialize");
        assert!(public.get("password_hash").is_none());
        assert_eq!(public["email"], "maria@example.com");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::Customer).unwrap(), "customer");
    }

    #[test]
    fn profile_update_validation() {
        let update = UserProfileUpdate {
            name: "M".into(),
            email: "not-an-email".into(),
            phone: "123".into(),
            address_line: String::new(),
            barangay: "B".into(),
            city: "C".into(),
            province: "P".into(),
            zip: "12".into(),
            country: "X".into(),
            backup_address: String::new(),
            profile_image: String::new(),
            preferred_theme: None,
        };
        assert!(validator::Validate::validate(&update).is_err());
    }
}
