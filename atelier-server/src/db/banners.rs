//! Banner / popup accessors
//!
//! Singleton documents in the `banner` table keyed by fixed names.

use shared::error::AppResult;
use shared::models::{BannerSet, LoginPopup};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::db_err;

const BANNER_TABLE: &str = "banner";
const HOME_KEY: &str = "home";
const LOGIN_POPUP_KEY: &str = "login_popup";

/// Placeholder carousel installed on first start
const DEFAULT_BANNERS: [&str; 5] = [
    "https://upload.wikimedia.org/wikipedia/commons/thumb/9/9b/Lacoste_logo.svg/1024px-Lacoste_logo.svg.png",
    "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5c/Dior_Logo.svg/1024px-Dior_Logo.svg.png",
    "https://upload.wikimedia.org/wikipedia/commons/thumb/3/3a/Ralph_Lauren_Polo_logo.svg/1024px-Ralph_Lauren_Polo_logo.svg.png",
    "https://upload.wikimedia.org/wikipedia/commons/thumb/9/93/Chanel_logo_interlocking_cs.svg/1024px-Chanel_logo_interlocking_cs.svg.png",
    "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5c/Dior_Logo.svg/1024px-Dior_Logo.svg.png",
];

pub async fn get_banners(db: &Surreal<Db>) -> AppResult<Vec<String>> {
    let existing: Option<BannerSet> = db
        .query("SELECT images FROM type::thing($tb, $key)")
        .bind(("tb", BANNER_TABLE))
        .bind(("key", HOME_KEY))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(existing
        .map(|set| set.images)
        .unwrap_or_else(|| DEFAULT_BANNERS.iter().map(|s| (*s).to_string()).collect()))
}

pub async fn update_banners(db: &Surreal<Db>, images: Vec<String>) -> AppResult<Vec<String>> {
    db.query("UPSERT type::thing($tb, $key) CONTENT $data")
        .bind(("tb", BANNER_TABLE))
        .bind(("key", HOME_KEY))
        .bind(("data", BannerSet { images: images.clone() }))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(images)
}

pub async fn get_login_popup(db: &Surreal<Db>) -> AppResult<String> {
    let existing: Option<LoginPopup> = db
        .query("SELECT image FROM type::thing($tb, $key)")
        .bind(("tb", BANNER_TABLE))
        .bind(("key", LOGIN_POPUP_KEY))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(existing.map(|popup| popup.image).unwrap_or_default())
}

pub async fn update_login_popup(db: &Surreal<Db>, image: String) -> AppResult<String> {
    db.query("UPSERT type::thing($tb, $key) CONTENT $data")
        .bind(("tb", BANNER_TABLE))
        .bind(("key", LOGIN_POPUP_KEY))
        .bind(("data", LoginPopup { image: image.clone() }))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(image)
}

/// Install the default singletons when absent. Runs once at startup.
pub async fn ensure_defaults(db: &Surreal<Db>) -> AppResult<()> {
    let home: Option<BannerSet> = db
        .query("SELECT images FROM type::thing($tb, $key)")
        .bind(("tb", BANNER_TABLE))
        .bind(("key", HOME_KEY))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    if home.is_none() {
        update_banners(db, DEFAULT_BANNERS.iter().map(|s| (*s).to_string()).collect()).await?;
    }

    let popup: Option<LoginPopup> = db
        .query("SELECT image FROM type::thing($tb, $key)")
        .bind(("tb", BANNER_TABLE))
        .bind(("key", LOGIN_POPUP_KEY))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    if popup.is_none() {
        update_login_popup(db, String::new()).await?;
    }
    Ok(())
}
