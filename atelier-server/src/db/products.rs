//! Product accessors

use shared::error::AppResult;
use shared::models::{Category, Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{db_err, new_record_key};

const PRODUCT_TABLE: &str = "product";

/// Starter catalog inserted when the collection is empty
const SEED_NAMES: [&str; 15] = [
    "Cucumber Melon",
    "Cloudy Scent",
    "Bacc540",
    "Burberry Weekend",
    "VelvetPetals",
    "LacosteRed",
    "Sauvage",
    "PoloSport",
    "LacosteWhite",
    "LacosteBlack",
    "CHGoodGirl",
    "MsDior",
    "TheBestScent",
    "StrongRed",
    "LanvinEclat",
];

const SEED_SIZES: [&str; 4] = ["70ml", "80ml", "90ml", "100ml"];
const SEED_CATEGORIES: [Category; 3] = [Category::Men, Category::Women, Category::Unisex];

pub async fn find_all(db: &Surreal<Db>) -> AppResult<Vec<Product>> {
    let products: Vec<Product> = db
        .query("SELECT *, record::id(id) AS id FROM product ORDER BY created_at")
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(products)
}

pub async fn find_by_id(db: &Surreal<Db>, id: &str) -> AppResult<Option<Product>> {
    let product: Option<Product> = db
        .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", PRODUCT_TABLE))
        .bind(("id", id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(product)
}

pub async fn create(db: &Surreal<Db>, data: ProductCreate) -> AppResult<Product> {
    let image_urls = data.image_urls.unwrap_or_else(|| {
        vec![
            data.image_url.unwrap_or_default(),
            String::new(),
            String::new(),
            String::new(),
        ]
    });
    let product = Product {
        id: None,
        name: data.name,
        price: data.price,
        stock: data.stock,
        notes: data.notes,
        size: data.size.unwrap_or_else(|| "100ml".to_string()),
        description: data.description.unwrap_or_default(),
        image_urls,
        category: data.category.unwrap_or_default(),
        active: data.active.unwrap_or(true),
        created_at: now_millis(),
    };

    let id = new_record_key();
    db.query("CREATE type::thing($tb, $id) CONTENT $data")
        .bind(("tb", PRODUCT_TABLE))
        .bind(("id", id.clone()))
        .bind(("data", product.clone()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;

    Ok(Product {
        id: Some(id),
        ..product
    })
}

/// Field-level merge update; absent fields stay untouched
pub async fn update(db: &Surreal<Db>, id: &str, data: ProductUpdate) -> AppResult<Option<Product>> {
    let product: Option<Product> = db
        .query("UPDATE type::thing($tb, $id) MERGE $data; SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", PRODUCT_TABLE))
        .bind(("id", id.to_string()))
        .bind(("data", data))
        .await
        .map_err(db_err)?
        .take(1)
        .map_err(db_err)?;
    Ok(product)
}

/// Seed the starter catalog when the collection is empty.
///
/// Runs once at startup.
pub async fn ensure_seeded(db: &Surreal<Db>) -> AppResult<()> {
    #[derive(serde::Deserialize)]
    struct Count {
        total: i64,
    }
    let count: Option<Count> = db
        .query("SELECT count() AS total FROM product GROUP ALL")
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    if count.map(|c| c.total).unwrap_or(0) > 0 {
        return Ok(());
    }

    for (index, name) in SEED_NAMES.iter().enumerate() {
        let product = ProductCreate {
            name: (*name).to_string(),
            price: 300.0,
            stock: 10 + (index as i32 % 5) * 4,
            notes: "Signature blend".to_string(),
            size: Some(SEED_SIZES[index % SEED_SIZES.len()].to_string()),
            description: Some(
                "A refined scent with balanced top, heart, and base notes.".to_string(),
            ),
            image_url: None,
            image_urls: Some(vec![String::new(); 4]),
            category: Some(SEED_CATEGORIES[index % SEED_CATEGORIES.len()]),
            active: Some(true),
        };
        create(db, product).await?;
    }
    tracing::info!(count = SEED_NAMES.len(), "Seeded starter catalog");
    Ok(())
}
