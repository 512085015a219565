use std::collections::BTreeSet;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::catalog::{
        CatalogList, CategoryList, CreateProductRequest, DeletedProduct, UpdateProductRequest,
    },
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, ensure_admin},
    models::CatalogItem,
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    state::AppState,
};

/// Source of the products a customer can order.
///
/// Customers only read from it; the write operations back the admin menu
/// editor. Carts hold copies, so edits never touch items already added.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Products in publication order, optionally restricted to one category.
    async fn list(&self, category: Option<&str>) -> AppResult<Vec<CatalogItem>>;

    async fn find(&self, id: &str) -> AppResult<Option<CatalogItem>>;

    /// Distinct category labels, ascending.
    async fn categories(&self) -> AppResult<Vec<String>>;

    async fn create(&self, product: CreateProductRequest) -> AppResult<CatalogItem>;

    /// `None` when no product has that id.
    async fn update(
        &self,
        id: &str,
        changes: UpdateProductRequest,
    ) -> AppResult<Option<CatalogItem>>;

    /// `false` when no product has that id.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

/// Catalog backed by the `products` table.
#[derive(Clone)]
pub struct DbCatalog {
    orm: DatabaseConnection,
}

impl DbCatalog {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl CatalogSource for DbCatalog {
    async fn list(&self, category: Option<&str>) -> AppResult<Vec<CatalogItem>> {
        let mut finder = Products::find();
        if let Some(category) = category {
            finder = finder.filter(Column::Category.eq(category));
        }

        let items = finder
            .order_by_asc(Column::CreatedAt)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(item_from_entity)
            .collect();
        Ok(items)
    }

    async fn find(&self, id: &str) -> AppResult<Option<CatalogItem>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let item = Products::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(item_from_entity);
        Ok(item)
    }

    async fn categories(&self) -> AppResult<Vec<String>> {
        let categories = Products::find()
            .select_only()
            .column(Column::Category)
            .distinct()
            .order_by_asc(Column::Category)
            .into_tuple::<String>()
            .all(&self.orm)
            .await?;
        Ok(categories)
    }

    async fn create(&self, product: CreateProductRequest) -> AppResult<CatalogItem> {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            image_url: Set(product.image),
            category: Set(product.category),
            created_at: NotSet,
        };
        let model = active.insert(&self.orm).await?;
        Ok(item_from_entity(model))
    }

    async fn update(
        &self,
        id: &str,
        changes: UpdateProductRequest,
    ) -> AppResult<Option<CatalogItem>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let Some(existing) = Products::find_by_id(id).one(&self.orm).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description).filter(|d| !d.is_empty()));
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(image) = changes.image {
            active.image_url = Set(Some(image).filter(|i| !i.is_empty()));
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }

        let model = active.update(&self.orm).await?;
        Ok(Some(item_from_entity(model)))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };
        let result = Products::delete_by_id(id).exec(&self.orm).await?;
        Ok(result.rows_affected > 0)
    }
}

/// Catalog held in memory, used when no database is configured. Admin
/// edits last until the process exits.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: RwLock<Vec<CatalogItem>>,
}

impl MemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub fn sample_menu() -> Self {
        Self::new(sample_menu())
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn list(&self, category: Option<&str>) -> AppResult<Vec<CatalogItem>> {
        let items = self
            .items
            .read()
            .await
            .iter()
            .filter(|item| category.is_none_or(|category| item.category == category))
            .cloned()
            .collect();
        Ok(items)
    }

    async fn find(&self, id: &str) -> AppResult<Option<CatalogItem>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn categories(&self) -> AppResult<Vec<String>> {
        let items = self.items.read().await;
        let categories: BTreeSet<String> = items.iter().map(|item| item.category.clone()).collect();
        Ok(categories.into_iter().collect())
    }

    async fn create(&self, product: CreateProductRequest) -> AppResult<CatalogItem> {
        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            name: product.name,
            description: product.description.unwrap_or_default(),
            price: product.price,
            image: product.image.unwrap_or_default(),
            category: product.category,
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: &str,
        changes: UpdateProductRequest,
    ) -> AppResult<Option<CatalogItem>> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(description) = changes.description {
            item.description = description;
        }
        if let Some(price) = changes.price {
            item.price = price;
        }
        if let Some(image) = changes.image {
            item.image = image;
        }
        if let Some(category) = changes.category {
            item.category = category;
        }
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }
}

pub async fn list_catalog(
    state: &AppState,
    query: CatalogQuery,
) -> AppResult<ApiResponse<CatalogList>> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let items = state.catalog.list(category).await?;
    let meta = Meta::count(items.len() as u64);
    Ok(ApiResponse::success("Catalog", CatalogList { items }, Some(meta)))
}

pub async fn get_catalog_item(state: &AppState, id: &str) -> AppResult<ApiResponse<CatalogItem>> {
    let item = match state.catalog.find(id).await? {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", item, None))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.catalog.categories().await?;
    let meta = Meta::count(items.len() as u64);
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn create_product(
    state: &AppState,
    user: &AdminUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<CatalogItem>> {
    ensure_admin(user)?;
    let payload = CreateProductRequest {
        name: required_text(&payload.name, "name")?,
        description: optional_text(payload.description),
        price: valid_price(payload.price)?,
        image: optional_text(payload.image),
        category: required_text(&payload.category, "category")?,
    };

    let item = state.catalog.create(payload).await?;

    log_audit(
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": item.id, "admin": user.email })),
    );

    Ok(ApiResponse::success("Product created", item, Some(Meta::empty())))
}

pub async fn update_product(
    state: &AppState,
    user: &AdminUser,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<CatalogItem>> {
    ensure_admin(user)?;
    let changes = UpdateProductRequest {
        name: payload.name.map(|n| required_text(&n, "name")).transpose()?,
        description: payload.description.map(|d| d.trim().to_string()),
        price: payload.price.map(valid_price).transpose()?,
        image: payload.image.map(|i| i.trim().to_string()),
        category: payload
            .category
            .map(|c| required_text(&c, "category"))
            .transpose()?,
    };

    let item = match state.catalog.update(id, changes).await? {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    log_audit(
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": item.id, "admin": user.email })),
    );

    Ok(ApiResponse::success("Updated", item, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AdminUser,
    id: &str,
) -> AppResult<ApiResponse<DeletedProduct>> {
    ensure_admin(user)?;
    if !state.catalog.delete(id).await? {
        return Err(AppError::NotFound);
    }

    log_audit(
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id, "admin": user.email })),
    );

    let data = DeletedProduct { id: id.to_string() };
    Ok(ApiResponse::success("Deleted", data, Some(Meta::empty())))
}

fn required_text(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be blank")));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn valid_price(price: Decimal) -> AppResult<Decimal> {
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    Ok(price)
}

fn item_from_entity(model: ProductModel) -> CatalogItem {
    CatalogItem {
        id: model.id.to_string(),
        name: model.name,
        description: model.description.unwrap_or_default(),
        price: model.price,
        image: model.image_url.unwrap_or_default(),
        category: model.category,
    }
}

/// Menu used by the in-memory catalog and by the `seed` binary.
pub fn sample_menu() -> Vec<CatalogItem> {
    let entries = [
        (
            "classic-burger",
            "Classic Burger",
            "Beef patty, cheddar, lettuce and tomato",
            Decimal::new(2590, 2),
            "Burgers",
        ),
        (
            "bacon-burger",
            "Bacon Burger",
            "Beef patty, crispy bacon and smoked cheese",
            Decimal::new(3190, 2),
            "Burgers",
        ),
        (
            "veggie-burger",
            "Veggie Burger",
            "Chickpea patty, rocket and vegan mayo",
            Decimal::new(2790, 2),
            "Burgers",
        ),
        (
            "pepperoni-pizza",
            "Pepperoni Pizza",
            "Mozzarella, pepperoni and oregano",
            Decimal::new(4990, 2),
            "Pizzas",
        ),
        ("cola", "Cola", "350ml can", Decimal::new(600, 2), "Drinks"),
        (
            "orange-juice",
            "Orange Juice",
            "Freshly squeezed, 500ml",
            Decimal::new(900, 2),
            "Drinks",
        ),
        (
            "brownie",
            "Brownie",
            "Chocolate brownie with walnuts",
            Decimal::new(1200, 2),
            "Desserts",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, name, description, price, category)| CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: format!("/images/{id}.jpg"),
            category: category.to_string(),
        })
        .collect()
}
