use restaurant_order_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::catalog_service::sample_menu,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let Some(database_url) = config.database_url.as_deref() else {
        anyhow::bail!("DATABASE_URL must be set to seed the catalog");
    };

    let orm = create_orm_conn(database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm, "migrations").await?;

    let inserted = seed_products(&orm).await?;
    println!("Seed completed. {inserted} new products");
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<u64> {
    let backend = orm.get_database_backend();
    let mut inserted = 0;

    for item in sample_menu() {
        let result = orm
            .execute(Statement::from_sql_and_values(
                backend,
                r#"
                INSERT INTO products (id, name, description, price, image_url, category)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (name) DO NOTHING
                "#,
                [
                    Uuid::new_v4().into(),
                    item.name.clone().into(),
                    item.description.into(),
                    item.price.into(),
                    item.image.into(),
                    item.category.into(),
                ],
            ))
            .await?;

        if result.rows_affected() > 0 {
            println!("Seeded {}", item.name);
        }
        inserted += result.rows_affected();
    }

    Ok(inserted)
}
