use restaurant_order_api::services::auth_service::hash_password;

/// Prints the argon2 hash to put in `ADMIN_PASSWORD_HASH`.
fn main() -> anyhow::Result<()> {
    let Some(password) = std::env::args().nth(1) else {
        anyhow::bail!("usage: hash_password <password>");
    };
    println!("{}", hash_password(&password)?);
    Ok(())
}
