use dragon_env::{Decoder, Loader};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AppConfig {
    app: AppSection,
    database: DatabaseSection,
}

#[derive(Debug, Deserialize)]
struct AppSection {
    name: String,
    debug: bool,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct DatabaseSection {
    host: String,
    port: u16,
    url: String,
}

fn main() -> Result<(), dragon_env::Error> {
    // Shared defaults first, then optional local overrides.
    Loader::new()
        .with_file("demos/default.env", true)
        .with_file("demos/local.env", false)
        .load()?;

    println!("database url: {}", dragon_env::get("DEMO__DATABASE__URL"));
    println!(
        "pool size: {}",
        dragon_env::get_i32_or("DEMO_POOL_SIZE", 4).unwrap_or_else(|e| e.into_value())
    );

    let config: AppConfig = Decoder::new().prefix("DEMO").separator("__").decode()?;
    println!("app: {} (debug={})", config.app.name, config.app.debug);
    println!("database: {:?}", config.database);

    Ok(())
}
