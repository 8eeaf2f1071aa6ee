use log::info;
use todoweb::config::Settings;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let rocket = todoweb::rocket_instance(&settings)?;

    info!(
        "starting todoweb on {}:{} ({} storage, secure cookies: {})",
        settings.host,
        settings.port,
        settings.storage.label(),
        settings.production
    );

    rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("server failed to launch: {}", e))?;
    Ok(())
}
