#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = toybox_api::setup::load_config()?;

    // Storage failures abort here, before the listener is bound.
    let (_state, router) = toybox_api::setup::initialize_app(config.clone()).await?;

    toybox_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
