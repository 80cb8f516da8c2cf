use localml::{ClientConfig, LocalClient};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let client = LocalClient::connect(ClientConfig::default().token_from_env())?;
    println!("dialect: {}", client.dialect());

    let Some(models) = client.list_models() else {
        anyhow::bail!("could not list models");
    };

    // OpenWebUI lists under `data`, Ollama under `models`.
    let entries = models
        .get("data")
        .or_else(|| models.get("models"))
        .and_then(|this| this.as_array())
        .cloned()
        .unwrap_or_default();

    for model in entries {
        let id = model.get("id").or_else(|| model.get("name"));
        println!("{}", id.and_then(|this| this.as_str()).unwrap_or("??"));
    }

    Ok(())
}
