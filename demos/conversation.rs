use localml::{ClientConfig, Conversation};

const MODEL: &str = "gemma3";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = ClientConfig::default().token_from_env().model(MODEL);
    let mut conversation = Conversation::connect(config, Some("You are a terse assistant."))?;

    println!("dialect: {}", conversation.provider().dialect());

    let first = conversation.send_default("Name three prime numbers.")?;
    println!("{first}");

    let second = conversation.send_with_summary_context("Now add them together.")?;
    println!("{second}");

    let third = conversation.send_with_full_context("What did I ask first?")?;
    println!("{third}");

    conversation.save_transcript("transcript.json")?;

    Ok(())
}
