//! Basic usage of the Qianfan provider.
//!
//! Set an access token and run:
//!   WENXIN_ACCESS_TOKEN=... cargo run --example basic -- "你好"

use wenxin_provider_qianfan::WenxinQianfan;
use wenxin_types::Llm;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Say hello in one sentence.".into());

    let mut llm = WenxinQianfan::from_env()?.temperature(0.8);
    let result = llm.generate(&[prompt], None).await?;

    println!("[{}] {}", llm.llm_type(), result.generations[0].text);
    println!("history: {} message(s)", llm.conversation().len());

    Ok(())
}
