use anyhow::Context;
use beanstream_rust::{
    apis::reporting::{Criteria, Operator, SearchField},
    BeanstreamClient,
};
use chrono::{Duration, Local};

#[derive(serde::Deserialize, Debug)]
struct Config {
    merchant_id: String,
    reporting_api_key: String,
    /// Only list transactions whose `ref1` starts with this.
    ref1_prefix: Option<String>,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    let client = BeanstreamClient::builder(config.merchant_id)
        .with_reporting_api_key(config.reporting_api_key)
        .build()?;

    let criteria = config
        .ref1_prefix
        .map(|prefix| Criteria::new(SearchField::Ref1, Operator::StartsWith, prefix))
        .into_iter()
        .collect::<Vec<_>>();

    // Everything processed in the last day, 50 rows at a time
    let end = Local::now().naive_local();
    let start = end - Duration::days(1);
    let mut start_row = 1;
    loop {
        let records = client
            .reporting
            .search_transactions(start, end, start_row, start_row + 49, &criteria)
            .await?;

        for record in &records {
            tracing::info!(
                "Transaction {}: order {}",
                record.trn_id.as_deref().unwrap_or("-"),
                record.trn_order_number.as_deref().unwrap_or("-")
            );
        }

        if records.len() < 50 {
            break;
        }
        start_row += 50;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
