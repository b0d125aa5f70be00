use anyhow::Context;
use beanstream_rust::{
    apis::payments::{
        generate_random_order_id, CardBuilder, PaymentMethodRequest, PaymentRequestBuilder,
    },
    BeanstreamClient,
};

#[derive(serde::Deserialize, Debug)]
struct Config {
    merchant_id: String,
    payments_api_key: String,
    sub_merchant_id: Option<String>,
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

    // Setup Beanstream client
    let mut builder = BeanstreamClient::builder(config.merchant_id)
        .with_payments_api_key(config.payments_api_key);
    if let Some(sub_merchant_id) = config.sub_merchant_id {
        builder = builder.with_sub_merchant_id(sub_merchant_id);
    }
    let client = builder.build()?;

    // Pre-authorize a payment with a test card
    let payment = PaymentRequestBuilder::default()
        .order_number(generate_random_order_id("demo"))
        .amount(100.0)
        .payment_method(PaymentMethodRequest::Card {
            card: CardBuilder::default()
                .name("John Doe")
                .number("4030000010001234")
                .expiry_month("07")
                .expiry_year("29")
                .cvd("123")
                .complete(false)
                .build()?,
        })
        .build()?;

    let preauth = match client.payments.make_payment(&payment).await {
        Ok(res) => res,
        Err(e) if e.is_user_error() => {
            tracing::warn!("Payment declined: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Pre-authorized transaction {}", preauth.id);

    // Capture part of the reserved amount
    let completion = client.payments.complete_preauth(&preauth.id, 59.50).await?;

    tracing::info!(
        "Completed transaction {}: {}",
        completion.id,
        completion.message
    );

    let transaction = client.payments.get_transaction(&preauth.id).await?;

    tracing::info!("{:#?}", transaction);

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
