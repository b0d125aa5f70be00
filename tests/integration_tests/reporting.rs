use crate::{common::test_context::TestContext, integration_tests::helpers::make_tagged_payment};
use beanstream_rust::{
    apis::{
        payments::generate_random_order_id,
        reporting::{Criteria, Operator, SearchField},
    },
    credentials::ApiFamily,
    Error,
};
use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;

/// A day around now, so the merchant time zone does not matter.
fn around_now() -> (NaiveDateTime, NaiveDateTime) {
    let now = Utc::now().naive_utc();
    (now - Duration::hours(12), now + Duration::hours(12))
}

#[tokio::test]
async fn reports_url() {
    let ctx = TestContext::start().await;

    assert_eq!(ctx.client.reporting.reports_url(), "/v1/reports");
}

#[tokio::test]
async fn search_transactions() {
    let ctx = TestContext::start().await;
    let prefix = Uuid::new_v4().simple().to_string()[..8].to_string();
    let order_numbers = [
        generate_random_order_id(&prefix),
        generate_random_order_id(&prefix),
        generate_random_order_id(&prefix),
    ];

    for (order_number, amount) in order_numbers.iter().zip([100.0, 33.29, 21.55]) {
        make_tagged_payment(&ctx, &prefix, order_number, amount)
            .await
            .unwrap();
    }
    let (start, end) = around_now();

    // All the transactions in the time span
    let records = ctx
        .client
        .reporting
        .search_transactions(start, end, 1, 3, &[])
        .await
        .unwrap();
    assert_eq!(records.len(), 3);

    // By order number
    let records = ctx
        .client
        .reporting
        .search_transactions(
            start,
            end,
            1,
            10,
            &[Criteria::new(
                SearchField::OrderNumber,
                Operator::Equals,
                order_numbers[0].as_str(),
            )],
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].trn_order_number.as_deref(),
        Some(order_numbers[0].as_str())
    );

    // By reference and amount
    let records = ctx
        .client
        .reporting
        .search_transactions(
            start,
            end,
            1,
            10,
            &[
                Criteria::new(SearchField::Ref1, Operator::Equals, prefix.as_str()),
                Criteria::new(SearchField::Amount, Operator::LessThan, 50),
            ],
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn search_without_reporting_key_fails_before_sending() {
    let ctx = TestContext::start().await;
    let client = ctx
        .client_builder()
        .with_payments_api_key(ctx.payments_api_key())
        .build()
        .unwrap();
    let (start, end) = around_now();

    let err = client
        .reporting
        .search_transactions(start, end, 1, 3, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingCredentials(ApiFamily::Reporting)));
}
