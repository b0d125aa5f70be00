use crate::{
    apis::{
        payments::{
            model::{AmountRequest, TokenizationResponse},
            PaymentRequest, PaymentResponse, TokenizationRequest, Transaction,
        },
        BeanstreamClientInner,
    },
    credentials::{ApiFamily, Credentials},
    transport::ApiRequest,
    Error,
};
use reqwest::Method;
use std::sync::Arc;
use urlencoding::encode;

static TOKENIZATION_PATH: &str = "/scripts/tokenization/tokens";

/// Beanstream payments APIs client.
#[derive(Clone, Debug)]
pub struct PaymentsApi {
    inner: Arc<BeanstreamClientInner>,
}

impl PaymentsApi {
    pub(crate) fn new(inner: Arc<BeanstreamClientInner>) -> Self {
        Self { inner }
    }

    /// Path used to make new payments, e.g. `/v1/payments/`.
    pub fn make_payment_url(&self) -> String {
        format!("{}/payments/", self.inner.api_base_url())
    }

    pub fn get_transaction_url(&self, transaction_id: &str) -> String {
        format!(
            "{}/payments/{}",
            self.inner.api_base_url(),
            encode(transaction_id)
        )
    }

    pub fn payment_returns_url(&self, transaction_id: &str) -> String {
        format!("{}/returns", self.get_transaction_url(transaction_id))
    }

    pub fn payment_void_url(&self, transaction_id: &str) -> String {
        format!("{}/void", self.get_transaction_url(transaction_id))
    }

    pub fn payment_completions_url(&self, transaction_id: &str) -> String {
        format!("{}/completions", self.get_transaction_url(transaction_id))
    }

    /// Makes a payment.
    ///
    /// A declined payment fails with an [`ApiError`](crate::error::ApiError) for which
    /// [`is_user_error`](crate::error::ApiError::is_user_error) is `true`.
    #[tracing::instrument(
        name = "Make Payment",
        skip(self, payment),
        fields(
            order_number = %payment.order_number,
            amount = payment.amount,
            payment_method = %payment.payment_method.payment_method(),
        )
    )]
    pub async fn make_payment(&self, payment: &PaymentRequest) -> Result<PaymentResponse, Error> {
        self.inner
            .send(
                ApiFamily::Payments,
                Method::POST,
                self.make_payment_url(),
                Some(payment),
            )
            .await
    }

    /// Completes a pre-authorized payment for the given amount.
    #[tracing::instrument(name = "Complete Pre-Authorization", skip(self))]
    pub async fn complete_preauth(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<PaymentResponse, Error> {
        self.inner
            .send(
                ApiFamily::Payments,
                Method::POST,
                self.payment_completions_url(transaction_id),
                Some(&AmountRequest { amount }),
            )
            .await
    }

    /// Gets the details of an existing transaction.
    #[tracing::instrument(name = "Get Transaction", skip(self))]
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, Error> {
        self.inner
            .send_without_body(
                ApiFamily::Payments,
                Method::GET,
                self.get_transaction_url(transaction_id),
            )
            .await
    }

    /// Returns (refunds) the given amount of a settled payment.
    #[tracing::instrument(name = "Return Payment", skip(self))]
    pub async fn return_payment(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<PaymentResponse, Error> {
        self.inner
            .send(
                ApiFamily::Payments,
                Method::POST,
                self.payment_returns_url(transaction_id),
                Some(&AmountRequest { amount }),
            )
            .await
    }

    /// Voids a payment made on the same day.
    #[tracing::instrument(name = "Void Payment", skip(self))]
    pub async fn void_payment(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<PaymentResponse, Error> {
        self.inner
            .send(
                ApiFamily::Payments,
                Method::POST,
                self.payment_void_url(transaction_id),
                Some(&AmountRequest { amount }),
            )
            .await
    }

    /// Exchanges card details for a single-use Legato token.
    ///
    /// This is normally done by the client application, so the card number never reaches
    /// the merchant's servers. The tokenization endpoint does not take merchant credentials.
    #[tracing::instrument(name = "Get Legato Token", skip_all)]
    pub async fn get_legato_token(&self, card: &TokenizationRequest) -> Result<String, Error> {
        let credentials = Credentials::anonymous();
        let request = ApiRequest::new(Method::POST, TOKENIZATION_PATH, &credentials)
            .with_body(serde_json::to_value(card)?);

        let res: TokenizationResponse = self.inner.transport.execute_as(request).await?;

        Ok(res.token)
    }
}
