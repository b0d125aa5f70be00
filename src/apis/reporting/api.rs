use crate::{
    apis::{
        reporting::{
            model::{SearchQuery, SearchResponse},
            Criteria, TransactionRecord,
        },
        BeanstreamClientInner,
    },
    credentials::ApiFamily,
    Error,
};
use chrono::NaiveDateTime;
use reqwest::Method;
use std::sync::Arc;

/// Beanstream reporting APIs client.
#[derive(Clone, Debug)]
pub struct ReportingApi {
    inner: Arc<BeanstreamClientInner>,
}

impl ReportingApi {
    pub(crate) fn new(inner: Arc<BeanstreamClientInner>) -> Self {
        Self { inner }
    }

    pub fn reports_url(&self) -> String {
        format!("{}/reports", self.inner.api_base_url())
    }

    /// Searches the transactions processed between `start_date` and `end_date`.
    ///
    /// Rows are numbered from 1 and `end_row` is inclusive. Dates are interpreted by the
    /// server in the merchant's time zone. An empty `criteria` slice matches every
    /// transaction in the time span.
    #[tracing::instrument(name = "Search Transactions", skip(self, criteria))]
    pub async fn search_transactions(
        &self,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        start_row: u32,
        end_row: u32,
        criteria: &[Criteria],
    ) -> Result<Vec<TransactionRecord>, Error> {
        let query = SearchQuery::new(start_date, end_date, start_row, end_row, criteria);

        let res: SearchResponse = self
            .inner
            .send(
                ApiFamily::Reporting,
                Method::POST,
                self.reports_url(),
                Some(&query),
            )
            .await?;

        Ok(res.records)
    }
}
