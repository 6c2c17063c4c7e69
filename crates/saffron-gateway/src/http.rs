//! # HTTP Gateway
//!
//! The production [`SettlementGateway`] implementation: JSON over HTTP
//! against the backend's POS endpoints. Thin by design; everything
//! interesting happens in the normalization step (`types`), not here.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use async_trait::async_trait;
use saffron_core::{PaymentSet, TransactionTypeProfile};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SettlementGateway;
use crate::types::{
    BaseCurrencyReply, ConvertQuotationReply, ConvertQuotationRequest, CreateDocumentReply,
    CreateDocumentRequest, DefaultCustomerReply, DocumentOutcome, ExchangeQuote, PaymentReceipt,
};

/// Backend endpoints, relative to the configured base URL.
mod paths {
    pub const BASE_CURRENCY: &str = "api/pos/settings/base-currency";
    pub const EXCHANGE_RATES: &str = "api/pos/currency-exchange";
    pub const CREATE_DOCUMENT: &str = "api/pos/documents/create";
    pub const CONVERT_QUOTATION: &str = "api/pos/documents/convert";
    pub const SUBMIT_PAYMENT: &str = "api/pos/payments/multi-currency";
    pub const DEFAULT_CUSTOMER: &str = "api/pos/customers/default";
    pub const TRANSACTION_TYPES: &str = "api/pos/transaction-types";
    pub const QUOTATION_SNAPSHOT: &str = "api/pos/documents/snapshot";
}

/// Connection settings for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend base URL, e.g. `https://pos.example.com`.
    pub base_url: String,

    /// Bearer token, when the deployment requires one.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        GatewayConfig {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP implementation of the settlement gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    /// Creates a gateway from configuration.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::from)?;

        Ok(HttpGateway {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Replaces the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> GatewayResult<T> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        Self::handle(request.send().await?).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        Self::handle(request.send().await?).await
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failure_from_status(status.as_u16(), &body));
        }

        response.json().await.map_err(Into::into)
    }
}

/// Maps a non-success status and body into the most specific error:
/// structured failure detail when the body parses as one, a bare status
/// error otherwise.
fn failure_from_status(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<crate::types::FailureDetail>(body) {
        Ok(detail) if !detail.is_empty() => GatewayError::Rejected(detail),
        _ => GatewayError::Status {
            status,
            body: snippet(body),
        },
    }
}

/// Keeps error bodies log-sized.
fn snippet(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

#[async_trait]
impl SettlementGateway for HttpGateway {
    async fn base_currency(&self) -> GatewayResult<String> {
        let reply: BaseCurrencyReply = self.get_json(paths::BASE_CURRENCY, &[]).await?;
        // Deployments without an explicit setting price in USD.
        Ok(reply.currency.unwrap_or_else(|| "USD".to_string()))
    }

    async fn exchange_rates(&self, base: &str) -> GatewayResult<Vec<ExchangeQuote>> {
        debug!(base, "fetching exchange rates");
        self.get_json(paths::EXCHANGE_RATES, &[("from", base)]).await
    }

    async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> GatewayResult<DocumentOutcome> {
        debug!(kind = %request.kind, lines = request.lines.len(), "creating document");
        let reply: CreateDocumentReply = self.post_json(paths::CREATE_DOCUMENT, request).await?;
        Ok(reply.into_outcome(request.kind))
    }

    async fn convert_quotation(
        &self,
        request: &ConvertQuotationRequest,
    ) -> GatewayResult<DocumentOutcome> {
        debug!(quotation = %request.quotation_id, "converting quotation");
        let reply: ConvertQuotationReply = self.post_json(paths::CONVERT_QUOTATION, request).await?;
        Ok(reply.into_outcome())
    }

    async fn submit_payment(
        &self,
        customer: &str,
        payments: &PaymentSet,
    ) -> GatewayResult<PaymentReceipt> {
        #[derive(Serialize)]
        struct PaymentRequest<'a> {
            customer: &'a str,
            payments: &'a PaymentSet,
        }

        debug!(customer, currencies = payments.len(), "submitting payment");
        self.post_json(paths::SUBMIT_PAYMENT, &PaymentRequest { customer, payments })
            .await
    }

    async fn default_customer(&self) -> GatewayResult<Option<String>> {
        let reply: DefaultCustomerReply = self.get_json(paths::DEFAULT_CUSTOMER, &[]).await?;
        Ok(reply.customer.filter(|c| !c.trim().is_empty()))
    }

    async fn transaction_types(&self) -> GatewayResult<TransactionTypeProfile> {
        self.get_json(paths::TRANSACTION_TYPES, &[]).await
    }

    async fn quotation_snapshot(&self, document_id: &str) -> GatewayResult<serde_json::Value> {
        self.get_json(paths::QUOTATION_SNAPSHOT, &[("id", document_id)])
            .await
    }
}
