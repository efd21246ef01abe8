use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::configuration::PaymentSettings;

// One order line as presented to the payment provider; unit_amount is in
// minor currency units
#[derive(Clone, Debug)]
pub struct CheckoutLine {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub unit_amount: i64,
    pub quantity: i32,
}

// What checkout initiation hands back to the caller, whichever strategy ran
#[derive(Clone, Debug)]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
    pub is_mock: bool,
}

// Client to interact with the hosted-checkout provider
#[derive(Clone)]
pub struct HostedCheckoutClient {
    http_client: Client,
    base_url: String,
    secret_key: SecretString,
    currency: String,
}

impl HostedCheckoutClient {
    // create new hosted checkout client
    pub fn new(
        base_url: String,
        secret_key: SecretString,
        currency: String,
        timeout: u64,
    ) -> HostedCheckoutClient {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .unwrap();

        Self {
            http_client,
            base_url,
            secret_key,
            currency,
        }
    }

    #[tracing::instrument(
        "Requesting hosted checkout session from provider",
        skip(self, lines, success_url, cancel_url)
    )]
    pub async fn create_session(
        &self,
        order_id: Uuid,
        lines: &[CheckoutLine],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<ProviderSession, reqwest::Error> {
        let url = format!("{}/v1/checkout/sessions", self.base_url);
        let request_body = CreateSessionRequest {
            line_items: lines
                .iter()
                .map(|line| SessionLineItem {
                    currency: &self.currency,
                    name: &line.name,
                    description: line.description.as_deref(),
                    image: line.image.as_deref(),
                    unit_amount: line.unit_amount,
                    quantity: line.quantity,
                })
                .collect(),
            mode: "payment",
            success_url,
            cancel_url,
            metadata: SessionMetadata { order_id },
        };

        self.http_client
            .post(url)
            .bearer_auth(self.secret_key.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json::<ProviderSession>()
            .await
    }
}

#[derive(Serialize, Deserialize)]
pub struct CreateSessionRequest<'a> {
    pub line_items: Vec<SessionLineItem<'a>>,
    pub mode: &'a str,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
    pub metadata: SessionMetadata,
}

#[derive(Serialize, Deserialize)]
pub struct SessionLineItem<'a> {
    pub currency: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub unit_amount: i64,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "orderId")]
    pub order_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct ProviderSession {
    pub id: String,
    pub url: String,
}

pub fn mock_reference(order_id: Uuid) -> String {
    format!("mock_{}", order_id)
}

// The two checkout strategies behind one initiation interface. Which one
// runs is decided at construction from configuration, never from an
// implicit environment read, so tests pick either deterministically.
#[derive(Clone)]
pub enum PaymentGateway {
    Hosted(HostedCheckoutClient),
    Mock,
}

impl PaymentGateway {
    pub fn from_settings(settings: &PaymentSettings) -> PaymentGateway {
        match &settings.secret_key {
            Some(secret_key) => PaymentGateway::Hosted(HostedCheckoutClient::new(
                settings.api_uri.clone(),
                secret_key.clone(),
                settings.currency.clone(),
                settings.timeout_seconds,
            )),
            None => PaymentGateway::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, PaymentGateway::Mock)
    }

    // The mock path never leaves the process: it synthesises a reference
    // from the order id and redirects straight to the caller's success URL
    pub async fn initiate(
        &self,
        order_id: Uuid,
        lines: &[CheckoutLine],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, reqwest::Error> {
        match self {
            PaymentGateway::Hosted(client) => {
                let session = client
                    .create_session(order_id, lines, success_url, cancel_url)
                    .await?;

                Ok(CheckoutSession {
                    session_id: session.id,
                    url: session.url,
                    is_mock: false,
                })
            }
            PaymentGateway::Mock => Ok(CheckoutSession {
                session_id: mock_reference(order_id),
                url: success_url.to_string(),
                is_mock: true,
            }),
        }
    }
}
