use async_trait::async_trait;
use kernel::client::flight::FlightProviderClient;
use kernel::model::flight::{FlightOrder, ProviderBookingRef};
use serde::{Deserialize, Serialize};
use shared::{config::FlightProviderConfig, error::{AppError, AppResult}};

// 外部フライト予約プロバイダーの HTTP クライアント。
// プロバイダーの中身は不透明で、発券に成功すると予約参照番号が返る
pub struct FlightProviderClientImpl {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FlightProviderClientImpl {
    pub fn new(cfg: &FlightProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookFlightRequest<'a> {
    flight_number: &'a str,
    departure_date: chrono::NaiveDate,
    origin: &'a str,
    destination: &'a str,
    passenger_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookFlightResponse {
    booking_ref: String,
}

#[async_trait]
impl FlightProviderClient for FlightProviderClientImpl {
    async fn book_flight(&self, order: FlightOrder) -> AppResult<ProviderBookingRef> {
        let url = format!("{}/bookings", self.base_url);
        let res = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&BookFlightRequest {
                flight_number: &order.flight_number,
                departure_date: order.departure_date,
                origin: &order.origin,
                destination: &order.destination,
                passenger_name: &order.passenger_name,
            })
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("flight provider error: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "flight provider returned status {}",
                res.status()
            )));
        }

        let body: BookFlightResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("flight provider error: {e}")))?;

        Ok(ProviderBookingRef(body.booking_ref))
    }
}
