use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::call::{ApiCall, Reply};
use crate::endpoint::{Endpoint, Method};
use crate::envelope;
use crate::error::ApiError;
use crate::model::{
    ActorFilm, ActorSummary, Customer, CustomerFields, CustomerRental, FilmDetails, FilmSummary,
    NewRental, RentalConfirmation,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub body: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves a request to the server and brings back whatever it answered.
/// Non-2xx statuses are not errors at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::Transport(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn url_for(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(endpoint.segments());

        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.endpoint)?;
        let method = match request.endpoint.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = match bytes.is_empty() {
            true => Value::Null,
            false => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("[-] Non-JSON body from {}: {e}", request.endpoint);
                Value::Null
            }),
        };

        Ok(ApiResponse { status, body })
    }
}

/// Typed access to every endpoint of the rental API
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(base_url, timeout)?;

        Ok(Self::new(Arc::new(transport)))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        debug!("[*] {endpoint}");

        let key = endpoint.envelope_key();
        let response = self
            .transport
            .send(ApiRequest {
                endpoint: endpoint.clone(),
                body,
            })
            .await
            .inspect_err(|e| error!("[-] {endpoint} failed: {e}"))?;

        if !response.is_success() {
            let message = envelope::error_text(&response.body);
            error!("[-] {endpoint} returned {}", response.status);

            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        envelope::open(response.body, key).inspect_err(|e| error!("[-] {endpoint}: {e}"))
    }

    fn body<B: Serialize>(body: &B) -> Result<Option<Value>, ApiError> {
        serde_json::to_value(body)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn top_five_films(&self) -> Result<Vec<FilmSummary>, ApiError> {
        self.call(Endpoint::TopFiveFilms, None).await
    }

    pub async fn top_five_actors(&self) -> Result<Vec<ActorSummary>, ApiError> {
        self.call(Endpoint::TopFiveActors, None).await
    }

    pub async fn film_details(&self, film_id: u32) -> Result<Vec<FilmDetails>, ApiError> {
        self.call(Endpoint::DisplayFilmDetails(film_id), None).await
    }

    pub async fn actor_details(&self, actor_id: u32) -> Result<Vec<ActorFilm>, ApiError> {
        self.call(Endpoint::DisplayActorDetails(actor_id), None)
            .await
    }

    pub async fn search_by_title(&self, text: &str) -> Result<Vec<FilmSummary>, ApiError> {
        self.call(Endpoint::SearchByTitle(text.to_string()), None)
            .await
    }

    pub async fn search_by_category(&self, text: &str) -> Result<Vec<FilmSummary>, ApiError> {
        self.call(Endpoint::SearchByCategory(text.to_string()), None)
            .await
    }

    pub async fn search_by_actor(&self, text: &str) -> Result<Vec<FilmSummary>, ApiError> {
        self.call(Endpoint::SearchByActor(text.to_string()), None)
            .await
    }

    pub async fn view_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.call(Endpoint::ViewCustomers, None).await
    }

    pub async fn search_customer(&self, input: &str) -> Result<Vec<Customer>, ApiError> {
        self.call(Endpoint::SearchCustomer(input.to_string()), None)
            .await
    }

    pub async fn customer_details(&self, id: u32) -> Result<Vec<CustomerRental>, ApiError> {
        self.call(Endpoint::ViewCustomerDetails(id), None).await
    }

    pub async fn add_customer(&self, fields: &CustomerFields) -> Result<String, ApiError> {
        self.call(Endpoint::AddCustomer, Self::body(fields)?).await
    }

    pub async fn edit_customer(
        &self,
        id: &str,
        fields: &CustomerFields,
    ) -> Result<String, ApiError> {
        self.call(Endpoint::EditCustomer(id.to_string()), Self::body(fields)?)
            .await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<String, ApiError> {
        self.call(Endpoint::DeleteCustomer(id.to_string()), None)
            .await
    }

    pub async fn add_rental(&self, rental: &NewRental) -> Result<String, ApiError> {
        self.call(Endpoint::AddRental, Self::body(rental)?).await
    }

    pub async fn confirm_rental(
        &self,
        confirmation: &RentalConfirmation,
    ) -> Result<String, ApiError> {
        self.call(Endpoint::ConfirmRental, Self::body(confirmation)?)
            .await
    }

    pub async fn return_movie(&self, rental_id: &str) -> Result<String, ApiError> {
        self.call(Endpoint::ReturnMovie(rental_id.to_string()), None)
            .await
    }

    /// Runs any call and wraps its payload in a [`Reply`]
    pub async fn execute(&self, call: ApiCall) -> Result<Reply, ApiError> {
        match call {
            ApiCall::TopFiveFilms => self.top_five_films().await.map(Reply::Films),
            ApiCall::TopFiveActors => self.top_five_actors().await.map(Reply::Actors),
            ApiCall::FilmDetails(id) => self.film_details(id).await.map(Reply::FilmDetails),
            ApiCall::ActorDetails(id) => self.actor_details(id).await.map(Reply::ActorDetails),
            ApiCall::SearchByTitle(text) => self.search_by_title(&text).await.map(Reply::Films),
            ApiCall::SearchByCategory(text) => {
                self.search_by_category(&text).await.map(Reply::Films)
            }
            ApiCall::SearchByActor(text) => self.search_by_actor(&text).await.map(Reply::Films),
            ApiCall::ViewCustomers => self.view_customers().await.map(Reply::Customers),
            ApiCall::SearchCustomer(input) => {
                self.search_customer(&input).await.map(Reply::Customers)
            }
            ApiCall::CustomerDetails(id) => {
                self.customer_details(id).await.map(Reply::CustomerDetails)
            }
            ApiCall::AddCustomer(fields) => self.add_customer(&fields).await.map(Reply::Message),
            ApiCall::EditCustomer { id, fields } => {
                self.edit_customer(&id, &fields).await.map(Reply::Message)
            }
            ApiCall::DeleteCustomer(id) => self.delete_customer(&id).await.map(Reply::Message),
            ApiCall::AddRental(rental) => self.add_rental(&rental).await.map(Reply::Message),
            ApiCall::ConfirmRental(confirmation) => self
                .confirm_rental(&confirmation)
                .await
                .map(Reply::Message),
            ApiCall::ReturnMovie(rental_id) => {
                self.return_movie(&rental_id).await.map(Reply::Message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_encode_path_and_query() {
        let transport = HttpTransport::new("http://localhost:5000", None).unwrap();

        let url = transport
            .url_for(&Endpoint::SearchByTitle(String::from("the matrix")))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/searchByTitle/the%20matrix");

        let url = transport
            .url_for(&Endpoint::SearchCustomer(String::from("mary smith")))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/searchCustomer?searchInput=mary+smith"
        );

        let url = transport.url_for(&Endpoint::TopFiveFilms).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/topFiveFilms");
    }

    #[test]
    fn base_url_with_prefix_keeps_prefix() {
        let transport = HttpTransport::new("http://rentals.local/api/", None).unwrap();

        let url = transport
            .url_for(&Endpoint::ReturnMovie(String::from("42")))
            .unwrap();
        assert_eq!(url.as_str(), "http://rentals.local/api/returnMovie/42");
    }

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url", None),
            Err(ApiError::Transport(_))
        ));
    }
}
