//! HTTP implementation of the burger API.
//!
//! [`BurgerApiClient`] implements `BurgerApi` against the remote REST API.
//! Every response carries a `success` flag; `success: false` is an error
//! even on HTTP 200. Rejected access tokens map to `ApiError::Unauthorized`
//! so the session reducer can attempt its one-shot refresh.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod error;

pub use error::ClientError;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use stellar_burgers_app::UserUpdate;
use stellar_burgers_app::providers::{
    ApiError, AuthPayload, BurgerApi, FeedSnapshot, OrderConfirmation, TokenPair,
};
use stellar_burgers_app::state::{
    Ingredient, IngredientId, IngredientKind, Order, OrderStatus, User,
};

/// HTTP client for the burger API.
///
/// # Example
///
/// ```no_run
/// use stellar_burgers_client::BurgerApiClient;
///
/// let api = BurgerApiClient::new("https://norma.nomoreparties.space/api");
/// ```
#[derive(Debug, Clone)]
pub struct BurgerApiClient {
    http: Client,
    base_url: String,
}

impl BurgerApiClient {
    /// Create a client for the given API root (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use a preconfigured [`reqwest::Client`] (timeouts, proxies).
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::debug!(%status, "access token rejected");
            return Err(ClientError::Unauthorized);
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                ClientError::Decode(e.to_string())
            } else {
                ClientError::Status {
                    status: status.as_u16(),
                    message: body.trim().to_string(),
                }
            }
        })?;

        check_envelope(status, &value)?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::handle(response).await
    }

    async fn get_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::handle(response).await
    }
}

/// Reject a response whose envelope reports failure.
///
/// The API answers `success: false` with HTTP 200 for most business errors,
/// so the flag is authoritative over the status code.
fn check_envelope(status: StatusCode, value: &serde_json::Value) -> Result<(), ClientError> {
    let success = value
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or_else(|| status.is_success());
    if success {
        return Ok(());
    }

    let message = value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("request failed")
        .to_string();

    if is_token_rejection(&message) {
        return Err(ClientError::Unauthorized);
    }
    if status.is_success() {
        Err(ClientError::Api { message })
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Token-rejection messages the API sends with HTTP 200 envelopes.
fn is_token_rejection(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    lowered.contains("jwt") || lowered.contains("should be authori")
}

/// The API prefixes access tokens with the header scheme.
fn strip_bearer(token: &str) -> &str {
    token.strip_prefix("Bearer ").unwrap_or(token)
}

// ═══════════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct IngredientDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: IngredientKind,
    proteins: u32,
    fat: u32,
    carbohydrates: u32,
    calories: u32,
    price: u64,
    image: String,
    image_mobile: String,
    image_large: String,
}

impl From<IngredientDto> for Ingredient {
    fn from(dto: IngredientDto) -> Self {
        Self {
            id: IngredientId::new(dto.id),
            name: dto.name,
            kind: dto.kind,
            price: dto.price,
            calories: dto.calories,
            proteins: dto.proteins,
            fat: dto.fat,
            carbohydrates: dto.carbohydrates,
            image: dto.image,
            image_mobile: dto.image_mobile,
            image_large: dto.image_large,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IngredientsResponse {
    data: Vec<IngredientDto>,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    email: String,
    name: String,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            email: dto.email,
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct SubmitOrderResponse {
    name: String,
    order: OrderNumberDto,
}

#[derive(Debug, Deserialize)]
struct OrderNumberDto {
    number: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDto {
    number: u64,
    name: String,
    status: OrderStatus,
    ingredients: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Self {
            number: dto.number,
            name: dto.name,
            status: dto.status,
            ingredients: dto.ingredients.into_iter().map(IngredientId::new).collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            // Feed orders are priced locally against the catalog
            total: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedResponse {
    orders: Vec<OrderDto>,
    total: u64,
    total_today: u64,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Vec<OrderDto>,
}

#[derive(Debug, serde::Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct IngredientsBody<'a> {
    ingredients: &'a [IngredientId],
}

#[derive(Debug, serde::Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct ResetBody<'a> {
    password: &'a str,
    token: &'a str,
}

impl From<AuthResponse> for AuthPayload {
    fn from(dto: AuthResponse) -> Self {
        Self {
            user: dto.user.into(),
            tokens: TokenPair {
                access_token: strip_bearer(&dto.access_token).to_string(),
                refresh_token: dto.refresh_token,
            },
        }
    }
}

impl BurgerApi for BurgerApiClient {
    async fn fetch_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        let response: IngredientsResponse = self.get("/ingredients").await?;
        Ok(response.data.into_iter().map(Ingredient::from).collect())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, ApiError> {
        let response: UserResponse = self.get_authorized("/auth/user", access_token).await?;
        Ok(response.user.into())
    }

    async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<User, ApiError> {
        let response = self
            .http
            .patch(self.url("/auth/user"))
            .bearer_auth(access_token)
            .json(update)
            .send()
            .await
            .map_err(ClientError::from)?;
        let response: UserResponse = Self::handle(response).await?;
        Ok(response.user.into())
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let response: AuthResponse = self
            .post("/auth/login", &CredentialsBody { email, password })
            .await?;
        Ok(response.into())
    }

    async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthPayload, ApiError> {
        let response: AuthResponse = self
            .post(
                "/auth/register",
                &RegisterBody {
                    email,
                    password,
                    name,
                },
            )
            .await?;
        Ok(response.into())
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post(
                "/auth/logout",
                &TokenBody {
                    token: refresh_token,
                },
            )
            .await?;
        Ok(())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let response: TokenResponse = self
            .post(
                "/auth/token",
                &TokenBody {
                    token: refresh_token,
                },
            )
            .await?;
        Ok(TokenPair {
            access_token: strip_bearer(&response.access_token).to_string(),
            refresh_token: response.refresh_token,
        })
    }

    async fn submit_order(
        &self,
        access_token: &str,
        ingredients: &[IngredientId],
    ) -> Result<OrderConfirmation, ApiError> {
        let response = self
            .http
            .post(self.url("/orders"))
            .bearer_auth(access_token)
            .json(&IngredientsBody { ingredients })
            .send()
            .await
            .map_err(ClientError::from)?;
        let response: SubmitOrderResponse = Self::handle(response).await?;
        Ok(OrderConfirmation {
            number: response.order.number,
            name: response.name,
        })
    }

    async fn fetch_feed(&self) -> Result<FeedSnapshot, ApiError> {
        let response: FeedResponse = self.get("/orders/all").await?;
        Ok(FeedSnapshot {
            orders: response.orders.into_iter().map(Order::from).collect(),
            total: response.total,
            total_today: response.total_today,
        })
    }

    async fn fetch_profile_orders(&self, access_token: &str) -> Result<Vec<Order>, ApiError> {
        let response: OrdersResponse = self.get_authorized("/orders", access_token).await?;
        Ok(response.orders.into_iter().map(Order::from).collect())
    }

    async fn fetch_order_by_number(&self, number: u64) -> Result<Order, ApiError> {
        let response: OrdersResponse = self.get(&format!("/orders/{number}")).await?;
        response
            .orders
            .into_iter()
            .next()
            .map(Order::from)
            .ok_or(ApiError::Api {
                message: "Order not found".to_string(),
            })
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post("/password-reset", &EmailBody { email }).await?;
        Ok(())
    }

    async fn reset_password(&self, password: &str, token: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post("/password-reset/reset", &ResetBody { password, token })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    #[test]
    fn envelope_failure_wins_over_http_200() {
        let body: serde_json::Value = serde_json::from_str(
            r#"{"success": false, "message": "email or password are incorrect"}"#,
        )
        .unwrap();
        let err = check_envelope(StatusCode::OK, &body).unwrap_err();
        assert!(
            matches!(err, ClientError::Api { message } if message == "email or password are incorrect")
        );
    }

    #[test]
    fn expired_jwt_maps_to_unauthorized() {
        let body: serde_json::Value =
            serde_json::from_str(r#"{"success": false, "message": "jwt expired"}"#).unwrap();
        let err = check_envelope(StatusCode::OK, &body).unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));

        let body: serde_json::Value =
            serde_json::from_str(r#"{"success": false, "message": "You should be authorised"}"#)
                .unwrap();
        let err = check_envelope(StatusCode::BAD_REQUEST, &body).unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn successful_envelope_passes_through() {
        let body: serde_json::Value =
            serde_json::from_str(r#"{"success": true, "data": []}"#).unwrap();
        assert!(check_envelope(StatusCode::OK, &body).is_ok());
    }

    #[test]
    fn non_success_status_without_envelope_is_a_status_error() {
        let body: serde_json::Value =
            serde_json::from_str(r#"{"message": "Internal error"}"#).unwrap();
        let err = check_envelope(StatusCode::INTERNAL_SERVER_ERROR, &body).unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
    }

    #[test]
    fn provider_error_conversion_preserves_the_variant() {
        let err = ApiError::from(ClientError::Unauthorized);
        assert_eq!(err, ApiError::Unauthorized);

        let err = ApiError::from(ClientError::Api {
            message: "nope".to_string(),
        });
        assert!(matches!(err, ApiError::Api { message } if message == "nope"));
    }

    #[test]
    fn bearer_prefix_is_stripped_once() {
        assert_eq!(strip_bearer("Bearer abc.def"), "abc.def");
        assert_eq!(strip_bearer("abc.def"), "abc.def");
    }

    #[test]
    fn ingredient_wire_format_deserializes() {
        let json = r#"{
            "_id": "643d69a5c3f7b9001cfa093c",
            "name": "Краторная булка N-200i",
            "type": "bun",
            "proteins": 80,
            "fat": 24,
            "carbohydrates": 53,
            "calories": 420,
            "price": 1255,
            "image": "https://code.s3.yandex.net/react/code/bun-02.png",
            "image_mobile": "https://code.s3.yandex.net/react/code/bun-02-mobile.png",
            "image_large": "https://code.s3.yandex.net/react/code/bun-02-large.png",
            "__v": 0
        }"#;

        let dto: IngredientDto = serde_json::from_str(json).unwrap();
        let ingredient = Ingredient::from(dto);
        assert_eq!(ingredient.id.as_str(), "643d69a5c3f7b9001cfa093c");
        assert_eq!(ingredient.kind, IngredientKind::Bun);
        assert_eq!(ingredient.price, 1255);
    }

    #[test]
    fn feed_wire_format_deserializes() {
        let json = r#"{
            "success": true,
            "orders": [{
                "_id": "663bb4b897ede0001d0643aa",
                "ingredients": ["643d69a5c3f7b9001cfa093c", "643d69a5c3f7b9001cfa0941"],
                "status": "done",
                "name": "Краторный био-марсианский бургер",
                "createdAt": "2024-05-08T16:44:08.812Z",
                "updatedAt": "2024-05-08T16:44:09.243Z",
                "number": 39595
            }],
            "total": 39221,
            "totalToday": 45
        }"#;

        let response: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_today, 45);

        let order = Order::from(response.orders.into_iter().next().unwrap());
        assert_eq!(order.number, 39595);
        assert_eq!(order.status, OrderStatus::Done);
        assert_eq!(order.ingredients.len(), 2);
        assert_eq!(order.total, 0);
    }

    #[test]
    fn auth_response_strips_the_bearer_scheme() {
        let json = r#"{
            "success": true,
            "accessToken": "Bearer abc.def.ghi",
            "refreshToken": "refresh-opaque",
            "user": {"email": "user@example.com", "name": "User"}
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let payload = AuthPayload::from(response);
        assert_eq!(payload.tokens.access_token, "abc.def.ghi");
        assert_eq!(payload.tokens.refresh_token, "refresh-opaque");
        assert_eq!(payload.user.email, "user@example.com");
    }
}
