//! HTTP handler for the top-up provider callback.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Map, Value};

use crate::{
    error::AppError, models::transaction_event::TransactionEvent,
    services::webhook_service, state::AppState,
};

/// JSON object body of a provider callback.
///
/// Behaves like `Json<Map<String, Value>>`: non-JSON content types get 415,
/// unparseable bodies 400 and non-object JSON (arrays, scalars) 422. An empty
/// body with a JSON content type counts as `{}`.
pub struct WebhookPayload(pub TransactionEvent);

impl<S> FromRequest<S> for WebhookPayload
where
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state).await?;
        let empty = bytes.is_empty();

        // Re-run the JSON extractor over the buffered body so content-type
        // and parse rejections stay axum's
        let mut buffered = Request::new(Body::from(bytes));
        *buffered.headers_mut() = headers;

        match Json::<Map<String, Value>>::from_request(buffered, state).await {
            Ok(Json(fields)) => Ok(Self(TransactionEvent::from_fields(&fields))),
            Err(JsonRejection::JsonSyntaxError(_)) if empty => Ok(Self(TransactionEvent::default())),
            Err(rejection) => Err(rejection),
        }
    }
}

/// Receive a completed-transaction callback.
///
/// # Endpoint
///
/// `POST /reloadly-webhook`
///
/// # Request Body
///
/// ```json
/// {
///   "transactionId": "TXN1",
///   "status": "SUCCESSFUL",
///   "amount": 100,
///   "operatorName": "MTN",
///   "recipientPhone": "+233200000000"
/// }
/// ```
///
/// Accepted as `application/json` or any `application/*+json` type. Fields
/// are not validated; missing ones are forwarded as empty values.
///
/// # Response
///
/// - **Success (200 OK)**: row appended and confirmation sent
/// - **Error (500)**: either stage failed, the stage is only logged
pub async fn reloadly_webhook(
    State(state): State<AppState>,
    WebhookPayload(event): WebhookPayload,
) -> Result<(StatusCode, &'static str), AppError> {
    tracing::info!(payload = ?event, "Received webhook payload");

    if let Err(err) =
        webhook_service::process_event(state.ledger.as_ref(), state.notifier.as_ref(), &event).await
    {
        tracing::error!(stage = err.stage(), error = %err, "Error processing webhook");
        return Err(err);
    }

    Ok((StatusCode::OK, "Webhook processed successfully"))
}
