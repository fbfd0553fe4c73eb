use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::json;
use uuid::Uuid;

use yamdb_api_schema::outbox_events;
use yamdb_core::sea_ext::is_unique_violation;

use crate::domain::repository::ConfirmationMailer;
use crate::domain::types::{OutboxEvent, User};
use crate::error::ApiError;

pub const CONFIRMATION_CODE_ISSUED: &str = "confirmation_code_issued";

/// Queues confirmation-code emails in `outbox_events` for the mail relay.
#[derive(Clone)]
pub struct OutboxMailer {
    pub db: DatabaseConnection,
}

pub fn confirmation_event(user: &User, code: &str) -> OutboxEvent {
    OutboxEvent {
        id: Uuid::new_v4(),
        kind: CONFIRMATION_CODE_ISSUED.to_owned(),
        payload: json!({
            "email": user.email,
            "username": user.username,
            "confirmation_code": code,
        }),
        idempotency_key: format!("{CONFIRMATION_CODE_ISSUED}:{}:{code}", user.id),
    }
}

impl ConfirmationMailer for OutboxMailer {
    async fn send_confirmation_code(&self, user: &User, code: &str) -> Result<(), ApiError> {
        let event = confirmation_event(user, code);
        let inserted = outbox_events::ActiveModel {
            id: Set(event.id),
            kind: Set(event.kind),
            payload: Set(event.payload),
            idempotency_key: Set(event.idempotency_key),
            attempts: Set(0),
            created_at: Set(Utc::now()),
            processed_at: Set(None),
        }
        .insert(&self.db)
        .await;
        match inserted {
            Ok(_) => Ok(()),
            // Same code issued twice within one second.
            Err(e) if is_unique_violation(&e) => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context("enqueue confirmation code")
                .into()),
        }
    }
}
