use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Event name the client subscribes to on its `user-<id>` channel.
pub const NOTIFICATION_EVENT: &str = "notificacion:nueva";

/// Live payload mirrored alongside a persisted notification. Key names are
/// part of the client contract.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEvent {
    #[serde(rename = "solicitudId", skip_serializing_if = "Option::is_none")]
    pub solicitud_id: Option<i64>,
    #[serde(rename = "ofertaId")]
    pub oferta_id: i64,
    pub tipo: String,
    pub contenido: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
}

/// Best-effort publisher to the external push gateway. Nothing here ever
/// propagates an error: a failed push is a warn! line and the triggering
/// operation carries on.
#[derive(Clone)]
pub struct LivePush {
    client: Client,
    gateway_url: String,
    secret: String,
}

#[derive(Debug, Serialize)]
struct PushRequest<'a, T: Serialize> {
    channel: String,
    event: &'a str,
    data: &'a T,
}

impl LivePush {
    pub fn new(client: Client, gateway_url: String, secret: String) -> Self {
        Self {
            client,
            gateway_url,
            secret,
        }
    }

    pub async fn emit_to_user<T: Serialize>(&self, user_id: i64, event: &str, payload: &T) {
        if let Err(err) = self.try_emit(user_id, event, payload).await {
            tracing::warn!(user_id, event, error = %err, "live push failed");
        }
    }

    async fn try_emit<T: Serialize>(
        &self,
        user_id: i64,
        event: &str,
        payload: &T,
    ) -> anyhow::Result<()> {
        let body = serde_json::to_vec(&PushRequest {
            channel: format!("user-{}", user_id),
            event,
            data: payload,
        })?;
        let signature = sign_body(&self.secret, &body);

        let response = self
            .client
            .post(&self.gateway_url)
            .header("content-type", "application/json")
            .header("X-Push-Signature", signature)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("push gateway returned {}", response.status());
        }
        Ok(())
    }
}

/// Hex HMAC-SHA256 of the request body; the gateway verifies it against
/// the shared secret.
pub fn sign_body(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic_and_secret_bound() {
        let body = br#"{"channel":"user-1","event":"notificacion:nueva"}"#;
        let a = sign_body("secret", body);
        let b = sign_body("secret", body);
        let c = sign_body("other", body);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn event_payload_uses_contract_keys() {
        let event = NotificationEvent {
            solicitud_id: Some(4),
            oferta_id: 9,
            tipo: "new_application".into(),
            contenido: "New candidate in 'Coach'".into(),
            estado: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["solicitudId"], 4);
        assert_eq!(json["ofertaId"], 9);
        assert!(json.get("estado").is_none());
    }
}
