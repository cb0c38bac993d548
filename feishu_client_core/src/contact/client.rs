//! Batch user id lookup against the contact API
//!
//! Two calls per lookup: exchange the app credentials for a tenant access
//! token, then one `batch_get_id` request carrying every mobile and email.

use crate::config::ContactConfig;
use crate::contact::types::{
    BatchGetIdReply, LookupData, LookupRequest, LookupResult, TenantTokenBody, TenantTokenReply,
};
use crate::error::{Error, ProtocolError, Result};
use crate::http;
use crate::security::AppCredentials;
use serde::de::DeserializeOwned;

const TENANT_TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";
const BATCH_GET_ID_PATH: &str = "/open-apis/contact/v3/users/batch_get_id";

/// Client for the user id lookup
pub struct ContactClient {
    client: reqwest::Client,
    config: ContactConfig,
    credentials: AppCredentials,
}

impl ContactClient {
    pub fn new(config: ContactConfig, credentials: AppCredentials) -> Result<Self> {
        config.validate()?;
        let client = http::build_client(config.timeout())?;
        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Exchange app id and secret for a tenant access token
    pub async fn tenant_access_token(&self) -> Result<String> {
        let secret = self.credentials.app_secret.expose_secret();
        let body = TenantTokenBody {
            app_id: &self.credentials.app_id,
            app_secret: &secret,
        };

        log::debug!("Requesting tenant access token for app {}", self.credentials.app_id);
        let response = self
            .client
            .post(self.url(TENANT_TOKEN_PATH))
            .json(&body)
            .send()
            .await?;
        let reply: TenantTokenReply = decode_reply(response).await?;

        if reply.code != 0 {
            return Err(ProtocolError::api(
                reply.code,
                format!("failed to obtain tenant access token: {}", reply.msg),
            )
            .into());
        }

        reply.tenant_access_token.ok_or_else(|| {
            Error::from(ProtocolError::malformed_response(
                "tenant_access_token missing from reply",
            ))
        })
    }

    /// Resolve every input of `request` with one batch call
    ///
    /// Validation happens before any network traffic.
    pub async fn batch_get_id(&self, request: &LookupRequest) -> Result<LookupData> {
        request.validate()?;
        let token = self.tenant_access_token().await?;

        log::debug!(
            "Resolving {} mobile(s) and {} email(s)",
            request.mobiles.len(),
            request.emails.len()
        );
        let response = self
            .client
            .post(self.url(BATCH_GET_ID_PATH))
            .query(&[("user_id_type", self.config.user_id_type.as_str())])
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let reply: BatchGetIdReply = decode_reply(response).await?;

        if reply.code != 0 {
            return Err(ProtocolError::api(reply.code, reply.msg).into());
        }

        Ok(reply.data.unwrap_or_default())
    }

    /// Run the lookup and fold remote failures into a [`LookupResult`]
    ///
    /// Only validation problems are returned as `Err`; anything that went
    /// wrong after that point becomes `{success: false, error}`.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult> {
        request.validate()?;

        match self.batch_get_id(request).await {
            Ok(data) => Ok(LookupResult::ok(data)),
            Err(e @ Error::Validation(_)) => Err(e),
            Err(Error::Protocol(ProtocolError::Api { code, message })) => {
                let error = format!("failed to resolve user ids: {code}, {message}");
                log::error!("{error}");
                Ok(LookupResult::failed(error))
            }
            Err(e) => {
                log::error!("User id lookup failed: {e}");
                Ok(LookupResult::failed(e.to_string()))
            }
        }
    }
}

/// Decode a JSON reply, falling back to an HTTP error when the body is not
/// the expected envelope
async fn decode_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = http::body_text(response).await;

    match serde_json::from_str::<T>(&body) {
        Ok(reply) => Ok(reply),
        Err(_) if !status.is_success() => Err(ProtocolError::http(status.as_u16(), body).into()),
        Err(e) => Err(ProtocolError::malformed_response(format!("{e}: {body}")).into()),
    }
}
