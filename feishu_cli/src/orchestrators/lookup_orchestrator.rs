//! User id lookup orchestrator
//!
//! Resolves credentials, runs the batch lookup and renders the result in
//! the requested format.

use crate::error::CliResult;
use crate::output::{OutputFormat, create_formatter};
use feishu_client_core::{
    AppCredentials, ContactClient, ContactConfig, LookupRequest, LookupResult,
};
use log::debug;

/// Inputs collected from the command line
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    pub mobiles: Vec<String>,
    pub emails: Vec<String>,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
}

/// Rendered output plus whether the lookup succeeded
#[derive(Debug, Clone)]
pub struct LookupReport {
    pub rendered: String,
    pub success: bool,
}

/// Orchestrator for `feishu-user-id`
pub struct LookupOrchestrator {
    client: ContactClient,
}

impl LookupOrchestrator {
    /// Resolve credentials and build the contact client
    ///
    /// Fails before any network traffic when credentials are missing.
    pub fn new(
        contact: ContactConfig,
        app_id: Option<String>,
        app_secret: Option<String>,
    ) -> CliResult<Self> {
        let credentials = AppCredentials::resolve(app_id, app_secret)?;
        debug!("Using app id {}", credentials.app_id);
        let client = ContactClient::new(contact, credentials)?;
        Ok(Self { client })
    }

    /// Run the batch lookup
    pub async fn lookup(
        &self,
        mobiles: Vec<String>,
        emails: Vec<String>,
    ) -> CliResult<LookupResult> {
        let request = LookupRequest::new(mobiles, emails);
        debug!(
            "Looking up {} mobile(s) and {} email(s)",
            request.mobiles.len(),
            request.emails.len()
        );
        Ok(self.client.lookup(&request).await?)
    }
}

/// Full `feishu-user-id` flow: credentials, lookup, rendering
pub async fn run(
    contact: ContactConfig,
    options: LookupOptions,
    format: OutputFormat,
    use_color: bool,
) -> CliResult<LookupReport> {
    let orchestrator = LookupOrchestrator::new(contact, options.app_id, options.app_secret)?;
    let result = orchestrator.lookup(options.mobiles, options.emails).await?;

    let rendered = create_formatter(format, use_color).format_result(&result)?;
    Ok(LookupReport {
        rendered,
        success: result.is_success(),
    })
}
