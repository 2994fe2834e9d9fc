use std::net::IpAddr;

use uuid::Uuid;

use crate::types::internal::auth::Claims;

/// Request context that flows through all layers
///
/// Contains contextual information about the current request that is needed
/// for logging and authorization across API, service, and store layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: String,

    /// Full JWT claims if authenticated
    pub claims: Option<Claims>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            ip_address: None,
            request_id: Uuid::new_v4().to_string(),
            claims: None,
        }
    }

    /// Context for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        let mut ctx = Self::new();
        ctx.request_id = format!("cli:{}:{}", command_name, ctx.request_id);
        ctx
    }

    pub fn with_ip_address(mut self, ip_address: Option<IpAddr>) -> Self {
        self.ip_address = ip_address;
        self
    }

    pub fn with_auth(mut self, claims: Claims) -> Self {
        self.claims = Some(claims);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    /// The authenticated user id, if any
    pub fn user_id(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.sub.as_str())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
