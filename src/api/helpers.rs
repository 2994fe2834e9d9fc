use std::net::IpAddr;

use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::errors::InternalError;
use crate::errors::internal::TokenError;
use crate::services::{SessionService, TokenService};
use crate::types::internal::{RequestContext, SessionState};

/// Client IP from proxy headers, falling back to the socket address
pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
    // X-Forwarded-For (proxy/load balancer)
    if let Some(forwarded) = req.header("X-Forwarded-For") {
        if let Some(ip) = forwarded.split(',').next() {
            if let Ok(ip) = ip.trim().parse() {
                return Some(ip);
            }
        }
    }

    // X-Real-IP (nginx)
    if let Some(real_ip) = req.header("X-Real-IP") {
        if let Ok(ip) = real_ip.trim().parse() {
            return Some(ip);
        }
    }

    req.remote_addr().as_socket_addr().map(|addr| addr.ip())
}

/// Bearer token from the Authorization header, if one is present
///
/// Extracted by hand because the handlers need optional auth and their own
/// error bodies for a missing header.
pub fn bearer_token(req: &Request) -> Option<Bearer> {
    Bearer::from_request(req).ok()
}

/// Context for a request that must carry a valid bearer token
///
/// An absent header is `MissingAuthHeader`; a header that is not a usable
/// bearer token is `Invalid`.
pub fn require_auth(req: &Request, token_service: &TokenService) -> Result<RequestContext, InternalError> {
    if req.header("Authorization").is_none() {
        return Err(TokenError::MissingAuthHeader.into());
    }
    let bearer = bearer_token(req)
        .ok_or_else(|| TokenError::Invalid("Authorization header is not a bearer token".to_string()))?;
    let claims = token_service.validate_jwt(&bearer.token)?;

    Ok(RequestContext::new()
        .with_ip_address(extract_ip_address(req))
        .with_auth(claims))
}

/// Context for a request where the bearer token is optional
///
/// A missing, malformed or expired token yields an anonymous context.
pub fn optional_auth(req: &Request, token_service: &TokenService) -> RequestContext {
    let ctx = RequestContext::new().with_ip_address(extract_ip_address(req));

    match bearer_token(req).map(|bearer| token_service.validate_jwt(&bearer.token)) {
        Some(Ok(claims)) => ctx.with_auth(claims),
        Some(Err(e)) => {
            tracing::debug!(request_id = %ctx.request_id, "Ignoring unusable bearer token: {}", e);
            ctx
        }
        None => ctx,
    }
}

/// Authenticated context plus the caller's session snapshot
pub async fn require_session(
    req: &Request,
    token_service: &TokenService,
    session_service: &SessionService,
) -> Result<(RequestContext, SessionState), InternalError> {
    let ctx = require_auth(req, token_service)?;
    let session = session_service.bootstrap_optional(ctx.user_id()).await?;
    Ok((ctx, session))
}

/// Context and session for endpoints open to anonymous callers
pub async fn optional_session(
    req: &Request,
    token_service: &TokenService,
    session_service: &SessionService,
) -> Result<(RequestContext, SessionState), InternalError> {
    let ctx = optional_auth(req, token_service);
    let session = session_service.bootstrap_optional(ctx.user_id()).await?;
    Ok((ctx, session))
}
