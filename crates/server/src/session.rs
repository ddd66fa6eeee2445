// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff identity extraction.
//!
//! Desk terminals identify the logged-in staff member with the
//! `X-Staff-Id` and `X-Staff-Role` headers. An optional `X-Request-Id`
//! becomes the audit cause id.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use louaj_api::{AuthenticatedActor, Role, authenticate_stub};
use louaj_audit::Cause;
use tracing::{debug, warn};

/// Header carrying the staff member's id.
pub const STAFF_ID_HEADER: &str = "x-staff-id";
/// Header carrying the staff member's role.
pub const STAFF_ROLE_HEADER: &str = "x-staff-role";
/// Header carrying the client's request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The authenticated staff member and the audit cause for this request.
///
/// # Errors
///
/// Extraction fails with HTTP 401 if either staff header is missing, is
/// not valid UTF-8, names an unknown role, or carries an empty id.
pub struct StaffSession(pub AuthenticatedActor, pub Cause);

impl<S> FromRequestParts<S> for StaffSession
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff_id: &str = header(&parts.headers, STAFF_ID_HEADER)?;
        let role: Role = Role::parse(header(&parts.headers, STAFF_ROLE_HEADER)?).map_err(|e| {
            warn!(error = %e, "Rejected staff role");
            SessionError::Rejected(e.to_string())
        })?;
        let actor: AuthenticatedActor =
            authenticate_stub(staff_id.to_string(), role).map_err(|e| {
                warn!(error = %e, "Rejected staff id");
                SessionError::Rejected(e.to_string())
            })?;

        let cause_id: String = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map_or_else(|| String::from("unspecified"), str::to_string);
        let cause: Cause = Cause::new(cause_id, format!("{} {}", parts.method, parts.uri.path()));

        debug!(staff_id = %actor.id, role = actor.role.as_str(), "Staff session extracted");
        Ok(Self(actor, cause))
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SessionError> {
    headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing staff header");
            SessionError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Invalid staff header encoding");
            SessionError::InvalidHeader(name)
        })
}

/// Staff session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// A required header is missing.
    MissingHeader(&'static str),
    /// A header is not valid UTF-8.
    InvalidHeader(&'static str),
    /// The presented identity was rejected.
    Rejected(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header"),
            Self::Rejected(reason) => reason,
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
