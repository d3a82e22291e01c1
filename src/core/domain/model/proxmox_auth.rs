use crate::core::domain::value_object::{ProxmoxCSRFToken, ProxmoxTicket};

/// The credential returned by a successful login: the session ticket and
/// its anti-forgery token.
///
/// A credential is owned by the transport built from it and is dropped with
/// that transport at the end of the top-level operation. It is never cached.
#[derive(Debug, Clone)]
pub struct ProxmoxAuth {
    ticket: ProxmoxTicket,
    csrf_token: ProxmoxCSRFToken,
}

impl ProxmoxAuth {
    pub fn new(ticket: ProxmoxTicket, csrf_token: ProxmoxCSRFToken) -> Self {
        Self { ticket, csrf_token }
    }

    pub fn ticket(&self) -> &ProxmoxTicket {
        &self.ticket
    }

    pub fn csrf_token(&self) -> &ProxmoxCSRFToken {
        &self.csrf_token
    }
}
