//! Command line handling.
//!
//! PRTG passes sensor parameters positionally, in one of two shapes:
//!
//! ```text
//! <server:port> <user> <password> <type> <vhost> <name>
//! <server:port> <type> <vhost> <name>
//! ```
//!
//! In the short form `server:port` doubles as the name of a stored
//! credential (see [`crate::credentials`]).

use std::path::PathBuf;

use clap::Parser;

use crate::credentials::CredentialStore;
use crate::{ArgumentError, Credentials, ResourceKind, ResourceRequest, SensorError};

/// Usage text printed for any malformed invocation.
pub const USAGE: &str = "\
<Server:Port> <user> <password> <Type> <Host> <Name>
<Server:Port> <Type> <Host> <Name>    (user and password from stored credentials)
Examples:
LocalHost:15672 guest guest queues %2f MyQueue
LocalHost:15672 guest guest exchanges %2f MyExchange
LocalHost:15672 queues %2f MyQueue";

#[derive(Parser, Debug)]
#[command(name = "prtg-rabbitmq", disable_help_flag = true)]
#[command(about = "PRTG sensor reporting RabbitMQ queue and exchange metrics")]
pub struct Args {
    /// Stored credentials file (default: prtg-rabbitmq.toml next to the executable)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sensor parameters, 4 or 6 of them
    #[arg(value_name = "ARGS", allow_hyphen_values = true, trailing_var_arg = true)]
    pub params: Vec<String>,
}

/// A parsed but not yet resolved sensor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Credentials given inline.
    Inline {
        server_and_port: String,
        user: String,
        password: String,
        kind: String,
        vhost: String,
        name: String,
    },
    /// Credentials looked up by the `server:port` reference.
    Stored {
        server_and_port: String,
        kind: String,
        vhost: String,
        name: String,
    },
}

impl Invocation {
    /// Classify positional parameters by count.
    pub fn from_params(params: &[String]) -> Result<Self, ArgumentError> {
        match params {
            [server_and_port, user, password, kind, vhost, name] => Ok(Invocation::Inline {
                server_and_port: server_and_port.clone(),
                user: user.clone(),
                password: password.clone(),
                kind: kind.clone(),
                vhost: vhost.clone(),
                name: name.clone(),
            }),
            [server_and_port, kind, vhost, name] => Ok(Invocation::Stored {
                server_and_port: server_and_port.clone(),
                kind: kind.clone(),
                vhost: vhost.clone(),
                name: name.clone(),
            }),
            _ => Err(ArgumentError::WrongArgumentCount(params.len())),
        }
    }

    /// Whether resolving this invocation needs a credential store.
    pub fn needs_store(&self) -> bool {
        matches!(self, Invocation::Stored { .. })
    }

    /// Credentials for the call: inline, or from `store` by reference.
    pub fn credentials(&self, store: &dyn CredentialStore) -> Result<Credentials, ArgumentError> {
        match self {
            Invocation::Inline { user, password, .. } => Ok(Credentials::new(user, password)),
            Invocation::Stored {
                server_and_port, ..
            } => {
                let stored = store
                    .lookup(server_and_port)
                    .ok_or_else(|| ArgumentError::UnknownCredential(server_and_port.clone()))?;
                Credentials::parse(&stored)
                    .ok_or_else(|| ArgumentError::MalformedCredential(server_and_port.clone()))
            }
        }
    }

    /// Build the request. Fails only on an unsupported resource kind.
    pub fn into_request(self, credentials: Credentials) -> Result<ResourceRequest, SensorError> {
        let (server_and_port, kind, vhost, name) = match self {
            Invocation::Inline {
                server_and_port,
                kind,
                vhost,
                name,
                ..
            }
            | Invocation::Stored {
                server_and_port,
                kind,
                vhost,
                name,
            } => (server_and_port, kind, vhost, name),
        };

        let kind: ResourceKind = kind.parse()?;
        Ok(ResourceRequest::new(
            server_and_port,
            credentials,
            kind,
            vhost,
            name,
        ))
    }
}
