use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::files::Resolver;
use crate::http::parser::parse_request;
use crate::http::reader::{read_request_text, ReadError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

pub struct Connection<S> {
    stream: S,
    resolver: Resolver,
    state: ConnectionState,
}

/// One request, one response, then close. No state is ever revisited.
pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, resolver: Resolver) -> Self {
        Self {
            stream,
            resolver,
            state: ConnectionState::Reading,
        }
    }

    /// Serves a single request on the stream and closes it.
    ///
    /// A request that cannot be decoded or parsed is answered with 400, a
    /// filesystem failure with 500; in both cases the error is returned
    /// after the response went out.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut failure = None;

        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => {
                        self.state = ConnectionState::Parsed(req);
                    }
                    Ok(None) => {
                        tracing::debug!("Peer closed before sending a request");
                    }
                    Err(e) if is_transport_failure(&e) => {
                        return Err(e);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Malformed request");
                        self.state = ConnectionState::Writing(ResponseWriter::new(
                            Response::bad_request(),
                        ));
                        failure = Some(e);
                    }
                },

                ConnectionState::Parsed(req) => {
                    let response = match self.resolver.respond(&req).await {
                        Ok(response) => response,
                        Err(e) => {
                            tracing::error!(
                                method = %req.method,
                                path = %req.path(),
                                error = %e,
                                "Failed to resolve request"
                            );
                            failure = Some(e);
                            Response::internal_error(&req.version)
                        }
                    };

                    tracing::info!(
                        method = %req.method,
                        path = %req.path(),
                        status = response.status.as_u16(),
                        "Responding"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(mut writer) => {
                    let sent = writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(bytes = sent, "Response sent");
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        self.stream.shutdown().await?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Reads and parses the request. `Ok(None)` means the peer sent nothing.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let Some(text) = read_request_text(&mut self.stream).await? else {
            return Ok(None);
        };

        let request = parse_request(&text)?;
        tracing::debug!(request = ?request, "Parsed request");

        Ok(Some(request))
    }
}

fn is_transport_failure(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<ReadError>(), Some(ReadError::Io(_)))
}
