//! TCP front end: accepts connections and feeds requests to the dispatcher

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::{self, JoinSet};
use tracing::{debug, error, info, warn};

use crate::http::{HttpError, HttpResult, Limits, Request, Response, parse_request};
use crate::router::Dispatcher;

const READ_CHUNK: usize = 4096;

/// Serves one [`Dispatcher`] over HTTP/1.1
pub struct Server {
    dispatcher: Arc<Dispatcher>,
    limits: Limits,
}

impl Server {
    pub fn new(dispatcher: Dispatcher, limits: Limits) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            limits,
        }
    }

    /// Accept connections on `listener` until `shutdown` resolves.
    ///
    /// Every connection runs on its own task. After shutdown no new
    /// connections are accepted; open ones finish the request in flight and
    /// are closed, and this returns once all of them are gone.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "wiki listening");
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = listener.accept() => match result {
                    Ok((stream, peer)) => {
                        debug!(%peer, "accepted connection");
                        let dispatcher = Arc::clone(&self.dispatcher);
                        let limits = self.limits;
                        let shutdown_rx = shutdown_rx.clone();
                        connections.spawn(async move {
                            if let Err(err) =
                                handle_connection(stream, peer, dispatcher, limits, shutdown_rx).await
                            {
                                warn!(%peer, error = %err, "connection error");
                            }
                        });
                    }
                    Err(err) => error!(error = %err, "accept failed"),
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        let _ = shutdown_tx.send(true);
        while connections.join_next().await.is_some() {}
        info!("wiki stopped");
    }
}

fn error_response(err: &HttpError) -> Option<Response> {
    match err {
        HttpError::Io(_) => None,
        HttpError::HeadersTooLarge { .. } | HttpError::BodyTooLarge { .. } => {
            Some(Response::payload_too_large(&err.to_string()))
        }
        HttpError::Malformed(_) | HttpError::UnsupportedEncoding(_) => {
            Some(Response::bad_request(&err.to_string()))
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    limits: Limits,
    mut shutdown: watch::Receiver<bool>,
) -> HttpResult<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        match parse_request(&buf, &limits) {
            Ok(Some((request, used))) => {
                buf.drain(..used);
                let keep_alive = request.keep_alive() && !*shutdown.borrow();
                let is_head = request.is_head();
                let response = run_dispatch(Arc::clone(&dispatcher), request, peer).await;
                let bytes = if is_head {
                    response.head_bytes(keep_alive)
                } else {
                    response.to_bytes(keep_alive)
                };
                stream.write_all(&bytes).await?;
                if !keep_alive {
                    return Ok(());
                }
                continue;
            }
            Ok(None) => {}
            Err(err) => {
                if let Some(response) = error_response(&err) {
                    stream.write_all(&response.to_bytes(false)).await?;
                }
                return Err(err);
            }
        }

        let n = tokio::select! {
            n = stream.read(&mut chunk) => n?,
            _ = shutdown.changed() => return Ok(()),
        };
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Handlers block on the filesystem, so they run off the async workers
async fn run_dispatch(dispatcher: Arc<Dispatcher>, request: Request, peer: SocketAddr) -> Response {
    let method = request.method.clone();
    let path = request.path.clone();
    let response = task::spawn_blocking(move || dispatcher.dispatch(&request))
        .await
        .unwrap_or_else(|err| {
            error!(%peer, %path, error = %err, "handler panicked");
            Response::internal_error("internal server error")
        });
    debug!(%peer, %method, %path, status = response.status.as_u16(), "request");
    response
}
