//! Single-endpoint documentation server.
//!
//! Serves the rendered viewer page to every GET request, regardless of
//! path. There is no routing and no graceful-shutdown machinery beyond
//! Ctrl-C; this server exists for local documentation browsing only.

use std::convert::Infallible;
use std::future::Future;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::error::{DocsError, DocsResult};
use crate::openapi::OpenApi;
use crate::viewer::DocViewer;

/// Host used when the document declares no server variable.
const DEFAULT_HOST: &str = "localhost";

/// Port used when the document declares no server variable.
const DEFAULT_PORT: u16 = 8080;

/// The documentation HTTP server.
///
/// Bind address comes from the document's first server entry: the
/// `host` and `port` variable defaults, falling back to
/// `localhost:8080`.
#[derive(Debug, Clone)]
pub struct DocServer {
    host: String,
    port: u16,
    page: Bytes,
}

impl DocServer {
    /// Create a server for a document, rendering the viewer page once.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if the viewer page fails to render.
    pub fn new(spec: &OpenApi) -> DocsResult<Self> {
        let (host, port) = addr_from_spec(spec);
        let page = DocViewer::new(spec).html_bytes()?;
        Ok(Self { host, port, page })
    }

    /// The host the server will bind to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port the server will bind to.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if the listener cannot bind.
    pub async fn serve(self) -> DocsResult<()> {
        self.serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Run the server until a shutdown future resolves.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if the listener cannot bind.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> DocsResult<()>
    where
        F: Future<Output = ()>,
    {
        let listener = TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                DocsError::server_error(format!(
                    "failed to bind to {}:{}: {e}",
                    self.host, self.port
                ))
            })?;
        tracing::info!(host = %self.host, port = self.port, "documentation server listening");

        run_on(listener, self.page, shutdown).await;
        tracing::info!("documentation server stopped");
        Ok(())
    }
}

/// Accept connections until the shutdown future resolves.
async fn run_on<F>(listener: TcpListener, page: Bytes, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, remote_addr)) => {
                        let page = page.clone();
                        tokio::spawn(async move {
                            let io = TokioIo::new(stream);
                            let service = service_fn(move |req: Request<Incoming>| {
                                let page = page.clone();
                                async move { Ok::<_, Infallible>(page_response(req.method(), page)) }
                            });
                            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                                tracing::debug!("connection error from {remote_addr}: {e}");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!("failed to accept connection: {e}");
                    }
                }
            }

            () = &mut shutdown => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }
}

/// Every GET gets the viewer page; anything else is rejected.
fn page_response(method: &Method, page: Bytes) -> Response<Full<Bytes>> {
    if method == Method::GET {
        Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "text/html; charset=utf-8")
            .body(Full::new(page))
            .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
    } else {
        Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .body(Full::new(Bytes::new()))
            .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
    }
}

/// Bind address from the document's first server entry.
fn addr_from_spec(spec: &OpenApi) -> (String, u16) {
    let mut host = DEFAULT_HOST.to_string();
    let mut port = DEFAULT_PORT;

    if let Some(server) = spec.servers.first() {
        if let Some(variable) = server.variables.get("host") {
            host = variable.default.clone();
        }
        if let Some(variable) = server.variables.get("port") {
            if let Ok(parsed) = variable.default.parse() {
                port = parsed;
            }
        }
    }

    (host, port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::{Server, ServerVariable};
    use indexmap::IndexMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn variable(default: &str) -> ServerVariable {
        ServerVariable {
            default: default.to_string(),
            enum_values: Vec::new(),
            description: None,
        }
    }

    fn spec_with_addr(host: &str, port: &str) -> OpenApi {
        let mut spec = OpenApi::new("Student API", "0.0.1");
        spec.servers.push(Server {
            url: "http://{host}:{port}".to_string(),
            description: None,
            variables: IndexMap::from([
                ("host".to_string(), variable(host)),
                ("port".to_string(), variable(port)),
            ]),
        });
        spec
    }

    #[test]
    fn test_addr_defaults() {
        let (host, port) = addr_from_spec(&OpenApi::new("Student API", "0.0.1"));
        assert_eq!(host, "localhost");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_addr_from_server_variables() {
        let (host, port) = addr_from_spec(&spec_with_addr("0.0.0.0", "9090"));
        assert_eq!(host, "0.0.0.0");
        assert_eq!(port, 9090);
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let (_, port) = addr_from_spec(&spec_with_addr("localhost", "not-a-port"));
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_page_response_methods() {
        let page = Bytes::from_static(b"<html></html>");
        let ok = page_response(&Method::GET, page.clone());
        assert_eq!(ok.status(), StatusCode::OK);

        let rejected = page_response(&Method::POST, page);
        assert_eq!(rejected.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_serves_page_to_any_get_path() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(run_on(
            listener,
            Bytes::from_static(b"<html>docs</html>"),
            async {
                let _ = shutdown_rx.await;
            },
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /any/path/at/all HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("text/html"));
        assert!(response.contains("<html>docs</html>"));

        shutdown_tx.send(()).unwrap();
        server.await.unwrap();
    }
}
