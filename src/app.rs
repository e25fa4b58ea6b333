//! Main application entry point

use std::{
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use hyper_util::rt::TokioIo;
use tokio::{
    net::{TcpListener, TcpStream},
    signal,
    sync::broadcast,
};

use crate::http::Router;
use crate::server::Scope;

const DEFAULT_PORT: u16 = 7878;

/// The application serving materialized routers.
///
/// # Examples
/// ```no_run
/// use latewire::App;
///
/// #[tokio::main]
/// async fn main() -> std::io::Result<()> {
///     let app = App::new().bind("127.0.0.1:8080");
///
///     app.run().await
/// }
/// ```
pub struct App {
    routes: Router,
    connection: Connection,
}

/// Wraps a socket.
pub struct Connection {
    socket: SocketAddr,
}

impl Default for Connection {
    fn default() -> Self {
        Self { socket: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)) }
    }
}

impl From<SocketAddr> for Connection {
    fn from(socket: SocketAddr) -> Self {
        Self { socket }
    }
}

impl From<&str> for Connection {
    /// Falls back to the default socket when `s` does not parse.
    fn from(s: &str) -> Self {
        s.parse::<SocketAddr>().map(Self::from).unwrap_or_default()
    }
}

impl<I: Into<IpAddr>> From<(I, u16)> for Connection {
    fn from(value: (I, u16)) -> Self {
        SocketAddr::from(value).into()
    }
}

/// Shared resources of the running server.
pub(crate) struct AppInstance {
    pub(crate) routes: Router,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Initializes a new `App` bound to the default socket.
    pub fn new() -> Self {
        Self {
            routes: Router::new(""),
            connection: Connection::default(),
        }
    }

    /// Binds the `App` to the specified socket address.
    ///
    /// # Examples
    /// ```no_run
    /// use latewire::App;
    ///
    /// let app = App::new().bind("127.0.0.1:7878");
    /// let app = App::new().bind(([127, 0, 0, 1], 7878));
    /// ```
    pub fn bind<S: Into<Connection>>(mut self, socket: S) -> Self {
        self.connection = socket.into();
        self
    }

    /// Merges a materialized router into the application's routing table;
    /// on a method/path conflict the first registration wins.
    pub fn include(&mut self, router: Router) -> &mut Self {
        self.routes.merge(router);
        self
    }

    /// Runs the `App`.
    pub async fn run(self) -> io::Result<()> {
        let socket = self.connection.socket;
        let tcp_listener = TcpListener::bind(socket).await?;
        println!("Start listening: {socket}");

        let (shutdown_sender, mut shutdown_signal) = broadcast::channel::<()>(1);
        Self::subscribe_for_ctrl_c_signal(&shutdown_sender);

        let instance = Arc::new(AppInstance { routes: self.routes });
        loop {
            tokio::select! {
                accepted = tcp_listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        let instance = instance.clone();
                        tokio::spawn(Self::handle_connection(stream, instance));
                    }
                    Err(err) => eprintln!("Failed to accept connection: {err}"),
                },
                _ = shutdown_signal.recv() => {
                    println!("Shutting down server...");
                    break;
                }
            }
        }
        Ok(())
    }

    fn subscribe_for_ctrl_c_signal(shutdown_sender: &broadcast::Sender<()>) {
        let ctrl_c_shutdown_sender = shutdown_sender.clone();
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(_) => (),
                Err(err) => eprintln!("Unable to listen for shutdown signal: {err}"),
            };

            match ctrl_c_shutdown_sender.send(()) {
                Ok(_) => (),
                Err(err) => eprintln!("Failed to send shutdown signal: {err}"),
            }
        });
    }

    async fn handle_connection(stream: TcpStream, instance: Arc<AppInstance>) {
        let io = TokioIo::new(stream);
        let scope = Scope::new(instance);

        let connection = hyper::server::conn::http1::Builder::new()
            .serve_connection(io, scope);
        if let Err(_err) = connection.await {
            #[cfg(feature = "tracing")]
            tracing::error!("error serving connection: {_err:#}");
        }
    }
}
