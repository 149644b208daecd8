use axum::{http::StatusCode, routing::get, Router};
use http_template_source::{
    HttpClient, HttpTemplateSource, ProviderConfig, SourceError, SourceOptions, TemplateProvider,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use tokio::net::TcpListener;
use tracing::Level;

fn app() -> Router {
    Router::new()
        .route("/hello.html", get(|| async { "hello" }))
        .route("/tpl/header.html", get(|| async { "<h1>[% title %]</h1>" }))
        .route(
            "/broken.html",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
}

/// Serve `app()` on a random loopback port from a dedicated runtime thread,
/// so the blocking client under test never runs inside tokio.
fn spawn_server() -> SocketAddr {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app()).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn loopback_client() -> Arc<dyn HttpClient> {
    Arc::new(
        reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap(),
    )
}

fn source(include_path: &[String]) -> (HttpTemplateSource, Arc<AtomicUsize>) {
    init_tracing();
    let built = Arc::new(AtomicUsize::new(0));
    let counter = built.clone();
    let options = SourceOptions::new(
        ProviderConfig::default()
            .with_include_path(include_path.iter().cloned())
            .with_debug(true),
    )
    .with_client_factory(Box::new(
        move || -> http_template_source::Result<Arc<dyn HttpClient>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(loopback_client())
        },
    ));
    (HttpTemplateSource::configure(options), built)
}

#[test]
fn fetch_ok_over_http() {
    let addr = spawn_server();
    let (src, built) = source(&[]);
    let url = format!("http://{addr}/hello.html");

    assert_eq!(src.fetch_content(Some(url.as_str())).as_deref(), Some("hello"));

    let res = src.fetch(Some(url.as_str()));
    assert_eq!(res.content(), Some("hello"));
    assert!(res.error().is_none());
    let modified = res.modified().unwrap();
    assert!((chrono::Utc::now() - modified).num_seconds().abs() <= 5);

    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn fetch_404_reports_status_line() {
    let addr = spawn_server();
    let (src, _) = source(&[]);
    let res = src.fetch(Some(format!("http://{addr}/missing.html").as_str()));
    assert!(res.content().is_none());
    assert!(res.modified().is_none());
    assert_eq!(
        res.error_message().as_deref(),
        Some("error with request: 404 Not Found")
    );
}

#[test]
fn fetch_500_reports_status_line() {
    let addr = spawn_server();
    let (src, _) = source(&[]);
    let res = src.fetch(Some(format!("http://{addr}/broken.html").as_str()));
    assert!(matches!(res.error(), Some(SourceError::Status(_))));
    assert_eq!(
        res.error_message().as_deref(),
        Some("error with request: 500 Internal Server Error")
    );
}

#[test]
fn collapsed_scheme_is_repaired() {
    let addr = spawn_server();
    let (src, _) = source(&[]);
    let res = src.fetch(Some(format!("http:/{addr}/hello.html").as_str()));
    assert_eq!(res.content(), Some("hello"));
    assert!(src
        .last_modified(Some(format!("http:/{addr}/hello.html").as_str()))
        .is_some());
}

#[test]
fn guards_short_circuit_without_building_client() {
    let (src, built) = source(&[]);
    assert_eq!(
        src.fetch(Some("")).error_message().as_deref(),
        Some("no path specified")
    );
    assert_eq!(
        src.fetch(None).error_message().as_deref(),
        Some("no path specified")
    );
    assert_eq!(
        src.fetch(Some("ftp://example.com/x")).error_message().as_deref(),
        Some("not a URL")
    );
    assert!(src.last_modified(None).is_none());
    assert_eq!(built.load(Ordering::SeqCst), 0);
}

#[test]
fn last_modified_tracks_reachability() {
    let addr = spawn_server();
    let (src, built) = source(&[]);
    let ts = src
        .last_modified(Some(format!("http://{addr}/hello.html").as_str()))
        .unwrap();
    assert!((chrono::Utc::now() - ts).num_seconds().abs() <= 5);
    assert!(src
        .last_modified(Some(format!("http://{addr}/missing.html").as_str()))
        .is_none());
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn load_resolves_through_include_path() {
    let addr = spawn_server();
    let include = vec![
        "/usr/local/share/templates".to_string(),
        format!("http://{addr}/nothing-here/"),
        format!("http://{addr}/tpl"),
    ];
    let (src, _) = source(&include);
    assert_eq!(src.include_path().len(), 2);

    let res = src.load("header.html");
    assert_eq!(res.content(), Some("<h1>[% title %]</h1>"));

    let miss = src.load("footer.html");
    assert_eq!(
        miss.error_message().as_deref(),
        Some("error with request: 404 Not Found")
    );
}
