//! Development server with live reload and the site's JSON API

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::config::SiteConfig;
use crate::contact::{ContactForm, SubmissionStatus};
use crate::content::catalog::suggest;
use crate::content::loader::SiteContent;
use crate::content::{filter, CatalogEntry, FilterState};
use crate::theme;
use crate::Folio;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

const DEFAULT_SUGGESTIONS: usize = 8;

/// Configuration and content the API answers from
struct Snapshot {
    config: SiteConfig,
    content: SiteContent,
}

/// Server state
struct ServerState {
    base_dir: PathBuf,
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
    snapshot: RwLock<Arc<Snapshot>>,
    /// Held for a whole rebuild so two rebuilds never write `public/` at once
    build_lock: Mutex<()>,
}

impl ServerState {
    fn new(folio: &Folio, content: SiteContent, live_reload: bool) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Self {
            base_dir: folio.base_dir.clone(),
            public_dir: folio.public_dir.clone(),
            reload_tx,
            live_reload,
            snapshot: RwLock::new(Arc::new(Snapshot {
                config: folio.config.clone(),
                content,
            })),
            build_lock: Mutex::new(()),
        }
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Rebuild the site, swap in the new snapshot and tell browsers to reload
    fn regenerate(&self) -> Result<()> {
        let _guard = self.build_lock.lock().unwrap_or_else(|e| e.into_inner());
        let folio = Folio::new(&self.base_dir)?;
        let content = generate::build(&folio)?;

        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(Snapshot {
            config: folio.config,
            content,
        });
        // No connected clients is fine
        let _ = self.reload_tx.send(());
        Ok(())
    }
}

/// Start the development server over an already generated site
pub async fn start(
    folio: &Folio,
    content: SiteContent,
    ip: &str,
    port: u16,
    watch: bool,
    open: bool,
) -> Result<()> {
    let state = Arc::new(ServerState::new(folio, content, watch));

    let subscriber_state = Arc::clone(&state);
    theme::global().subscribe(move |mode| {
        tracing::info!("Theme switched to {}, regenerating", mode);
        if let Err(e) = subscriber_state.regenerate() {
            tracing::error!("Generation failed: {}", e);
        }
    });

    let app = router(Arc::clone(&state));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    // Start file watcher if watch mode is enabled
    if watch {
        let watched = vec![
            folio.content_dir.clone(),
            folio.static_dir.clone(),
            folio.config_path(),
        ];
        let watch_state = Arc::clone(&state);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(&watched, &watch_state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/api/search", get(search_handler))
        .route("/api/suggest", get(suggest_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/theme/toggle", post(theme_toggle_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch for file changes and trigger reload
fn watch_and_reload(paths: &[PathBuf], state: &ServerState) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in paths.iter().filter(|p| p.exists()) {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    // Handle file change events
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Filter out irrelevant events (like .git, .DS_Store, etc.)
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant_change(&e.path))
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                println!();
                for event in &relevant_events {
                    println!("📝 File changed: {}", event.path.display());
                }

                println!("\n🔄 Regenerating...");
                match state.regenerate() {
                    Ok(_) => println!("✅ Regenerated successfully!"),
                    Err(e) => println!("❌ Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

fn is_relevant_change(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.contains("node_modules")
        && !path_str.ends_with('~')
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            // Wait for reload signal
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            // Handle incoming messages (ping/pong)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchParams {
    /// `blog` (default) or `projects`
    catalog: Option<String>,
    q: String,
    tag: Option<String>,
    category: Option<String>,
}

impl SearchParams {
    fn filter_state(&self) -> FilterState {
        let mut state = FilterState::new();
        state.set_query(&self.q);
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            state.toggle_tag(tag);
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            state.select_category(category);
        }
        state
    }
}

/// `GET /api/search`: filtered catalog entries
async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let snapshot = state.snapshot();
    let filter_state = params.filter_state();

    let entries: Vec<CatalogEntry> = match params.catalog.as_deref().unwrap_or("blog") {
        "blog" | "posts" => filter(&snapshot.content.posts, &filter_state)
            .into_iter()
            .map(CatalogEntry::from_listable)
            .collect(),
        "projects" => filter(&snapshot.content.projects, &filter_state)
            .into_iter()
            .map(CatalogEntry::from_listable)
            .collect(),
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": format!("unknown catalog: {}", other) })),
            )
                .into_response();
        }
    };

    Json(entries).into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestParams {
    q: String,
    limit: Option<usize>,
}

/// `GET /api/suggest`: typeahead over post and project tags and titles
async fn suggest_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<String>> {
    let snapshot = state.snapshot();
    let entries: Vec<CatalogEntry> = snapshot
        .content
        .posts
        .iter()
        .map(CatalogEntry::from_listable)
        .chain(
            snapshot
                .content
                .projects
                .iter()
                .map(CatalogEntry::from_listable),
        )
        .collect();

    Json(suggest(
        &entries,
        &params.q,
        params.limit.unwrap_or(DEFAULT_SUGGESTIONS),
    ))
}

/// `POST /api/contact`: validate a submission and report its status
async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    let snapshot = state.snapshot();
    let subjects: Vec<&str> = snapshot
        .config
        .contact
        .subjects
        .iter()
        .map(|s| s.value.as_str())
        .collect();

    let status = SubmissionStatus::default().submit();
    match form.validate(&subjects) {
        Ok(()) => {
            tracing::info!(
                "Contact message from {} <{}> about {}",
                form.name,
                form.email,
                form.subject
            );
            tracing::debug!("Contact payload: {}", form.encode());
            Json(serde_json::json!({ "status": status.succeed() })).into_response()
        }
        Err(e) => {
            tracing::warn!("Rejected contact message: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "status": status.fail(), "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// `POST /api/theme/toggle`: flip the theme; subscribers regenerate the site
async fn theme_toggle_handler() -> Response {
    match tokio::task::spawn_blocking(|| theme::global().toggle()).await {
        Ok(mode) => Json(serde_json::json!({ "theme": mode.as_str() })).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Fallback handler that serves files and injects live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();
    if path.split('/').any(|segment| segment == "..") {
        return not_found(&state).await;
    }

    let file_path = resolve_path(&state.public_dir, path);
    if !file_path.exists() {
        return not_found(&state).await;
    }

    // Check if it's an HTML file that needs live reload injection
    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => not_found(&state).await,
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path onto a file under `public_dir`
fn resolve_path(public_dir: &Path, path: &str) -> PathBuf {
    let clean_path = path.trim_start_matches('/');
    if clean_path.is_empty() {
        return public_dir.join("index.html");
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        candidate.join("index.html")
    } else if candidate.exists() {
        candidate
    } else {
        // Try adding .html extension
        let with_html = public_dir.join(format!("{}.html", clean_path));
        if with_html.exists() {
            with_html
        } else {
            candidate
        }
    }
}

/// The generated 404 page with status 404
async fn not_found(state: &ServerState) -> Response {
    match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
        Ok(content) => {
            let body = if state.live_reload {
                inject_live_reload(&content)
            } else {
                content
            };
            (StatusCode::NOT_FOUND, Html(body)).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        // If no </body> tag, append to end
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Post, Project};
    use chrono::NaiveDate;

    fn test_state(dir: &Path) -> Arc<ServerState> {
        let folio = Folio::new(dir).unwrap();

        let mut rsc = Post::new(
            "rsc".to_string(),
            "Understanding React Server Components".to_string(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            "Body".to_string(),
        );
        rsc.tags.insert("React".to_string());
        let mut ts = Post::new(
            "ts".to_string(),
            "TypeScript Tips".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            "Body".to_string(),
        );
        ts.tags.insert("TypeScript".to_string());
        let mut shop = Project::new("shop".to_string(), "Shop".to_string(), "A shop");
        shop.category = "Full-Stack".to_string();

        let content = SiteContent {
            posts: vec![rsc, ts],
            projects: vec![shop],
            about: None,
        };
        Arc::new(ServerState::new(&folio, content, false))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body>Hi</body></html>");
        assert!(html.contains("__livereload"));
        assert!(html.ends_with("</body>\n</html>"));
        assert!(inject_live_reload("plain").starts_with("plain"));
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("404.html"), "x").unwrap();

        assert_eq!(resolve_path(dir.path(), "/"), dir.path().join("index.html"));
        assert_eq!(
            resolve_path(dir.path(), "/blog/"),
            dir.path().join("blog/index.html")
        );
        assert_eq!(resolve_path(dir.path(), "/404"), dir.path().join("404.html"));
    }

    #[test]
    fn test_is_relevant_change() {
        assert!(is_relevant_change(Path::new("content/posts/a.md")));
        assert!(!is_relevant_change(Path::new("content/.git/HEAD")));
        assert!(!is_relevant_change(Path::new("content/posts/a.md~")));
    }

    #[tokio::test]
    async fn test_search_by_tag() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let params = SearchParams {
            tag: Some("React".to_string()),
            ..SearchParams::default()
        };

        let response = search_handler(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], "rsc");
    }

    #[tokio::test]
    async fn test_search_query_is_not_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        for q in [" react", "react ", "  "] {
            let mut expected = FilterState::new();
            expected.set_query(q);
            let snapshot = state.snapshot();
            let ids: Vec<&str> = filter(&snapshot.content.posts, &expected)
                .into_iter()
                .map(|post| post.slug.as_str())
                .collect();

            let params = SearchParams {
                q: q.to_string(),
                ..SearchParams::default()
            };
            let response = search_handler(State(Arc::clone(&state)), Query(params)).await;
            let body = body_json(response).await;
            let got: Vec<&str> = body
                .as_array()
                .unwrap()
                .iter()
                .map(|entry| entry["id"].as_str().unwrap())
                .collect();
            assert_eq!(got, ids, "query {:?}", q);
        }

        // Only the exact phrase matches; a blank query is not "everything"
        let params = SearchParams {
            q: "  ".to_string(),
            ..SearchParams::default()
        };
        let body = body_json(search_handler(State(state), Query(params)).await).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_projects_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let params = SearchParams {
            catalog: Some("projects".to_string()),
            category: Some("Backend".to_string()),
            ..SearchParams::default()
        };

        let body = body_json(search_handler(State(state), Query(params)).await).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_unknown_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let params = SearchParams {
            catalog: Some("photos".to_string()),
            ..SearchParams::default()
        };

        let response = search_handler(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggest() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let params = SuggestParams {
            q: "type".to_string(),
            limit: None,
        };

        let Json(suggestions) = suggest_handler(State(state), Query(params)).await;
        assert_eq!(suggestions, vec!["TypeScript", "TypeScript Tips"]);
    }

    #[tokio::test]
    async fn test_contact_validation() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let valid = ContactForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            subject: "hiring".to_string(),
            message: "Hello".to_string(),
        };
        let response = contact_handler(State(Arc::clone(&state)), Form(valid)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "success");

        let invalid = ContactForm {
            email: "not-an-email".to_string(),
            ..ContactForm::default()
        };
        let response = contact_handler(State(state), Form(invalid)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["status"], "error");
    }

    #[tokio::test]
    async fn test_contact_accepts_reply_to_field() {
        use axum::extract::FromRequest;

        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let request = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=Jane&email=jane%40example.com&subject=hiring&message=Hi&_replyto=jane%40example.com",
            ))
            .unwrap();
        let form = Form::<ContactForm>::from_request(request, &()).await.unwrap();

        let response = contact_handler(State(state), form).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "success");
    }

    #[test]
    fn test_regenerations_do_not_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let mut reload_rx = state.reload_tx.subscribe();

        let held = state.build_lock.lock().unwrap();
        let worker = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || state.regenerate())
        };
        std::thread::sleep(Duration::from_millis(200));
        assert!(reload_rx.try_recv().is_err());
        assert!(!state.public_dir.join("index.html").exists());
        drop(held);

        worker.join().unwrap().unwrap();
        assert!(reload_rx.try_recv().is_ok());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || state.regenerate())
            })
            .collect();
        for worker in workers {
            worker.join().unwrap().unwrap();
        }
        assert!(state.public_dir.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_missing_page_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        std::fs::create_dir_all(&state.public_dir).unwrap();
        std::fs::write(state.public_dir.join("404.html"), "<body>gone</body>").unwrap();

        let request = Request::builder()
            .uri("/nope/")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
