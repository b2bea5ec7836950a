use openmovies_core::{
    CatalogConfig, CatalogMode, FetchFailure, MediaKind, OpenMoviesError, OpenMoviesScraper,
    Selection, USER_AGENT, fetch,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JSON_CATALOG: &str = r#"[
    {"title": "Big Buck Bunny", "url": "https://cdn.test/BigBuckBunny.mp4"},
    {"title": "Sintel", "url": "https://cdn.test/Sintel.webm"},
    {"title": "Tears of Steel", "url": "https://cdn.test/tos/master.m3u8"}
]"#;

const HTML_CATALOG: &str = r#"
<html>
<body>
    <nav><a href="/">Home</a> <a href="/about.html">About</a></nav>
    <ul>
        <li><a href="/media/bbb.mp4">Big Buck Bunny</a></li>
        <li><a href="/media/sintel.webm">Sintel</a></li>
        <li><a href="/media/notes.pdf">Production notes</a></li>
    </ul>
</body>
</html>
"#;

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_json_catalog() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", JSON_CATALOG).await;

    let url = format!("{}/catalog.json", server.uri());
    let entries = fetch(CatalogMode::BlenderJson, &url).await.unwrap();

    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Big Buck Bunny", "Sintel", "Tears of Steel"]);
    assert_eq!(entries[2].kind, MediaKind::Hls);
}

#[tokio::test]
async fn test_fetch_html_list_skips_non_media() {
    let server = MockServer::start().await;
    serve(&server, "/films.html", HTML_CATALOG).await;

    let url = format!("{}/films.html", server.uri());
    let entries = fetch(CatalogMode::HtmlList, &url).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Big Buck Bunny");
    assert_eq!(entries[0].stream_url, format!("{}/media/bbb.mp4", server.uri()));
    assert_eq!(entries[1].kind, MediaKind::Webm);
}

#[tokio::test]
async fn test_fetch_css_catalog() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/grid",
        r#"<div class="card"><h2>Spring</h2><a href="/v/spring.mp4">play</a></div>
           <div class="card"><h2>Coffee Run</h2><a href="/v/coffee-run.m3u8">play</a></div>"#,
    )
    .await;

    let config = CatalogConfig {
        mode: CatalogMode::Css,
        source_url: Some(format!("{}/grid", server.uri())),
        css_link_selector: Some(".card".to_string()),
        css_title_selector: Some("h2".to_string()),
        ..CatalogConfig::default()
    };
    let entries = OpenMoviesScraper::new(config)
        .unwrap()
        .fetch_catalog()
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Spring");
    assert_eq!(entries[1].title, "Coffee Run");
    assert_eq!(entries[1].kind, MediaKind::Hls);
}

#[tokio::test]
async fn test_non_200_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/missing.json", server.uri());
    match fetch(CatalogMode::BlenderJson, &url).await {
        Err(OpenMoviesError::FetchError { mode, url: failed, reason }) => {
            assert_eq!(mode, CatalogMode::BlenderJson);
            assert_eq!(failed, url);
            assert!(matches!(reason, FetchFailure::Status(404)));
        }
        other => panic!("Expected FetchError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_fetch_error() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", "<html>maintenance</html>").await;

    let url = format!("{}/catalog.json", server.uri());
    match fetch(CatalogMode::BlenderJson, &url).await {
        Err(OpenMoviesError::FetchError { reason, .. }) => {
            assert!(matches!(reason, FetchFailure::Malformed(_)));
        }
        other => panic!("Expected FetchError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_is_fetch_error() {
    // nothing listens once the listener is dropped
    let url = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/catalog.json", listener.local_addr().unwrap())
    };

    match fetch(CatalogMode::BlenderJson, &url).await {
        Err(OpenMoviesError::FetchError { mode, reason, .. }) => {
            assert_eq!(mode, CatalogMode::BlenderJson);
            assert!(matches!(reason, FetchFailure::Http(_)));
        }
        other => panic!("Expected FetchError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.json"))
        .and(header("referer", "https://example.org/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSON_CATALOG))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = CatalogConfig::new(CatalogMode::BlenderJson, format!("{}/catalog.json", server.uri()));
    config
        .headers
        .insert("Referer".to_string(), "https://example.org/".to_string());

    let entries = OpenMoviesScraper::new(config)
        .unwrap()
        .fetch_catalog()
        .await
        .unwrap();
    assert_eq!(entries.len(), 3);
}

#[tokio::test]
async fn test_search_ranks_best_match_first() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", JSON_CATALOG).await;

    let config = CatalogConfig::new(CatalogMode::BlenderJson, format!("{}/catalog.json", server.uri()));
    let results = OpenMoviesScraper::new(config)
        .unwrap()
        .search("big buck")
        .await
        .unwrap();

    assert_eq!(results[0].entry.title, "Big Buck Bunny");
    assert!(results[0].score > 0.3);
}

#[tokio::test]
async fn test_search_without_match_offers_catalog() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", JSON_CATALOG).await;

    let config = CatalogConfig::new(CatalogMode::BlenderJson, format!("{}/catalog.json", server.uri()));
    let results = OpenMoviesScraper::new(config)
        .unwrap()
        .search("zzz-no-match")
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].entry.title, "Big Buck Bunny");
    assert!(results.iter().all(|r| r.score <= 0.3));
}

#[tokio::test]
async fn test_resolve_not_found() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", JSON_CATALOG).await;

    let config = CatalogConfig::new(CatalogMode::BlenderJson, format!("{}/catalog.json", server.uri()));
    let found = OpenMoviesScraper::new(config)
        .unwrap()
        .resolve("zzz-no-match")
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_scrape_resolves_query() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", JSON_CATALOG).await;

    let config = CatalogConfig::new(CatalogMode::BlenderJson, format!("{}/catalog.json", server.uri()));
    let selection = Selection {
        query: "tears of steel".to_string(),
        url: None,
    };
    let stream = OpenMoviesScraper::new(config)
        .unwrap()
        .scrape(&selection)
        .await
        .unwrap();

    assert_eq!(stream.url, "https://cdn.test/tos/master.m3u8");
    assert_eq!(stream.kind, MediaKind::Hls);
    assert_eq!(stream.headers["User-Agent"], USER_AGENT);
}

#[tokio::test]
async fn test_scrape_unmatched_query_is_not_found() {
    let server = MockServer::start().await;
    serve(&server, "/catalog.json", JSON_CATALOG).await;

    let config = CatalogConfig::new(CatalogMode::BlenderJson, format!("{}/catalog.json", server.uri()));
    let selection = Selection {
        query: "zzz-no-match".to_string(),
        url: None,
    };
    let result = OpenMoviesScraper::new(config).unwrap().scrape(&selection).await;

    match result {
        Err(OpenMoviesError::NotFound(query)) => assert_eq!(query, "zzz-no-match"),
        other => panic!("Expected NotFound error, got {:?}", other),
    }
}
