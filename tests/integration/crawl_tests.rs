//! Integration tests for the harvester
//!
//! These tests use wiremock to serve synthetic listing pages and run the
//! full harvest end-to-end against them.

use quote_harvest::config::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use quote_harvest::crawler::Coordinator;
use quote_harvest::output::load_records;
use quote_harvest::HarvestError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests that carry no query string
struct NoQuery;

impl Match for NoQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().is_none()
    }
}

const LISTING_PAGE: &str = r#"<html><head><title>Popular Quotes (1 of 100)</title></head>
<body><h1>Popular quotes</h1></body></html>"#;

/// One complete block, one without tags, one without likes and with a
/// broken attribution line
const PAGE_ONE: &str = r#"<html><head><title>Popular Quotes (1 of 100)</title></head><body>
<div class="quote">
  <div class="quoteDetails">
    <div class="quoteText">
      &ldquo;So many books, so little time.&rdquo;
      <br>  &#8213;
      <span class="authorOrTitle">Frank Zappa,</span>
      <span><a class="authorOrTitle">Collected Sayings</a></span>
    </div>
    <div class="quoteFooter">
      <div class="greyText smallText left">
        tags:
        <a href="/quotes/tag/books">books</a>,
        <a href="/quotes/tag/humor">humor</a>
      </div>
      <div class="right">
        <a class="smallText" href="/quotes/1-so-many-books">150796 likes</a>
      </div>
    </div>
  </div>
</div>
<div class="quote">
  <div class="quoteDetails">
    <div class="quoteText">
      &ldquo;A room without books is like
      a body without a soul.&rdquo;
      <br>  &#8213;
      <span class="authorOrTitle">Marcus Tullius Cicero</span>
    </div>
    <div class="quoteFooter">
      <div class="right">
        <a class="smallText" href="/quotes/2">117000 likes</a>
      </div>
    </div>
  </div>
</div>
<div class="quote">
  <div class="quoteDetails">
    <div class="quoteText">
      Attribution without quotation marks - Anonymous
    </div>
    <div class="quoteFooter">
      <div class="greyText smallText left">tags: <a>misc</a>,</div>
    </div>
  </div>
</div>
</body></html>"#;

const PAGE_TWO: &str = r#"<html><head><title>Popular Quotes (2 of 100)</title></head><body>
<div class="quote">
  <div class="quoteText">&ldquo;Be yourself; everyone else is already taken.&rdquo;<br>&#8213; Oscar Wilde</div>
  <div class="right"><a class="smallText">152341 likes</a></div>
</div>
</body></html>"#;

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_origin: &str, page_count: u32, output_path: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_origin: base_origin.to_string(),
            listing_path: "/quotes".to_string(),
            expected_title: "Popular Quotes".to_string(),
        },
        crawler: CrawlerConfig {
            page_count,
            navigation_timeout_ms: 5_000,
            field_timeout_ms: 1_000,
            max_retries: 2,
            max_retry_delay_ms: 0, // Retry immediately in tests
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            output_path: output_path.to_string_lossy().to_string(),
        },
    }
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(NoQuery)
        .respond_with(html(LISTING_PAGE))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", page))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_page_block_variants() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server).await;
    mount_page(&mock_server, "1", PAGE_ONE).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("dist").join("quotes.json");
    let config = create_test_config(&mock_server.uri(), 1, &output_path);

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let stats = coordinator.run().await.expect("Harvest failed");
    assert_eq!(stats.total_records, 3);

    let records = load_records(&output_path).expect("Failed to read output");
    assert_eq!(records.len(), 3);

    // Complete block
    assert_eq!(records[0].text, "So many books, so little time.");
    assert_eq!(records[0].author.as_deref(), Some("Frank Zappa"));
    assert_eq!(records[0].title.as_deref(), Some("Collected Sayings"));
    assert_eq!(
        records[0].tags,
        Some(vec!["books".to_string(), "humor".to_string()])
    );
    assert_eq!(records[0].likes, Some(150796));

    // Missing tags, multi-line text
    assert_eq!(
        records[1].text,
        "A room without books is like a body without a soul."
    );
    assert_eq!(records[1].author.as_deref(), Some("Marcus Tullius Cicero"));
    assert_eq!(records[1].title, None);
    assert_eq!(records[1].tags, None);
    assert_eq!(records[1].likes, Some(117000));

    // Missing likes, unmatched attribution, trailing comma tag kept
    assert_eq!(records[2].text, "");
    assert_eq!(records[2].author, None);
    assert_eq!(records[2].title, None);
    assert_eq!(records[2].likes, None);
    assert_eq!(
        records[2].tags,
        Some(vec!["misc".to_string(), "".to_string()])
    );
}

#[tokio::test]
async fn test_multi_page_run_is_deterministic() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server).await;
    mount_page(&mock_server, "1", PAGE_ONE).await;
    mount_page(&mock_server, "2", PAGE_TWO).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("quotes.json");

    let first = {
        let config = create_test_config(&mock_server.uri(), 2, &output_path);
        Coordinator::new(config)
            .expect("Failed to create coordinator")
            .run()
            .await
            .expect("First harvest failed");
        std::fs::read(&output_path).expect("Failed to read first output")
    };

    let second = {
        let config = create_test_config(&mock_server.uri(), 2, &output_path);
        Coordinator::new(config)
            .expect("Failed to create coordinator")
            .run()
            .await
            .expect("Second harvest failed");
        std::fs::read(&output_path).expect("Failed to read second output")
    };

    assert_eq!(first, second);

    let records = load_records(&output_path).expect("Failed to parse output");
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].author.as_deref(), Some("Oscar Wilde"));

    let text = String::from_utf8(first).expect("Output is not UTF-8");
    assert!(text.starts_with("[\n  {\n    \"author\": \"Frank Zappa\","));
}

#[tokio::test]
async fn test_transient_page_failure_is_retried() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server).await;

    // First request for page 1 fails, later ones succeed
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "1", PAGE_TWO).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("quotes.json");
    let config = create_test_config(&mock_server.uri(), 1, &output_path);

    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Harvest failed");

    assert_eq!(stats.total_records, 1);
    assert!(output_path.exists());
}

#[tokio::test]
async fn test_exhausted_retries_produce_no_output() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server).await;
    mount_page(&mock_server, "1", PAGE_ONE).await;

    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3) // first attempt plus max_retries
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("quotes.json");
    let config = create_test_config(&mock_server.uri(), 3, &output_path);

    let result = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(matches!(result, Err(HarvestError::Navigation { .. })));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_wrong_listing_title_aborts_before_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(NoQuery)
        .respond_with(html(
            "<html><head><title>Sign in</title></head><body></body></html>",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", "1"))
        .respond_with(html(PAGE_ONE))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("quotes.json");
    let config = create_test_config(&mock_server.uri(), 1, &output_path);

    let result = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(matches!(result, Err(HarvestError::Precondition { .. })));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_unreachable_listing_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(NoQuery)
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("quotes.json");
    let config = create_test_config(&mock_server.uri(), 1, &output_path);

    let result = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(matches!(result, Err(HarvestError::Precondition { .. })));
    assert!(!output_path.exists());
}
