//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a listing page and its detail pages and
//! run the full two-stage crawl end-to-end.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use ua_census::config::{Config, CrawlerConfig};
use ua_census::crawler::{run_crawl, Coordinator};
use ua_census::output::read_records;
use ua_census::UserAgentRecord;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/pages/useragentstring.php";

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, concurrency: u32, deadline_secs: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_url: format!("{}{}", base_url, LIST_PATH),
            concurrency,
            deadline_secs,
            request_timeout_secs: 10,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Listing page with two categories and two entries each
fn listing_page() -> String {
    r#"<html><body>
    <div id="unterMenu">
        <a class="unterMenuTitel">Crawlers</a>
        <a class="unterMenuName" href=" /ua/googlebot ">Googlebot</a>
        <a class="unterMenuName" href="/ua/bingbot">Bingbot</a>
        <a class="unterMenuTitel">Browsers</a>
        <a class="unterMenuName" href="/ua/firefox">Firefox</a>
        <a class="unterMenuName" href="/ua/lynx">Lynx</a>
    </div>
    </body></html>"#
        .to_string()
}

/// Detail page listing `count` user agents for `name`
fn detail_page(name: &str, count: usize) -> String {
    let items: String = (0..count)
        .map(|i| format!("<li><a href=\"#\">  {}/{}.0  </a></li>\n", name, i + 1))
        .collect();
    format!(
        r#"<html><body><div id="liste"><h3>{}</h3><ul>
{}</ul></div></body></html>"#,
        name, items
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html")
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the listing page and four detail pages with 1..=4 entries
async fn mount_site(server: &MockServer, delays_ms: [u64; 4]) {
    mount_html(server, LIST_PATH, listing_page(), 0).await;
    mount_html(server, "/ua/googlebot", detail_page("Googlebot", 1), delays_ms[0]).await;
    mount_html(server, "/ua/bingbot", detail_page("Bingbot", 2), delays_ms[1]).await;
    mount_html(server, "/ua/firefox", detail_page("Firefox", 3), delays_ms[2]).await;
    mount_html(server, "/ua/lynx", detail_page("Lynx", 4), delays_ms[3]).await;
}

fn by_title(records: &[UserAgentRecord]) -> HashMap<String, UserAgentRecord> {
    records
        .iter()
        .map(|record| (record.title.clone(), record.clone()))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_writes_one_record_per_detail_page() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, [0, 0, 0, 0]).await;

    let output = NamedTempFile::new().expect("Failed to create output file");
    let config = create_test_config(&mock_server.uri(), 1, 30);

    let written = run_crawl(config, output.path()).await.expect("Crawl failed");
    assert_eq!(written, 4);

    let records = read_records(output.path()).expect("Failed to read output");
    assert_eq!(records.len(), 4);

    let records = by_title(&records);
    assert_eq!(records["Googlebot"].category, "crawlers");
    assert_eq!(records["Googlebot"].user_agents, vec!["Googlebot/1.0"]);
    assert_eq!(records["Bingbot"].category, "crawlers");
    assert_eq!(records["Bingbot"].user_agents.len(), 2);
    assert_eq!(records["Firefox"].category, "browsers");
    assert_eq!(records["Firefox"].user_agents.len(), 3);
    assert_eq!(records["Lynx"].category, "browsers");
    assert_eq!(
        records["Lynx"].user_agents,
        vec!["Lynx/1.0", "Lynx/2.0", "Lynx/3.0", "Lynx/4.0"]
    );

    // Each mock's expect(1) is verified when the server drops
}

#[tokio::test]
async fn test_records_completing_after_listing_scan_are_kept() {
    let mock_server = MockServer::start().await;
    // Every detail page finishes well after the listing handler has returned,
    // in an order unrelated to dispatch order
    mount_site(&mock_server, [400, 100, 300, 200]).await;

    let config = create_test_config(&mock_server.uri(), 4, 30);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let records = coordinator.run().await.expect("Crawl failed");

    assert_eq!(records.len(), 4);
    let records = by_title(&records);
    assert_eq!(records["Googlebot"].user_agents.len(), 1);
    assert_eq!(records["Bingbot"].user_agents.len(), 2);
    assert_eq!(records["Firefox"].user_agents.len(), 3);
    assert_eq!(records["Lynx"].user_agents.len(), 4);
}

#[tokio::test]
async fn test_detail_requests_carry_referer() {
    let mock_server = MockServer::start().await;
    let list_url = format!("{}{}", mock_server.uri(), LIST_PATH);

    mount_html(&mock_server, LIST_PATH, listing_page(), 0).await;
    for (route, name) in [
        ("/ua/googlebot", "Googlebot"),
        ("/ua/bingbot", "Bingbot"),
        ("/ua/firefox", "Firefox"),
        ("/ua/lynx", "Lynx"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("referer", list_url.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(name, 1)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&mock_server.uri(), 2, 30);
    let records = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_fetch_errors_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;

    let listing = r#"<html><body><div id="unterMenu">
        <a class="unterMenuTitel">Crawlers</a>
        <a class="unterMenuName" href="/ua/googlebot">Googlebot</a>
        <a class="unterMenuName" href="/ua/missing">Missing</a>
        <a class="unterMenuName">No Link</a>
        <a class="unterMenuName" href="   ">Blank Link</a>
    </div></body></html>"#;
    mount_html(&mock_server, LIST_PATH, listing.to_string(), 0).await;
    mount_html(&mock_server, "/ua/googlebot", detail_page("Googlebot", 2), 0).await;
    Mock::given(method("GET"))
        .and(path("/ua/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1, 30);
    let records = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Googlebot");
    assert_eq!(records[0].user_agents.len(), 2);
}

#[tokio::test]
async fn test_unreachable_listing_writes_empty_array() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let output = NamedTempFile::new().expect("Failed to create output file");
    let config = create_test_config(&mock_server.uri(), 1, 30);

    let written = run_crawl(config, output.path()).await.expect("Crawl failed");

    assert_eq!(written, 0);
    let content = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(content, "[]");
}

#[tokio::test]
async fn test_deadline_keeps_records_collected_so_far() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, listing_page(), 0).await;
    for (route, name, delay_ms) in [
        ("/ua/googlebot", "Googlebot", 0),
        ("/ua/bingbot", "Bingbot", 0),
        ("/ua/firefox", "Firefox", 0),
        ("/ua/lynx", "Lynx", 10_000),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(detail_page(name, 1))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&mock_server.uri(), 4, 1);
    let started = Instant::now();
    let records = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert!(
        started.elapsed() < Duration::from_secs(5),
        "Crawl should stop at the deadline, took {:?}",
        started.elapsed()
    );
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record.title != "Lynx"));
}

#[tokio::test]
async fn test_output_to_missing_directory_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1, 30);
    let result = run_crawl(config, std::path::Path::new("/nonexistent/dir/out.json")).await;

    assert!(result.is_err());
}
