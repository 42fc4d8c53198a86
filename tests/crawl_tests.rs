//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small storefront and run the full
//! listing, enrichment and CSV cycle end-to-end.

use catalog_harvest::config::Config;
use catalog_harvest::output::read_records;
use catalog_harvest::{run_harvest, StopReason, NOT_AVAILABLE};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, target: usize, csv_path: &str) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = format!("{}/collections/all", server.uri());
    config.catalog.target = target;
    config.fetcher.wait_bound_secs = 1;
    config.fetcher.settle_millis = 0; // No settle delay for testing
    config.fetcher.poll_interval_millis = 50;
    config.fetcher.backoff_base_millis = 0;
    config.output.csv_path = csv_path.to_string();
    config
}

/// A product card; `None` for the image leaves it out of the card
fn card(slug: &str, image: Option<&str>) -> String {
    let img = image
        .map(|src| format!(r#"<img class="defaultImage" src="{}">"#, src))
        .unwrap_or_default();
    format!(
        r#"<div class="product-item-list">
             <a class="product-card" href="/products/{slug}">
               {img}
               <div class="product-card__name"> {slug} </div>
             </a>
           </div>"#
    )
}

fn listing_page(cards: &[String]) -> String {
    format!(
        "<html><body><div class=\"grid\">{}</div></body></html>",
        cards.concat()
    )
}

fn detail_page(sale: &str, original: &str) -> String {
    format!(
        r#"<html><body>
           <div id="ProductInfo-main-product-info">
             <span id="ProductPriceproduct-page-price">{sale}</span>
             <span id="ProductComparePriceproduct-page-price">{original}</span>
             <div id="description_tab"><p>Hand polished</p></div>
             <div id="details_tab"><li>925 silver</li></div>
           </div>
           </body></html>"#
    )
}

async fn mount_listing(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/collections/all"))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, slug: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{}", slug)))
        .respond_with(response)
        .mount(server)
        .await;
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_target_reached_across_two_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("products.csv");

    mount_listing(
        &server,
        1,
        listing_page(&[
            card("alpha", Some("//cdn.example.com/alpha.jpg")),
            card("no-image", None),
            card("beta", Some("//cdn.example.com/beta.jpg")),
        ]),
    )
    .await;
    mount_listing(
        &server,
        2,
        listing_page(&[card("gamma", Some("//cdn.example.com/gamma.jpg"))]),
    )
    .await;

    mount_detail(&server, "alpha", html(detail_page("$10.00", "$20.00"))).await;
    mount_detail(&server, "beta", html(detail_page("$15.00", "$30.00"))).await;
    mount_detail(&server, "gamma", ResponseTemplate::new(404)).await;

    let config = create_test_config(&server, 3, csv_path.to_str().unwrap());
    let report = run_harvest(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::TargetReached);
    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.skipped_items, 1);
    assert_eq!(report.degraded_records, 1);

    // Header plus exactly three rows
    let content = std::fs::read_to_string(&csv_path).unwrap();
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    assert_eq!(reader.records().count(), 3);

    let records = read_records(&csv_path).unwrap();
    assert_eq!(records, report.records);

    assert_eq!(records[0].name, "alpha");
    assert_eq!(records[0].link, format!("{}/products/alpha", server.uri()));
    assert_eq!(records[0].image, "https://cdn.example.com/alpha.jpg");
    assert_eq!(records[0].sale_price, "$10.00");
    assert_eq!(records[0].original_price, "$20.00");
    assert_eq!(records[0].discount, NOT_AVAILABLE);
    assert_eq!(records[0].description, "Hand polished");
    assert_eq!(records[0].product_details, "925 silver");

    assert_eq!(records[1].name, "beta");

    let third = &records[2];
    assert_eq!(third.name, "gamma");
    assert_eq!(third.link, format!("{}/products/gamma", server.uri()));
    assert!(third.is_degraded());

    // No listing request beyond page 2
    let requests = server.received_requests().await.unwrap();
    assert!(!requests
        .iter()
        .any(|r| r.url.query().map_or(false, |q| q.contains("page=3"))));
}

#[tokio::test]
async fn test_end_of_catalog_writes_partial_results() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("products.csv");

    mount_listing(
        &server,
        1,
        listing_page(&[card("alpha", Some("/images/alpha.jpg"))]),
    )
    .await;
    // Past the end: the grid wrapper renders but holds no usable card
    mount_listing(
        &server,
        2,
        "<html><body><div class=\"product-item-list\"></div></body></html>".to_string(),
    )
    .await;
    mount_detail(&server, "alpha", html(detail_page("$10.00", "$20.00"))).await;

    let config = create_test_config(&server, 50, csv_path.to_str().unwrap());
    let report = run_harvest(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::EndOfCatalog);
    assert!(report.is_short());

    let records = read_records(&csv_path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].image, format!("{}/images/alpha.jpg", server.uri()));
}

#[tokio::test]
async fn test_listing_failure_on_first_page_writes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("products.csv");

    Mock::given(method("GET"))
        .and(path("/collections/all"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server, 5, csv_path.to_str().unwrap());
    let report = run_harvest(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::ListingUnavailable);
    assert!(report.records.is_empty());
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_detail_without_landmark_degrades() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("products.csv");

    mount_listing(
        &server,
        1,
        listing_page(&[card("alpha", Some("//cdn.example.com/alpha.jpg"))]),
    )
    .await;
    mount_detail(
        &server,
        "alpha",
        html("<html><body><div class=\"spinner\"></div></body></html>".to_string()),
    )
    .await;

    let config = create_test_config(&server, 1, csv_path.to_str().unwrap());
    let report = run_harvest(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::TargetReached);
    assert_eq!(report.records.len(), 1);
    assert!(report.records[0].is_degraded());
    assert_eq!(report.records[0].name, "alpha");
}
