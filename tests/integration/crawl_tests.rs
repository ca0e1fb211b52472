//! Integration tests for the crawler
//!
//! These tests use wiremock to serve fixed result pages and test the full
//! fetch, extract and paginate cycle end-to-end.

use skyquake::config::{HttpConfig, ScraperConfig};
use skyquake::crawler::{Crawler, SearchExtractor, Session};
use skyquake::{Collection, Product, ScrapeError};
use tracing_subscriber::EnvFilter;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("skyquake=debug"))
        .with_test_writer()
        .try_init();
}

fn crawler() -> Crawler {
    Crawler::new(&HttpConfig::default()).expect("Failed to build crawler")
}

fn search_page(results: &[(&str, &str)], next_href: Option<&str>) -> String {
    let mut body = String::from("<html><body><div class=\"s-main-slot\">");
    for (href, title) in results {
        body.push_str(&format!(
            r#"<div class="s-result-item"><h2>
                <a class="a-link-normal a-text-normal" href="{}"><span>{}</span></a>
            </h2></div>"#,
            href, title
        ));
    }
    body.push_str("</div><ul class=\"a-pagination\">");
    match next_href {
        Some(href) => body.push_str(&format!(r#"<li class="a-last"><a href="{}">Next</a></li>"#, href)),
        None => body.push_str(r#"<li class="a-disabled a-last">Next</li>"#),
    }
    body.push_str("</ul></body></html>");
    body
}

fn review_page(ids: &[&str], next_href: Option<&str>) -> String {
    let mut body = String::from("<html><body><div id=\"cm_cr-review_list\">");
    for id in ids {
        body.push_str(&format!(
            r#"<div data-hook="review" id="{id}">
                <div class="a-profile-content"><span class="a-profile-name">Author {id}</span></div>
                <i data-hook="review-star-rating"><span class="a-icon-alt">4.0 out of 5 stars</span></i>
                <a class="review-title"><span>Title {id}</span></a>
                <span class="review-date">Date {id}</span>
                <span class="review-text-content"><span>Content {id}</span></span>
            </div>"#
        ));
    }
    body.push_str("</div>");
    if let Some(href) = next_href {
        body.push_str(&format!(
            r#"<ul class="a-pagination"><li class="a-last"><a href="{}">Next</a></li></ul>"#,
            href
        ));
    }
    body.push_str("</body></html>");
    body
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_search_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("page", page))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn search_start(server: &MockServer) -> Url {
    Url::parse(&format!("{}/s?k=keyboard&page=1", server.uri())).expect("Failed to parse URL")
}

#[tokio::test]
async fn test_two_page_search_crawl() {
    init_tracing();
    let server = MockServer::start().await;

    mount_search_page(
        &server,
        "1",
        search_page(
            &[("/Keyboard-A/dp/B00A", "Keyboard A"), ("/Keyboard-B/dp/B00B", "Keyboard B")],
            Some("/s?k=keyboard&amp;page=2"),
        ),
    )
    .await;
    mount_search_page(
        &server,
        "2",
        search_page(&[("/Keyboard-C/dp/B00C", "Keyboard C")], None),
    )
    .await;

    let mut session = Session::search(&ScraperConfig::default(), "keyboard", 1, None)
        .expect("Failed to create session");
    let report = session
        .crawl_from(&crawler(), search_start(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.items_added, 3);
    assert_eq!(report.items_skipped, 0);
    assert_eq!(report.last_status, Some(200));
    assert_eq!(
        report.last_url.map(|u| u.to_string()),
        Some(format!("{}/s?k=keyboard&page=2", server.uri()))
    );

    let products = session.collection();
    assert_eq!(products.len(), 3);
    assert_eq!(products.indexes(), ["0", "1", "2"]);

    let titles: Vec<&str> = products.values().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Keyboard A", "Keyboard B", "Keyboard C"]);

    assert_eq!(products["2"].url, format!("{}/Keyboard-C/dp/B00C", server.uri()));
    assert_eq!(products.rget(-1).map(|p| p.title.as_str()), Some("Keyboard C"));
    assert!(products.values().iter().all(|p| p.query == "keyboard"));
}

#[tokio::test]
async fn test_missing_next_page_stops_after_one_page() {
    init_tracing();
    let server = MockServer::start().await;

    let body = "<html><body>\
        <a class=\"a-link-normal a-text-normal\" href=\"/dp/B001\"><span>Only</span></a>\
        </body></html>";
    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(html(body.to_string()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::search(&ScraperConfig::default(), "keyboard", 1, None)
        .expect("Failed to create session");
    let report = session
        .crawl_from(&crawler(), search_start(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 1);
    assert_eq!(session.collection().len(), 1);
    assert_eq!(session.collection()["0"].title, "Only");
}

#[tokio::test]
async fn test_review_crawl_and_projection() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Keyboard/product-reviews/B01/"))
        .and(query_param("pageNumber", "1"))
        .respond_with(html(review_page(
            &["R1", "R2"],
            Some("/Keyboard/product-reviews/B01/?reviewerType=all_reviews&amp;pageNumber=2"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Keyboard/product-reviews/B01/"))
        .and(query_param("pageNumber", "2"))
        .respond_with(html(review_page(&["R3"], None)))
        .mount(&server)
        .await;

    let start = Url::parse(&format!(
        "{}/Keyboard/product-reviews/B01/?reviewerType=all_reviews&pageNumber=1",
        server.uri()
    ))
    .expect("Failed to parse URL");

    let mut session = Session::reviews(&ScraperConfig::default(), "Keyboard", "B01", 1, Some("US"))
        .expect("Failed to create session");
    let report = session
        .crawl_from(&crawler(), start)
        .await
        .expect("Crawl failed");
    assert_eq!(report.pages_fetched, 2);

    let reviews = session.into_collection();
    let rows = reviews.aget(&["title", "date"]).expect("Projection failed");
    assert_eq!(
        rows,
        vec![
            vec!["Title R1", "Date R1"],
            vec!["Title R2", "Date R2"],
            vec!["Title R3", "Date R3"],
        ]
    );

    let ratings = reviews.aget(&["rating"]).expect("Projection failed");
    assert!(ratings.iter().all(|row| row == &vec!["4.0"]));

    let err = reviews.aget(&["title", "stars"]).unwrap_err();
    assert_eq!(err.to_string(), "The key \"stars\" is not available at index \"0\"");
}

#[tokio::test]
async fn test_transport_failure_keeps_earlier_pages() {
    init_tracing();
    let server = MockServer::start().await;

    mount_search_page(
        &server,
        "1",
        search_page(
            &[("/dp/B001", "Kept One"), ("/dp/B002", "Kept Two")],
            Some("http://127.0.0.1:1/s?k=keyboard&amp;page=2"),
        ),
    )
    .await;

    let extractor = SearchExtractor::new("keyboard").expect("Failed to build extractor");
    let mut products: Collection<Product> = Collection::new();
    let result = crawler()
        .crawl(search_start(&server), &extractor, &mut products)
        .await;

    assert!(matches!(result, Err(ScrapeError::Transport { .. })));
    assert_eq!(products.len(), 2);
    assert_eq!(products["1"].title, "Kept Two");
}

#[tokio::test]
async fn test_self_referencing_next_link_stops() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(html(search_page(
            &[("/dp/B001", "Loop")],
            Some("/s?k=keyboard&amp;page=1"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = SearchExtractor::new("keyboard").expect("Failed to build extractor");
    let mut products = Collection::new();
    let report = crawler()
        .crawl(search_start(&server), &extractor, &mut products)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 1);
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_malformed_results_are_skipped() {
    init_tracing();
    let server = MockServer::start().await;

    let body = search_page(&[("/dp/B001", "Good")], None).replace(
        "<div class=\"s-main-slot\">",
        "<div class=\"s-main-slot\"><a class=\"a-link-normal a-text-normal\" href=\"/dp/B000\"></a>",
    );
    mount_search_page(&server, "1", body).await;

    let mut session = Session::search(&ScraperConfig::default(), "keyboard", 1, None)
        .expect("Failed to create session");
    let report = session
        .crawl_from(&crawler(), search_start(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(report.items_added, 1);
    assert_eq!(report.items_skipped, 1);
    assert_eq!(session.collection()["0"].title, "Good");
}

#[tokio::test]
async fn test_error_status_is_reported_not_raised() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html><body>busy</body></html>"))
        .mount(&server)
        .await;

    let mut session = Session::search(&ScraperConfig::default(), "keyboard", 1, None)
        .expect("Failed to create session");
    let report = session
        .crawl_from(&crawler(), search_start(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.last_status, Some(503));
    assert!(session.collection().is_empty());
}

#[tokio::test]
async fn test_crawl_pages_does_not_follow_links() {
    init_tracing();
    let server = MockServer::start().await;

    mount_search_page(
        &server,
        "1",
        search_page(&[("/dp/B001", "First")], Some("/s?k=keyboard&amp;page=3")),
    )
    .await;
    mount_search_page(
        &server,
        "2",
        search_page(&[("/dp/B002", "Second")], Some("/s?k=keyboard&amp;page=3")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("page", "3"))
        .respond_with(html(search_page(&[("/dp/B003", "Third")], None)))
        .expect(0)
        .mount(&server)
        .await;

    let urls: Vec<Url> = (1..=2)
        .map(|p| Url::parse(&format!("{}/s?k=keyboard&page={}", server.uri(), p)))
        .collect::<Result<_, _>>()
        .expect("Failed to parse URLs");

    let extractor = SearchExtractor::new("keyboard").expect("Failed to build extractor");
    let mut products = Collection::new();
    let report = crawler()
        .crawl_pages(&urls, &extractor, &mut products)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 2);
    let titles = products.aget(&["title"]).expect("Projection failed");
    assert_eq!(titles, vec![vec!["First"], vec!["Second"]]);
}

#[tokio::test]
async fn test_crawl_pages_beyond_limit_fetches_nothing() {
    let config = ScraperConfig::default();
    let mut session = Session::search(&config, "keyboard", config.page_limit + 5, None)
        .expect("Failed to create session");

    let report = session
        .crawl_pages(&crawler())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 0);
    assert!(session.collection().is_empty());
}

#[tokio::test]
async fn test_unresolvable_next_link_ends_crawl() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(html(search_page(&[("/dp/B001", "Last")], Some("http://[zz"))))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::search(&ScraperConfig::default(), "keyboard", 1, None)
        .expect("Failed to create session");
    let report = session
        .crawl_from(&crawler(), search_start(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 1);
    assert_eq!(session.collection().len(), 1);
    assert_eq!(session.collection()["0"].title, "Last");
}

#[tokio::test]
async fn test_redirected_page_is_not_fetched_twice() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old-search"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/s?k=keyboard&page=1", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(html(search_page(
            &[("/dp/B001", "Landed")],
            Some("/s?k=keyboard&amp;page=1"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let start = Url::parse(&format!("{}/old-search", server.uri())).expect("Failed to parse URL");
    let extractor = SearchExtractor::new("keyboard").expect("Failed to build extractor");
    let mut products = Collection::new();
    let report = crawler()
        .crawl(start, &extractor, &mut products)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 1);
    assert_eq!(
        report.last_url.map(|u| u.to_string()),
        Some(format!("{}/s?k=keyboard&page=1", server.uri()))
    );
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_question_crawl() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/B01KTHMK4W/questions/"))
        .and(query_param("pageNumber", "1"))
        .respond_with(html(review_page(
            &["Q1", "Q2"],
            Some("/B01KTHMK4W/questions/?isAnswered=true&amp;pageNumber=2"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/B01KTHMK4W/questions/"))
        .and(query_param("pageNumber", "2"))
        .respond_with(html(review_page(&["Q3"], None)))
        .mount(&server)
        .await;

    let mut session = Session::questions(&ScraperConfig::default(), "B01KTHMK4W", 1, Some("DE"))
        .expect("Failed to create session");
    let start = Url::parse(&format!(
        "{}/B01KTHMK4W/questions/?isAnswered=true&pageNumber=1",
        server.uri()
    ))
    .expect("Failed to parse URL");
    let report = session
        .crawl_from(&crawler(), start)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.items_added, 3);

    let entries = session.collection();
    assert_eq!(entries.indexes(), ["0", "1", "2"]);
    let ids = entries.aget(&["review_id", "author"]).expect("Projection failed");
    assert_eq!(
        ids,
        vec![
            vec!["Q1", "Author Q1"],
            vec!["Q2", "Author Q2"],
            vec!["Q3", "Author Q3"],
        ]
    );
}
