//! End-to-end tests for document analysis and hover lookups.
//!
//! Every test runs against a local mock of the feature query endpoint, so the
//! number and content of outgoing requests can be asserted exactly.

use baseline_lib::display::SupportState;
use baseline_lib::display::render_hover_markdown;
use baseline_lib::{
    BaselineTier, CompatClient, CompatConfig, DocumentKind, HoverSupport, analyze_document,
    hover_at,
};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CompatClient {
    let config = CompatConfig::default()
        .with_endpoint(format!("{}/v1/features", server.uri()))
        .with_pacing(Duration::from_millis(5))
        .with_request_timeout(Duration::from_secs(2));
    CompatClient::new(config).expect("Failed to build client")
}

fn feature_body(name: &str, feature_id: &str, tier: &str) -> serde_json::Value {
    serde_json::json!({
        "data": [{
            "name": name,
            "feature_id": feature_id,
            "baseline": {"status": tier, "low_date": "2015-07-29"},
            "browser_implementations": {
                "chrome": {"status": "available", "version": "1"},
                "firefox": {"status": "available", "version": "1"},
                "safari": {"status": "available", "version": "1"},
                "edge": {"status": "available", "version": "12"}
            },
            "spec": {"links": [{"link": "https://html.spec.whatwg.org/"}]}
        }]
    })
}

async fn mount(server: &MockServer, token: &str, body: serde_json::Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/features"))
        .and(query_param("q", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_html_document_issues_one_query_for_div() {
    let server = MockServer::start().await;
    mount(&server, "div", feature_body("Div", "div", "widely"), 1).await;

    let analysis = analyze_document("<div class='x'></div>", DocumentKind::Html, &client_for(&server)).await;

    assert_eq!(analysis.html_tags.tokens, ["div"]);
    let fragment = analysis.html_tags.fragment("div").expect("div should be resolved");
    let support = fragment.support.as_ref().unwrap();
    assert_eq!(fragment.label, "<div>");
    assert_eq!(support.tier, BaselineTier::Widely);
    assert!(support.browsers.iter().all(|c| c.state == SupportState::Supported));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stylesheet_analysis_degrades_per_token() {
    let server = MockServer::start().await;
    mount(&server, "display", feature_body("Display", "display", "widely"), 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/features"))
        .and(query_param("q", "grid"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let css = ".layout { display: grid; grid: auto / 1fr; user-select: none; }";
    let analysis = analyze_document(css, DocumentKind::Css, &client_for(&server)).await;

    assert_eq!(analysis.css_selectors.tokens, [".layout"]);
    assert_eq!(
        analysis.css_properties.tokens,
        ["display", "grid", "user-select"]
    );
    assert!(analysis.css_properties.fragment("display").unwrap().has_data());
    assert!(!analysis.css_properties.fragment("grid").unwrap().has_data());
    assert!(analysis.css_properties.fragment("user-select").is_none());
    assert_eq!(analysis.failed_lookups, 1);
}

#[tokio::test]
async fn test_jsx_document_resolves_tags_and_globals() {
    let server = MockServer::start().await;
    mount(&server, "section", feature_body("Section", "section", "widely"), 1).await;
    mount(&server, "fetch", feature_body("Fetch", "fetch", "widely"), 1).await;
    mount(&server, "IntersectionObserver", feature_body("Intersection observer", "intersection-observer", "widely"), 1).await;

    let text = r#"
const observer = new IntersectionObserver(() => {});
const IntersectionObserver = window.IntersectionObserver;
const fetch = () => window.fetch("/api");
export const App = () => <section><Chart /></section>;
"#;
    let analysis = analyze_document(text, DocumentKind::Javascriptreact, &client_for(&server)).await;

    assert_eq!(analysis.html_tags.tokens, ["section", "chart"]);
    assert_eq!(analysis.js_functions.tokens, ["fetch", "App"]);
    assert_eq!(
        analysis.js_variables.tokens,
        ["observer", "IntersectionObserver", "fetch", "App"]
    );
    assert!(analysis.js_functions.fragment("fetch").unwrap().has_data());
    assert!(analysis.js_variables.fragment("fetch").unwrap().has_data());
    assert!(analysis.html_tags.fragment("chart").is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_selector_does_not_inherit_tag_fragment() {
    let server = MockServer::start().await;
    mount(&server, "div", feature_body("Div", "div", "widely"), 1).await;
    mount(&server, "style", feature_body("Style", "style", "widely"), 1).await;
    mount(&server, "color", feature_body("Color", "color", "widely"), 1).await;

    let text = "<div></div><style>div { color: red }</style>";
    let analysis = analyze_document(text, DocumentKind::Html, &client_for(&server)).await;

    assert_eq!(analysis.css_selectors.tokens, ["div"]);
    assert!(analysis.css_selectors.support.is_empty());
    assert!(analysis.html_tags.fragment("div").unwrap().has_data());
    assert!(analysis.css_properties.fragment("color").unwrap().has_data());
}

#[tokio::test]
async fn test_jsx_variable_named_like_tag_gets_no_fragment() {
    let server = MockServer::start().await;
    mount(&server, "table", feature_body("Table", "table", "widely"), 1).await;

    let text = "const table = 1;\nexport const View = () => <table></table>;";
    let analysis = analyze_document(text, DocumentKind::Javascriptreact, &client_for(&server)).await;

    assert_eq!(analysis.js_variables.tokens, ["table", "View"]);
    assert!(analysis.js_variables.support.is_empty());
    assert!(analysis.html_tags.fragment("table").unwrap().has_data());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_document_without_interesting_tokens_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let analysis = analyze_document(
        "function renderChart() {}\nlet total = 0;",
        DocumentKind::Typescript,
        &client_for(&server),
    )
    .await;

    assert_eq!(analysis.js_functions.tokens, ["renderChart"]);
    assert!(analysis.js_functions.support.is_empty());
}

#[tokio::test]
async fn test_analysis_serializes_to_json() {
    let server = MockServer::start().await;
    mount(&server, "nav", feature_body("Nav", "nav", "limited"), 1).await;

    let analysis = analyze_document("<nav></nav>", DocumentKind::Html, &client_for(&server)).await;
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["kind"], "html");
    assert_eq!(json["html_tags"]["tokens"], serde_json::json!(["nav"]));
    assert_eq!(json["html_tags"]["support"]["nav"]["support"]["tier"], "limited");
}

#[tokio::test]
async fn test_hover_on_interesting_word() {
    let server = MockServer::start().await;
    mount(&server, "fetch", feature_body("Fetch", "fetch", "widely"), 1).await;

    let text = "// load\nconst data = await fetch('/api');\nfetch('/other');";
    let report = hover_at(text, DocumentKind::Javascript, 1, 22, &client_for(&server))
        .await
        .expect("cursor is on a word");

    assert_eq!(report.word, "fetch");
    assert_eq!(report.line, 2);
    assert_eq!(report.column, 23);
    assert_eq!(report.occurrences, 2);
    match &report.support {
        HoverSupport::Resolved { record, fragment } => {
            assert_eq!(record.as_ref().unwrap().name(), "Fetch");
            assert!(fragment.has_data());
        }
        other => panic!("Expected resolved support, got {:?}", other),
    }

    let markdown = render_hover_markdown(&report);
    assert!(markdown.contains("**Word:** `fetch`"));
    assert!(markdown.contains("**Baseline Status:** widely"));
}

#[tokio::test]
async fn test_hover_reports_failure_inline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/features"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let report = hover_at("<canvas></canvas>", DocumentKind::Html, 0, 2, &client_for(&server))
        .await
        .unwrap();

    assert!(matches!(report.support, HoverSupport::Failed { .. }));
    assert!(render_hover_markdown(&report).ends_with("❌ **Error loading browser support data**"));
}

#[tokio::test]
async fn test_hover_on_user_identifier_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = hover_at("let renderChart = 1;", DocumentKind::Javascript, 0, 6, &client_for(&server))
        .await
        .unwrap();

    assert_eq!(report.word, "renderChart");
    assert_eq!(report.support, HoverSupport::NotQueried);
}

#[tokio::test]
async fn test_hover_off_word_is_none() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert!(hover_at("a  b", DocumentKind::Html, 0, 2, &client).await.is_none());
    assert!(hover_at("one line", DocumentKind::Html, 5, 0, &client).await.is_none());
}
