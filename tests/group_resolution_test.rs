use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use w3c_group::{
    resolver_from_config, CachingFetcher, DocumentConfig, GroupResolver, Level,
    LocalDocumentStore, ResolverConfig, PLUGIN_NAME,
};

fn mock_group<'a>(
    server: &'a MockServer,
    name: &str,
    id: u64,
    full_name: &str,
) -> httpmock::Mock<'a> {
    let body = json!({
        "id": id,
        "name": full_name,
        "URI": format!("https://www.w3.org/groups/wg/{}", name),
        "patentURI": format!("https://www.w3.org/groups/wg/{}/ipr", name),
    });
    let path = format!("/w3c/groups/{}", name);
    server.mock(move |when, then| {
        when.method(GET).path(path);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    })
}

fn mock_missing<'a>(server: &'a MockServer, name: &str) -> httpmock::Mock<'a> {
    let path = format!("/w3c/groups/{}", name);
    server.mock(move |when, then| {
        when.method(GET).path(path);
        then.status(404).body("Not Found");
    })
}

fn resolver_for(server: &MockServer) -> GroupResolver<CachingFetcher> {
    let config = ResolverConfig::default().with_api_base(server.url("/w3c/groups/"));
    resolver_from_config(&config).unwrap()
}

#[tokio::test]
async fn test_single_group_resolves_to_scalars() {
    let server = MockServer::start();
    let webapps = mock_group(&server, "webapps", 12, "Web Applications Working Group");

    let resolver = resolver_for(&server);
    let mut conf = DocumentConfig::from_json_str(r#"{"group": "webapps"}"#).unwrap();

    let diagnostics = resolver.run(&mut conf).await;

    webapps.assert();
    assert!(diagnostics.is_empty());
    assert_eq!(conf.wg, Some(json!("Web Applications Working Group")));
    assert_eq!(conf.wg_id, Some(json!(12)));
    assert_eq!(conf.wg_uri, Some(json!("https://www.w3.org/groups/wg/webapps")));
    assert_eq!(
        conf.wg_patent_uri,
        Some(json!("https://www.w3.org/groups/wg/webapps/ipr"))
    );
}

#[tokio::test]
async fn test_unknown_group_reports_one_error() {
    let server = MockServer::start();
    let missing = mock_missing(&server, "unknown-group");

    let resolver = resolver_for(&server);
    let mut conf = DocumentConfig::from_json_str(r#"{"group": "unknown-group"}"#).unwrap();
    let before = conf.clone();

    let diagnostics = resolver.run(&mut conf).await;

    missing.assert();
    assert_eq!(conf, before);
    assert_eq!(diagnostics.len(), 1);

    let error = diagnostics.errors().next().unwrap();
    assert_eq!(error.level, Level::Error);
    assert_eq!(error.plugin, PLUGIN_NAME);
    assert!(error.message.contains("unknown-group"));
    assert!(error.hint.as_deref().unwrap().contains("supported group names"));
}

#[tokio::test]
async fn test_mixed_group_list_keeps_only_successes() {
    let server = MockServer::start();
    let webapps = mock_group(&server, "webapps", 12, "Web Applications Working Group");
    let missing = mock_missing(&server, "unknown-group");

    let resolver = resolver_for(&server);
    let mut conf =
        DocumentConfig::from_json_str(r#"{"group": ["webapps", "unknown-group"]}"#).unwrap();

    let diagnostics = resolver.run(&mut conf).await;

    webapps.assert();
    missing.assert();
    assert_eq!(conf.wg, Some(json!(["Web Applications Working Group"])));
    assert_eq!(conf.wg_id, Some(json!([12])));
    assert_eq!(
        conf.wg_uri,
        Some(json!(["https://www.w3.org/groups/wg/webapps"]))
    );
    assert_eq!(
        conf.wg_patent_uri,
        Some(json!(["https://www.w3.org/groups/wg/webapps/ipr"]))
    );
    assert_eq!(diagnostics.errors().count(), 1);
    assert!(diagnostics
        .errors()
        .next()
        .unwrap()
        .message
        .contains("unknown-group"));
}

#[tokio::test]
async fn test_legacy_options_warn_once_and_are_overridden() {
    let server = MockServer::start();
    let _webapps = mock_group(&server, "webapps", 12, "Web Applications Working Group");

    let resolver = resolver_for(&server);
    let mut conf = DocumentConfig::from_json_str(
        r#"{
            "group": "webapps",
            "wg": "Old Group",
            "wgId": 99,
            "wgURI": "https://old.example/",
            "wgPatentURI": "https://old.example/ipr"
        }"#,
    )
    .unwrap();

    let diagnostics = resolver.run(&mut conf).await;

    assert_eq!(diagnostics.len(), 1);
    let warning = diagnostics.warnings().next().unwrap();
    for key in ["`wg`", "`wgURI`", "`wgId`", "`wgPatentURI`"] {
        assert!(warning.message.contains(key), "missing {} in {}", key, warning.message);
    }
    assert_eq!(conf.wg, Some(json!("Web Applications Working Group")));
    assert_eq!(conf.wg_id, Some(json!(12)));
}

#[tokio::test]
async fn test_no_group_leaves_config_untouched() {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let resolver = resolver_for(&server);
    let mut conf =
        DocumentConfig::from_json_str(r#"{"wg": "Legacy Group", "wgId": 7}"#).unwrap();
    let before = conf.clone();

    let diagnostics = resolver.run(&mut conf).await;

    any_request.assert_hits(0);
    assert!(diagnostics.is_empty());
    assert_eq!(conf, before);
}

#[tokio::test]
async fn test_no_group_round_trip_keeps_null_keys() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let input = json!({"wg": null, "group": null, "specStatus": "ED"});
    std::fs::write(temp_dir.path().join("respec.json"), input.to_string()).unwrap();

    let store = LocalDocumentStore::new(temp_dir.path());
    let mut conf = store.read_config("respec.json").unwrap();
    let diagnostics = resolver_for(&server).run(&mut conf).await;

    let written = store.write_config("resolved.json", &conf).unwrap();
    let output: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();

    any_request.assert_hits(0);
    assert!(diagnostics.is_empty());
    assert_eq!(output, input);
}

#[tokio::test]
async fn test_server_error_reports_status() {
    let server = MockServer::start();
    let failing = server.mock(|when, then| {
        when.method(GET).path("/w3c/groups/webapps");
        then.status(502);
    });

    let resolver = resolver_for(&server);
    let mut conf = DocumentConfig::from_json_str(r#"{"group": "webapps"}"#).unwrap();

    let diagnostics = resolver.run(&mut conf).await;

    failing.assert();
    let error = diagnostics.errors().next().unwrap();
    assert_eq!(error.message, "Failed to fetch group details (HTTP: 502)");
    assert!(conf.wg.is_none());
}

#[tokio::test]
async fn test_repeated_runs_hit_the_service_once() {
    let server = MockServer::start();
    let webapps = mock_group(&server, "webapps", 12, "Web Applications Working Group");

    let resolver = resolver_for(&server);
    for _ in 0..3 {
        let mut conf = DocumentConfig::from_json_str(r#"{"group": "webapps"}"#).unwrap();
        let diagnostics = resolver.run(&mut conf).await;
        assert!(diagnostics.is_empty());
        assert_eq!(conf.wg_id, Some(json!(12)));
    }

    webapps.assert_hits(1);
}

#[tokio::test]
async fn test_unreachable_service_is_a_diagnostic() {
    let config = ResolverConfig {
        timeout_seconds: 2,
        ..ResolverConfig::default()
    }
    .with_api_base("http://127.0.0.1:9/w3c/groups/");
    let resolver = resolver_from_config(&config).unwrap();
    let mut conf = DocumentConfig::from_json_str(r#"{"group": ["webapps"]}"#).unwrap();

    let diagnostics = resolver.run(&mut conf).await;

    assert_eq!(diagnostics.errors().count(), 1);
    assert!(diagnostics
        .errors()
        .next()
        .unwrap()
        .message
        .starts_with("Failed to fetch group details ("));
    assert_eq!(conf.wg, Some(json!([])));
}

#[tokio::test]
async fn test_end_to_end_with_document_store() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let _webapps = mock_group(&server, "webapps", 12, "Web Applications Working Group");
    let _css = mock_group(&server, "css", 32061, "Cascading Style Sheets (CSS) Working Group");

    std::fs::write(
        temp_dir.path().join("respec.json"),
        r#"{"specStatus": "ED", "shortName": "demo", "group": ["css", "webapps"]}"#,
    )
    .unwrap();

    let store = LocalDocumentStore::new(temp_dir.path());
    let mut conf = store.read_config("respec.json").unwrap();
    let diagnostics = resolver_for(&server).run(&mut conf).await;
    assert!(diagnostics.is_empty());

    let written = store.write_config("resolved.json", &conf).unwrap();
    let output: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();

    assert_eq!(output["specStatus"], "ED");
    assert_eq!(output["shortName"], "demo");
    assert_eq!(output["group"], json!(["css", "webapps"]));
    assert_eq!(
        output["wg"],
        json!([
            "Cascading Style Sheets (CSS) Working Group",
            "Web Applications Working Group"
        ])
    );
    assert_eq!(output["wgId"], json!([32061, 12]));
}
