//! Integration tests for the Gitee client against a mock HTTP server.

mod common;

use common::{issue_json, page, pull_json, remote_for, tree_body};
use mockito::{Matcher, Server};
use sigstats::adapters::GiteeClient;
use sigstats::domain::ports::{FetchError, RemoteSource};

fn page_query(direction: &str, page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("access_token".into(), "test-token".into()),
        Matcher::UrlEncoded("state".into(), "open".into()),
        Matcher::UrlEncoded("sort".into(), "created".into()),
        Matcher::UrlEncoded("direction".into(), direction.into()),
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), "100".into()),
    ])
}

fn client_for(server: &Server) -> GiteeClient {
    GiteeClient::new(&remote_for(&server.url()), "test-token").unwrap()
}

#[tokio::test]
async fn test_pull_pages_until_empty_body() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", Matcher::Regex("^/enterprise/open_euler/pull_requests".into()))
        .match_query(page_query("desc", 1))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(&[
            pull_json("https://gitee.com/openeuler/kernel/pulls/1", &[], false, None),
            pull_json("https://gitee.com/openeuler/kernel/pulls/2", &[], true, Some(false)),
        ]))
        .create_async()
        .await;
    let last = server
        .mock("GET", Matcher::Regex("^/enterprise/open_euler/pull_requests".into()))
        .match_query(page_query("desc", 2))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);

    let pulls = client.fetch_pull_page(1).await.unwrap().unwrap();
    assert_eq!(pulls.len(), 2);
    assert_eq!(pulls[0].number, "7");
    assert!(pulls[1].draft);
    assert_eq!(pulls[1].mergeable, Some(false));

    assert!(client.fetch_pull_page(2).await.unwrap().is_none());

    first.assert_async().await;
    last.assert_async().await;
}

#[tokio::test]
async fn test_issue_listing_is_ascending() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex("^/enterprises/open_euler/issues".into()))
        .match_query(page_query("asc", 1))
        .with_status(200)
        .with_body(page(&[issue_json(
            "https://gitee.com/openeuler/kernel/issues/I4ABCD",
            Some("openeuler/kernel"),
        )]))
        .create_async()
        .await;

    let client = client_for(&server);
    let issues = client.fetch_issue_page(1).await.unwrap().unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].number, "I4ABCD");
    assert_eq!(issues[0].issue_state_detail.title, "待办的");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_aborts_with_status_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex("^/enterprise/open_euler/pull_requests".into()))
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized: Access token does not exist"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_pull_page(1).await.unwrap_err();

    match err {
        FetchError::Status { status, ref endpoint, ref body } => {
            assert_eq!(status, 401);
            assert_eq!(endpoint, "/enterprise/open_euler/pull_requests");
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_does_not_echo_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex("^/enterprises/open_euler/issues".into()))
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message":"token test-token lacks scope","access_token":"test-token"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_issue_page(1).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 403, .. }));
    let rendered = err.to_string();
    assert!(!rendered.contains("test-token"), "token leaked: {rendered}");
    assert!(rendered.contains("lacks scope"));
}

#[tokio::test]
async fn test_malformed_page_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex("^/enterprise/open_euler/pull_requests".into()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"html_url": 5}]"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_pull_page(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_tree_paths_are_listed_recursively() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex("^/repos/openeuler/community/git/trees/master".into()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_token".into(), "test-token".into()),
            Matcher::UrlEncoded("recursive".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(tree_body())
        .create_async()
        .await;

    let client = client_for(&server);
    let paths = client.fetch_tree_paths().await.unwrap();

    assert_eq!(paths.len(), 4);
    assert!(paths.contains(&"sig/Kernel/openeuler/k/kernel.yaml".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_error_does_not_leak_token() {
    let remote = remote_for("http://127.0.0.1:1");
    let client = GiteeClient::new(&remote, "super-secret-token").unwrap();

    let err = client.fetch_issue_page(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(!err.to_string().contains("super-secret-token"));
}

#[tokio::test]
async fn test_truncated_tree_still_yields_listed_paths() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex("^/repos/openeuler/community/git/trees/master".into()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"tree": [{"path": "sig/Kernel/openeuler/k/kernel.yaml", "type": "blob"}], "truncated": true}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let paths = client.fetch_tree_paths().await.unwrap();
    assert_eq!(paths, vec!["sig/Kernel/openeuler/k/kernel.yaml".to_string()]);
}
