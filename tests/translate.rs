//! End-to-end translation runs against mock provider servers.

use mockito::{Matcher, Server, ServerGuard};
use py2cpp::config::Settings;
use py2cpp::error_code::ProviderErrorKind;
use py2cpp::input::SourceInput;
use py2cpp::output::OutputWriter;
use py2cpp::runner::{translate, Runner, TranslateRequest};
use py2cpp::{Error, ModelSelection, Provider, ProviderClientBuilder};
use serde_json::json;
use std::collections::HashMap;

const PYTHON: &str = "def f(n):\n    return n * 2\n\nprint(f(21))\n";

fn openai_body(text: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 50, "completion_tokens": 20, "total_tokens": 70}
    })
    .to_string()
}

fn anthropic_body(text: &str) -> String {
    json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 50, "output_tokens": 20}
    })
    .to_string()
}

fn client(provider: Provider, server: &ServerGuard) -> py2cpp::ProviderClient {
    ProviderClientBuilder::new(provider)
        .api_key("test-key")
        .base_url_override(server.url())
        .build()
        .expect("client builds")
}

fn source() -> SourceInput {
    SourceInput::inline(PYTHON).unwrap()
}

#[tokio::test]
async fn gpt_response_is_written_byte_for_byte() {
    let mut server = Server::new_async().await;
    let cpp = "#include <iostream>\nint main() {\n    std::cout << 42 << \"\\n\"; // résultat\n}\n\n  ";
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "max_tokens": 2000
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(openai_body(cpp))
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let runner = Runner::with_clients(
        vec![client(Provider::Gpt, &server)],
        OutputWriter::new(out.path()),
    );
    let artifacts = runner.run(&source(), 2000).await.unwrap();

    mock.assert_async().await;
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].path, out.path().join("optimized_gpt.cpp"));
    assert_eq!(std::fs::read(&artifacts[0].path).unwrap(), cpp.as_bytes());
}

#[tokio::test]
async fn prompt_carries_source_code() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("return n \\* 2".into()))
        .with_status(200)
        .with_body(openai_body("int main() {}"))
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let runner = Runner::with_clients(
        vec![client(Provider::Gpt, &server)],
        OutputWriter::new(out.path()),
    );
    runner.run(&source(), 2000).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn claude_request_uses_anthropic_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-3-5-sonnet-20240620",
            "max_tokens": 1500
        })))
        .with_status(200)
        .with_body(anthropic_body("int main() { return 0; }\n"))
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let runner = Runner::with_clients(
        vec![client(Provider::Claude, &server)],
        OutputWriter::new(out.path()),
    );
    let artifacts = runner.run(&source(), 1500).await.unwrap();

    mock.assert_async().await;
    assert_eq!(artifacts[0].provider, Provider::Claude);
    assert_eq!(
        std::fs::read_to_string(out.path().join("optimized_claude.cpp")).unwrap(),
        "int main() { return 0; }\n"
    );
}

#[tokio::test]
async fn both_providers_write_two_distinct_files() {
    let mut server = Server::new_async().await;
    let gpt = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(openai_body("// gpt\nint main() {}\n"))
        .create_async()
        .await;
    let claude = server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_body(anthropic_body("// claude\nint main() {}\n"))
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let settings = settings_for(&server, &[("OPENAI_API_KEY", "k1"), ("ANTHROPIC_API_KEY", "k2")]);
    let request = TranslateRequest {
        source: source(),
        selection: ModelSelection::Both,
        max_tokens: 2000,
    };
    let artifacts = translate(&settings, OutputWriter::new(out.path()), &request)
        .await
        .unwrap();

    gpt.assert_async().await;
    claude.assert_async().await;
    let providers: Vec<Provider> = artifacts.iter().map(|a| a.provider).collect();
    assert_eq!(providers, vec![Provider::Gpt, Provider::Claude]);
    assert_ne!(artifacts[0].path, artifacts[1].path);
    assert_eq!(
        std::fs::read_to_string(&artifacts[0].path).unwrap(),
        "// gpt\nint main() {}\n"
    );
    assert_eq!(
        std::fs::read_to_string(&artifacts[1].path).unwrap(),
        "// claude\nint main() {}\n"
    );
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let mut server = Server::new_async().await;
    let gpt = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let settings = settings_for(&server, &[("OPENAI_API_KEY", "k1")]);
    let request = TranslateRequest {
        source: source(),
        selection: ModelSelection::Both,
        max_tokens: 2000,
    };
    let err = translate(&settings, OutputWriter::new(out.path().join("out")), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }), "got {err}");
    gpt.assert_async().await;
    assert!(!out.path().join("out").exists());
}

#[tokio::test]
async fn remote_error_leaves_no_output_file() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(
            json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}})
                .to_string(),
        )
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let writer = OutputWriter::new(out.path());
    let runner = Runner::with_clients(vec![client(Provider::Gpt, &server)], writer.clone());
    let err = runner.run(&source(), 2000).await.unwrap_err();

    match err {
        Error::Remote {
            provider,
            status,
            kind,
            ref message,
        } => {
            assert_eq!(provider, Provider::Gpt);
            assert_eq!(status, 401);
            assert_eq!(kind, ProviderErrorKind::Authentication);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert!(!writer.path_for(Provider::Gpt).exists());
}

#[tokio::test]
async fn second_provider_failure_keeps_first_output() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(openai_body("int main() {}"))
        .create_async()
        .await;
    server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body(r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#)
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let writer = OutputWriter::new(out.path());
    let runner = Runner::with_clients(
        vec![client(Provider::Gpt, &server), client(Provider::Claude, &server)],
        writer.clone(),
    );
    let err = runner.run(&source(), 2000).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Remote {
            provider: Provider::Claude,
            kind: ProviderErrorKind::Overloaded,
            ..
        }
    ));
    assert!(writer.path_for(Provider::Gpt).exists());
    assert!(!writer.path_for(Provider::Claude).exists());
}

#[tokio::test]
async fn truncated_reply_is_still_written_unchanged() {
    let mut server = Server::new_async().await;
    let cpp = "#include <iostream>\nint main() {\n    for (int i = 0; i < 10; ++i) {\n";
    let body = json!({
        "id": "chatcmpl-2",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": cpp}, "finish_reason": "length"}],
        "usage": {"prompt_tokens": 50, "completion_tokens": 16, "total_tokens": 66}
    })
    .to_string();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let response = client(Provider::Gpt, &server)
        .complete(&py2cpp::prompt::Prompt::for_source(&source()), 16)
        .await
        .unwrap();
    assert!(matches!(&response.finish_reason, Some(reason) if reason.is_truncated()));
    assert_eq!(response.text, cpp);

    let out = tempfile::tempdir().unwrap();
    let runner = Runner::with_clients(
        vec![client(Provider::Gpt, &server)],
        OutputWriter::new(out.path()),
    );
    let artifacts = runner.run(&source(), 16).await.unwrap();
    assert_eq!(std::fs::read(&artifacts[0].path).unwrap(), cpp.as_bytes());
}

#[tokio::test]
async fn failed_run_leaves_earlier_output_untouched() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body(r#"{"error":{"message":"boom","type":"server_error"}}"#)
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let writer = OutputWriter::new(out.path());
    std::fs::write(writer.path_for(Provider::Gpt), "// from last time\n").unwrap();

    let runner = Runner::with_clients(vec![client(Provider::Gpt, &server)], writer.clone());
    let err = runner.run(&source(), 2000).await.unwrap_err();

    assert!(matches!(err, Error::Remote { provider: Provider::Gpt, status: 500, .. }));
    assert_eq!(
        std::fs::read_to_string(writer.path_for(Provider::Gpt)).unwrap(),
        "// from last time\n"
    );
}

#[tokio::test]
async fn empty_and_malformed_responses_are_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(openai_body("   \n"))
        .create_async()
        .await;
    server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let out = tempfile::tempdir().unwrap();
    let writer = OutputWriter::new(out.path());

    let gpt = Runner::with_clients(vec![client(Provider::Gpt, &server)], writer.clone());
    let err = gpt.run(&source(), 2000).await.unwrap_err();
    assert!(matches!(err, Error::EmptyResponse { provider: Provider::Gpt, .. }));

    let claude = Runner::with_clients(vec![client(Provider::Claude, &server)], writer.clone());
    let err = claude.run(&source(), 2000).await.unwrap_err();
    assert!(matches!(err, Error::EmptyResponse { provider: Provider::Claude, .. }));

    assert!(!writer.path_for(Provider::Gpt).exists());
    assert!(!writer.path_for(Provider::Claude).exists());
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let unreachable = ProviderClientBuilder::new(Provider::Gpt)
        .api_key("test-key")
        .base_url_override("http://127.0.0.1:1")
        .build()
        .unwrap();

    let out = tempfile::tempdir().unwrap();
    let runner = Runner::with_clients(vec![unreachable], OutputWriter::new(out.path()));
    let err = runner.run(&source(), 2000).await.unwrap_err();

    assert!(matches!(err, Error::Transport { provider: Provider::Gpt, .. }));
    assert!(err.is_provider_error());
}

fn settings_for(server: &ServerGuard, vars: &[(&str, &str)]) -> Settings {
    let mut map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    map.insert("OPENAI_BASE_URL".into(), server.url());
    map.insert("ANTHROPIC_BASE_URL".into(), server.url());
    Settings::from_lookup(move |k| map.get(k).cloned()).unwrap()
}
