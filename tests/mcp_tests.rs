// Tool protocol tests (HTTP and stdio transports)
// Author: kelexine (https://github.com/kelexine)

mod common;

use axum::http::StatusCode;
use common::*;
use mapgate::mcp::{stdio, JsonRpcResponse, McpServer};
use mapgate::server::create_router;
use mockito::Matcher;
use serde_json::{json, Value};

fn server(config: &mapgate::config::AppConfig, translate_key: Option<&str>) -> McpServer {
    McpServer::new(test_tools(config, translate_key))
}

async fn call(server: &McpServer, message: Value) -> JsonRpcResponse {
    server
        .handle_message(&message.to_string())
        .await
        .expect("request should get a response")
}

#[tokio::test]
async fn test_initialize_and_list_tools() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);
    let server = server(&config, None);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;
    let result = response.result.unwrap();
    assert_eq!(response.id, json!(1));
    assert_eq!(result["serverInfo"]["name"], "mapgate");
    assert!(result["capabilities"]["tools"].is_object());

    let response = call(&server, json!({"jsonrpc": "2.0", "id": "b", "method": "tools/list"})).await;
    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["geocode", "get_weather"]);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["address"]));
}

#[tokio::test]
async fn test_notification_gets_no_response() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);
    let server = server(&config, None);

    let response = server
        .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_protocol_errors() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);
    let server = server(&config, None);

    let response = server.handle_message("{not json").await.unwrap();
    assert_eq!(response.error.unwrap().code, -32700);
    assert_eq!(response.id, Value::Null);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 7})).await;
    assert_eq!(response.error.unwrap().code, -32600);
    assert_eq!(response.id, json!(7));

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list"})).await;
    assert_eq!(response.error.unwrap().code, -32601);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": {"name": "nope", "arguments": {}}}),
    )
    .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("Unknown tool"));
}

#[tokio::test]
async fn test_blank_tool_argument_never_reaches_provider() {
    let mut amap = mockito::Server::new_async().await;
    let weather = amap
        .mock("GET", "/weather/weatherInfo")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = test_config(&amap.url(), UNREACHABLE_URL);
    let server = server(&config, None);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "get_weather", "arguments": {"city": "   "}}}),
    )
    .await;

    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert_eq!(error.message, "City parameter is required");
    weather.assert_async().await;
}

#[tokio::test]
async fn test_tool_call_relays_provider_payload() {
    let mut amap = mockito::Server::new_async().await;
    let mut llm = mockito::Server::new_async().await;

    let _translate = llm
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(chat_completion_body("北京"))
        .expect(1)
        .create_async()
        .await;

    let weather = amap
        .mock("GET", "/weather/weatherInfo")
        .match_query(Matcher::UrlEncoded("city".into(), "北京".into()))
        .with_status(200)
        .with_body(weather_body("北京市"))
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&amap.url(), &llm.url());
    let server = server(&config, Some(LLM_KEY));

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
               "params": {"name": "get_weather", "arguments": {"city": "beijing"}}}),
    )
    .await;

    weather.assert_async().await;
    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["structuredContent"]["lives"][0]["city"], "北京市");
    let text: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(text, result["structuredContent"]);
}

#[tokio::test]
async fn test_geocode_tool_defaults_city_to_empty() {
    let mut amap = mockito::Server::new_async().await;
    let geocode = amap
        .mock("GET", "/geocode/geo")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), "天安门".into()),
            Matcher::UrlEncoded("city".into(), "".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status":"1","geocodes":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&amap.url(), UNREACHABLE_URL);
    let server = server(&config, None);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
               "params": {"name": "geocode", "arguments": {"address": "天安门"}}}),
    )
    .await;

    geocode.assert_async().await;
    assert_eq!(response.result.unwrap()["structuredContent"]["status"], "1");
}

#[tokio::test]
async fn test_http_transport() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);

    let app = create_router(&config.server, test_tools(&config, None));
    let (status, body) = post_body(app, "/mcp", r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let response: JsonRpcResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.result.unwrap(), json!({}));

    let app = create_router(&config.server, test_tools(&config, None));
    let (status, body) = post_body(
        app,
        "/mcp",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_stdio_transport_answers_each_line() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);
    let server = server(&config, None);

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );
    let mut output = Vec::new();

    stdio::run(server, input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<JsonRpcResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].result.as_ref().unwrap()["protocolVersion"], "2025-03-26");
    assert_eq!(lines[1].id, json!(2));
}

#[tokio::test]
async fn test_stdio_keeps_serving_after_invalid_utf8_line() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);
    let server = server(&config, None);

    let mut input = Vec::new();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
    input.extend_from_slice(b"\n\xff\xfe garbage\n");
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
    input.push(b'\n');
    let mut output = Vec::new();

    stdio::run(server, input.as_slice(), &mut output).await.unwrap();

    let lines: Vec<JsonRpcResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].id, json!(1));
    assert_eq!(lines[1].id, Value::Null);
    assert_eq!(lines[1].error.as_ref().unwrap().code, -32700);
    assert_eq!(lines[2].id, json!(2));
    assert_eq!(lines[2].result.as_ref().unwrap(), &json!({}));
}

#[tokio::test]
async fn test_null_id_is_answered_not_treated_as_notification() {
    let config = test_config(UNREACHABLE_URL, UNREACHABLE_URL);
    let server = server(&config, None);

    let response = server
        .handle_message(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
        .await
        .expect("null id still gets a reply");
    assert_eq!(response.id, Value::Null);
    assert_eq!(response.result.unwrap(), json!({}));
}
