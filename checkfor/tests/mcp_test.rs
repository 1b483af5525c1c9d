use anyhow::Result;
use checkfor::mcp::{self, McpServer};
use checkfor::{SearchResult, Settings};
use serde_json::{json, Value};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

fn exchange(server: &McpServer, requests: &[Value]) -> Result<Vec<Value>> {
    let input = requests
        .iter()
        .map(|request| format!("{}\n", request))
        .collect::<String>();

    let mut output = Vec::new();
    mcp::serve(server, Cursor::new(input), &mut output)?;

    String::from_utf8(output)?
        .lines()
        .map(|line| -> Result<Value> { Ok(serde_json::from_str(line)?) })
        .collect()
}

fn tool_result(response: &Value) -> Result<SearchResult> {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("missing text content in {}", response))?;
    Ok(serde_json::from_str(text)?)
}

#[test]
fn test_session() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.go"), "package a\n// TODO: test\n")?;
    fs::write(dir.path().join("b.go"), "package b\n")?;
    let dir_str = dir.path().to_string_lossy().into_owned();

    let responses = exchange(
        &McpServer::default(),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "checkfor",
                    "arguments": {"dir": [dir_str], "search": "package", "exclude": ["b"]}
                }
            }),
            json!({"jsonrpc": "2.0", "id": 4, "method": "shutdown"}),
        ],
    )?;

    assert_eq!(responses.len(), 4);
    for (i, response) in responses.iter().enumerate() {
        assert_eq!(response["jsonrpc"], "2.0");
        assert_eq!(response["id"], json!(i + 1));
    }

    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[1]["result"]["tools"][0]["name"], "checkfor");

    let result = tool_result(&responses[2])?;
    let directory = &result.directories[0];
    assert_eq!(directory.matches_found, 1);
    assert_eq!(directory.original_matches, Some(2));
    assert_eq!(directory.filtered_matches, Some(1));
    assert_eq!(directory.files[0].path, "a.go");

    assert_eq!(responses[3]["error"]["code"], -32601);
    assert!(responses[3].get("result").is_none());
    Ok(())
}

#[test]
fn test_settings_fill_absent_arguments() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("main.rs"), "fn main() {\n    run();\n}\n")?;
    fs::write(dir.path().join("run.txt"), "run\n")?;

    let settings = Settings {
        ext: Some(".rs".to_string()),
        context: 1,
        ..Settings::default()
    };
    let server = McpServer::new(settings);

    let responses = exchange(
        &server,
        &[
            json!({
                "id": "defaults",
                "method": "tools/call",
                "params": {
                    "name": "checkfor",
                    "arguments": {"dir": dir.path().to_string_lossy(), "search": "run"}
                }
            }),
            json!({
                "id": "overrides",
                "method": "tools/call",
                "params": {
                    "name": "checkfor",
                    "arguments": {
                        "dir": dir.path().to_string_lossy(),
                        "search": "run",
                        "ext": ".txt",
                        "context": 0
                    }
                }
            }),
        ],
    )?;

    let result = tool_result(&responses[0])?;
    let m = &result.directories[0].files[0].matches[0];
    assert_eq!(result.directories[0].files[0].path, "main.rs");
    assert_eq!(m.line_number, 2);
    assert_eq!(m.context_before, Some(vec!["fn main() {".to_string()]));
    assert_eq!(m.context_after, Some(vec!["}".to_string()]));

    let result = tool_result(&responses[1])?;
    let file = &result.directories[0].files[0];
    assert_eq!(file.path, "run.txt");
    assert_eq!(file.matches[0].context_before, None);
    Ok(())
}

#[test]
fn test_errors_do_not_stop_the_server() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("x.txt"), "found\n")?;

    let input = format!(
        "{}\n{{broken\n{}\n",
        json!({"id": 1, "method": "tools/call", "params": {"name": "grep"}}),
        json!({
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "checkfor",
                "arguments": {"dir": dir.path().to_string_lossy(), "search": "found"}
            }
        }),
    );

    let mut output = Vec::new();
    mcp::serve(&McpServer::default(), Cursor::new(input), &mut output)?;
    let responses: Vec<Value> = String::from_utf8(output)?
        .lines()
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()?;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["error"]["message"], "Unknown tool");
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(tool_result(&responses[2])?.total_matches(), 1);
    Ok(())
}
