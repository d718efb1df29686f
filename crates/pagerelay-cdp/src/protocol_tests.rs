use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://chat.qwen.ai/"})),
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(json.contains("chat.qwen.ai"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_request_with_session() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: None,
        session_id: Some("session-1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"sessionId\":\"session-1\""));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
    assert!(resp.error.is_none());
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.loadEventFired", "params": {}, "sessionId": "s"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, None);
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
    assert_eq!(resp.session_id.as_deref(), Some("s"));
}

#[test]
fn test_target_info_deserialize() {
    let json = r#"{
        "targetId": "t1",
        "type": "page",
        "title": "Qwen",
        "url": "https://chat.qwen.ai/",
        "attached": false
    }"#;
    let info: TargetInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.target_id, "t1");
    assert_eq!(info.target_type, "page");
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/131.0.0.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/xyz"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_remote_object_nullish() {
    let json = r#"{"type": "object", "subtype": "null", "value": null}"#;
    let obj: RemoteObject = serde_json::from_str(json).unwrap();
    assert!(obj.is_nullish());

    let json = r#"{"type": "object", "className": "HTMLTextAreaElement", "objectId": "o1"}"#;
    let obj: RemoteObject = serde_json::from_str(json).unwrap();
    assert!(!obj.is_nullish());
    assert_eq!(obj.object_id.as_deref(), Some("o1"));
}
