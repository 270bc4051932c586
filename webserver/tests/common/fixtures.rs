//! Test fixtures for webserver integration tests

use serde_json::{json, Value};

pub const URL: &str = "https://news.example.com/politics/markets-in-freefall";
pub const OTHER_URL: &str = "http://x.com";
pub const ASSESSMENT: &str = "Biased, alarmist tone.";
pub const CACHED_TEXT: &str = "cached text";
pub const RUN_ID: &str = "run-1";

pub fn analyze_body(url: &str) -> Value {
    json!({ "url": url })
}

pub fn workflow_response() -> Value {
    json!({
        "payload": {
            "workflowState": { "status": "success", "result": { "output": ASSESSMENT } }
        }
    })
}
