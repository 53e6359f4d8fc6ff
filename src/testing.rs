// Test doubles for the prompt and transport seams.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use crate::api::{ApiResponse, Transport, TransportError};
use crate::ui::Prompter;

/// Answers prompts from a fixed script, then reports end of input.
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new(lines: &[&str]) -> Self {
        ScriptedPrompter {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Records every POST and answers with a canned success reply.
#[derive(Default)]
pub struct RecordingTransport {
    sent: RefCell<Vec<(String, Option<String>)>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<(String, Option<String>)> {
        self.sent.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn post(&self, path: &str, body: Option<String>) -> Result<ApiResponse, TransportError> {
        self.sent.borrow_mut().push((path.to_string(), body));
        Ok(ApiResponse {
            url: format!("http://127.0.0.1:8080{path}"),
            status: 200,
            body: r#"{"code": 0, "msg": "ok", "bSyncResp": true}"#.to_string(),
        })
    }
}
