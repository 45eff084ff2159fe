//! Message of the day.
//!
//! # Responsibilities
//! - Accept either a legacy string or a JSON chat component
//! - Normalize to section-coded text (`§a`, `§l`, ...)
//! - Render as plain text or ANSI terminal text
//!
//! # Design Decisions
//! - Chat components are flattened once at parse time
//! - Codes are matched case-insensitively
//! - Unknown codes are kept verbatim in ANSI output

use serde::Deserialize;
use serde_json::Value;

const SECTION: char = '§';
const ANSI_RESET: &str = "\x1b[0m";

/// Formatting flags of a chat component and their section codes.
const FORMAT_FLAGS: [(&str, char); 5] = [
    ("obfuscated", 'k'),
    ("bold", 'l'),
    ("strikethrough", 'm'),
    ("underlined", 'n'),
    ("italic", 'o'),
];

/// Message of the day, stored as section-coded text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct Motd {
    raw: String,
}

impl Motd {
    /// Build from section-coded text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Section-coded text, as a vanilla client would receive it.
    pub fn as_section_coded(&self) -> &str {
        &self.raw
    }

    /// Text with every formatting code removed.
    pub fn to_plain(&self) -> String {
        let mut out = String::with_capacity(self.raw.len());
        let mut chars = self.raw.chars();
        while let Some(c) = chars.next() {
            if c == SECTION {
                if chars.next().is_none() {
                    out.push(c);
                }
                continue;
            }
            out.push(c);
        }
        out
    }

    /// Text with formatting codes translated to ANSI escape sequences.
    ///
    /// The output always ends with a reset.
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.raw.len() + 16);
        let mut chars = self.raw.chars();
        while let Some(c) = chars.next() {
            if c != SECTION {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some(code) => match ansi_for_code(code) {
                    Some(seq) => out.push_str(seq),
                    None if is_unsupported(code) => {}
                    None => {
                        out.push(SECTION);
                        out.push(code);
                    }
                },
                None => out.push(SECTION),
            }
        }
        out.push_str(ANSI_RESET);
        out
    }

    /// True if the plain text contains `needle`, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.to_plain().to_lowercase().contains(&needle.to_lowercase())
    }
}

impl From<Value> for Motd {
    fn from(value: Value) -> Self {
        let mut raw = String::new();
        flatten_component(&value, &mut raw);
        Self { raw }
    }
}

impl From<&str> for Motd {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn flatten_component(value: &Value, out: &mut String) {
    match value {
        Value::String(text) => out.push_str(text),
        Value::Array(parts) => {
            for part in parts {
                flatten_component(part, out);
            }
        }
        Value::Object(map) => {
            if let Some(code) = map
                .get("color")
                .and_then(Value::as_str)
                .and_then(color_code)
            {
                out.push(SECTION);
                out.push(code);
            }
            for (flag, code) in FORMAT_FLAGS {
                if map.get(flag).and_then(Value::as_bool) == Some(true) {
                    out.push(SECTION);
                    out.push(code);
                }
            }
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                out.push_str(text);
            } else if let Some(key) = map.get("translate").and_then(Value::as_str) {
                out.push_str(key);
            }
            if let Some(extra) = map.get("extra") {
                flatten_component(extra, out);
            }
        }
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(_) | Value::Null => {}
    }
}

/// Section code for a named chat color.
fn color_code(name: &str) -> Option<char> {
    let code = match name {
        "black" => '0',
        "dark_blue" => '1',
        "dark_green" => '2',
        "dark_aqua" => '3',
        "dark_red" => '4',
        "dark_purple" => '5',
        "gold" => '6',
        "gray" => '7',
        "dark_gray" => '8',
        "blue" => '9',
        "green" => 'a',
        "aqua" => 'b',
        "red" => 'c',
        "light_purple" => 'd',
        "yellow" => 'e',
        "white" => 'f',
        "reset" => 'r',
        _ => return None,
    };
    Some(code)
}

fn ansi_for_code(code: char) -> Option<&'static str> {
    let seq = match code.to_ascii_lowercase() {
        '0' => "\x1b[30m",
        '1' => "\x1b[34m",
        '2' => "\x1b[32m",
        '3' => "\x1b[36m",
        '4' => "\x1b[31m",
        '5' => "\x1b[35m",
        '6' => "\x1b[33m",
        '7' => "\x1b[37m",
        '8' => "\x1b[90m",
        '9' => "\x1b[94m",
        'a' => "\x1b[92m",
        'b' => "\x1b[96m",
        'c' => "\x1b[91m",
        'd' => "\x1b[95m",
        'e' => "\x1b[93m",
        'f' => "\x1b[97m",
        'l' => "\x1b[1m",
        'n' => "\x1b[4m",
        'r' => ANSI_RESET,
        _ => return None,
    };
    Some(seq)
}

// Obfuscated, strikethrough and italic have no portable terminal rendering.
fn is_unsupported(code: char) -> bool {
    matches!(code.to_ascii_lowercase(), 'k' | 'm' | 'o')
}
