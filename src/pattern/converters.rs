//! Builtin converters registered in the default keyword table

use super::registry::ConverterFactory;
use super::Converter;
use crate::core::{LogEvent, TimestampFormat};
use crate::render::default_render_map;
use std::collections::HashMap;
use std::sync::Arc;

/// `%d` / `%date` — event timestamp
///
/// The option block selects a named format (`ISO8601`, `UNIX`, ...) or a
/// custom strftime string.
pub struct DateConverter {
    format: TimestampFormat,
}

impl DateConverter {
    pub fn new(option: Option<&str>) -> Self {
        Self {
            format: option.map(TimestampFormat::from_option).unwrap_or_default(),
        }
    }
}

impl Converter for DateConverter {
    fn render(&self, event: &LogEvent, out: &mut String) {
        out.push_str(&self.format.format(&event.timestamp));
    }
}

/// `%p` / `%level` — severity name
pub struct LevelConverter;

impl Converter for LevelConverter {
    fn render(&self, event: &LogEvent, out: &mut String) {
        out.push_str(event.level.to_str());
    }
}

/// `%m` / `%msg` / `%message` — rendered message text
pub struct MessageConverter;

impl Converter for MessageConverter {
    fn render(&self, event: &LogEvent, out: &mut String) {
        out.push_str(&event.message);
    }
}

/// `%t` / `%thread` — thread name, falling back to the thread id
pub struct ThreadConverter;

impl Converter for ThreadConverter {
    fn render(&self, event: &LogEvent, out: &mut String) {
        match &event.thread_name {
            Some(name) => out.push_str(name),
            None => out.push_str(&event.thread_id),
        }
    }
}

/// `%X` / `%context` — ambient context lookup
///
/// With a `{key}` option, renders that key's value (nothing when unset);
/// bare, renders the whole context as ordered key=value pairs.
pub struct ContextConverter {
    key: Option<String>,
}

impl ContextConverter {
    pub fn new(option: Option<&str>) -> Self {
        Self {
            key: option.map(String::from),
        }
    }
}

impl Converter for ContextConverter {
    fn render(&self, event: &LogEvent, out: &mut String) {
        match &self.key {
            Some(key) => {
                if let Some(value) = event.context.get(key) {
                    out.push_str(&value.to_string());
                }
            }
            None => out.push_str(&event.context.format_fields()),
        }
    }
}

/// `%n` — newline
pub struct NewlineConverter;

impl Converter for NewlineConverter {
    fn render(&self, _event: &LogEvent, out: &mut String) {
        out.push('\n');
    }
}

/// `%ex` / `%error` / `%exception` — attached error rendered through the
/// process-wide default render map
pub struct ErrorConverter;

impl Converter for ErrorConverter {
    fn render(&self, event: &LogEvent, out: &mut String) {
        if let Some(error) = &event.error {
            default_render_map().render(error.as_ref(), out);
        }
    }
}

/// Build the process-wide default keyword table
pub(super) fn builtin_factories() -> HashMap<String, ConverterFactory> {
    let mut table: HashMap<String, ConverterFactory> = HashMap::new();

    let date: ConverterFactory = Arc::new(|opt| Box::new(DateConverter::new(opt)));
    table.insert("d".to_string(), Arc::clone(&date));
    table.insert("date".to_string(), date);

    let level: ConverterFactory = Arc::new(|_| Box::new(LevelConverter));
    table.insert("p".to_string(), Arc::clone(&level));
    table.insert("level".to_string(), level);

    let message: ConverterFactory = Arc::new(|_| Box::new(MessageConverter));
    table.insert("m".to_string(), Arc::clone(&message));
    table.insert("msg".to_string(), Arc::clone(&message));
    table.insert("message".to_string(), message);

    let thread: ConverterFactory = Arc::new(|_| Box::new(ThreadConverter));
    table.insert("t".to_string(), Arc::clone(&thread));
    table.insert("thread".to_string(), thread);

    let context: ConverterFactory = Arc::new(|opt| Box::new(ContextConverter::new(opt)));
    table.insert("X".to_string(), Arc::clone(&context));
    table.insert("context".to_string(), context);

    table.insert("n".to_string(), Arc::new(|_| Box::new(NewlineConverter)));

    let error: ConverterFactory = Arc::new(|_| Box::new(ErrorConverter));
    table.insert("ex".to_string(), Arc::clone(&error));
    table.insert("error".to_string(), Arc::clone(&error));
    table.insert("exception".to_string(), error);

    table
}
