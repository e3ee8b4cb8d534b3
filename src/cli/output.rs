//! Coloured, labelled console output for the shell.

use colored::Colorize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

impl MessageKind {
    fn decorate(self, text: &str) -> String {
        match self {
            MessageKind::Info => format!("INFO: {text}"),
            MessageKind::Success => format!("SUCCESS: {text}"),
            MessageKind::Warning => format!("WARNING: {text}"),
            MessageKind::Error => format!("ERROR: {text}"),
            MessageKind::Section => format!("=== {} ===", text.trim()),
        }
    }

    fn paint(self, line: String) -> String {
        match self {
            MessageKind::Info => line,
            MessageKind::Success => line.bright_green().to_string(),
            MessageKind::Warning => line.bright_yellow().to_string(),
            MessageKind::Error => line.bright_red().to_string(),
            MessageKind::Section => line.bold().to_string(),
        }
    }
}

static PLAIN: AtomicBool = AtomicBool::new(false);

/// Turns colour off for the rest of the process (`ui_color_enabled = false`).
pub fn set_plain(plain: bool) {
    PLAIN.store(plain, Ordering::Relaxed);
    if plain {
        colored::control::set_override(false);
    }
}

pub(crate) fn style(kind: MessageKind, message: impl fmt::Display) -> String {
    let line = kind.decorate(&message.to_string());
    if PLAIN.load(Ordering::Relaxed) {
        line
    } else {
        kind.paint(line)
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let line = style(kind, message);
    if kind == MessageKind::Section {
        println!();
    }
    println!("{line}");
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
