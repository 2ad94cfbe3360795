use colored::*;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use terminal_size::{terminal_size, Width};

const MAX_RULE_WIDTH: usize = 60;

/// Incremental renderer for streamed markdown: prose passes through
/// untouched, fenced code blocks come out framed and
/// syntax-highlighted. Content may arrive in arbitrarily split chunks;
/// only complete lines inside a block are highlighted, the rest waits
/// for more input.
pub struct CodeBuffer {
    pending: String,
    in_code_block: bool,
    block_lang: Option<String>,
    block_content: String,
    emitted_lines: usize,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self {
            pending: String::new(),
            in_code_block: false,
            block_lang: None,
            block_content: String::new(),
            emitted_lines: 0,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    pub fn append(&mut self, chunk: &str) -> String {
        self.pending.push_str(chunk);
        let mut out = String::new();

        loop {
            if self.in_code_block {
                if let Some(end) = self.pending.find("```") {
                    self.block_content.push_str(&self.pending[..end]);
                    self.pending = self.pending[end + 3..].to_string();
                    out.push_str(&self.emit_remaining_lines(true));
                    out.push_str(&block_footer());
                    self.reset_block();
                } else {
                    self.block_content.push_str(&self.pending);
                    self.pending.clear();
                    out.push_str(&self.emit_complete_lines());
                    break;
                }
            } else if let Some(start) = self.pending.find("```") {
                out.push_str(&self.pending[..start]);
                let after = self.pending[start + 3..].to_string();

                if let Some(newline) = after.find('\n') {
                    let lang_token = after[..newline].trim();
                    self.block_lang = if lang_token.is_empty() {
                        None
                    } else {
                        Some(lang_token.to_string())
                    };
                    self.pending = after[newline + 1..].to_string();
                    self.in_code_block = true;
                    self.block_content.clear();
                    self.emitted_lines = 0;
                    out.push_str(&block_header(self.block_lang.as_deref()));
                } else {
                    // Fence seen but its info line is still incomplete
                    self.pending = format!("```{}", after);
                    break;
                }
            } else {
                out.push_str(&self.pending);
                self.pending.clear();
                break;
            }
        }

        out
    }

    pub fn flush(&mut self) -> String {
        let mut out = String::new();

        if self.in_code_block {
            // Unterminated code block
            if !self.block_content.is_empty() {
                out.push_str(&self.emit_remaining_lines(false));
                out.push_str(&block_footer());
            }
        } else if !self.pending.is_empty() {
            out.push_str(&self.pending);
        }

        self.pending.clear();
        self.reset_block();
        out
    }

    /// Highlight lines that became complete since the last call,
    /// holding the trailing (possibly partial) line back.
    fn emit_complete_lines(&mut self) -> String {
        let lines: Vec<&str> = self.block_content.lines().collect();
        if lines.len() <= self.emitted_lines + 1 {
            return String::new();
        }

        let fresh = &lines[self.emitted_lines..lines.len() - 1];
        self.emitted_lines = lines.len() - 1;
        self.highlight(&(fresh.join("\n") + "\n"))
    }

    fn emit_remaining_lines(&mut self, terminated: bool) -> String {
        let lines: Vec<&str> = self.block_content.lines().collect();
        if self.emitted_lines >= lines.len() {
            return String::new();
        }

        let rest = lines[self.emitted_lines..].join("\n");
        self.emitted_lines = lines.len();
        let text = if terminated || self.block_content.ends_with('\n') {
            rest + "\n"
        } else {
            rest
        };
        self.highlight(&text)
    }

    fn highlight(&self, code: &str) -> String {
        let theme = &self.theme_set.themes["Solarized (dark)"];
        let syntax = match self.block_lang.as_deref() {
            Some(lang) => self
                .syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text()),
            None => self.syntax_set.find_syntax_plain_text(),
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut out = String::new();
        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(_) => out.push_str(line),
            }
        }
        out
    }

    fn reset_block(&mut self) {
        self.in_code_block = false;
        self.block_lang = None;
        self.block_content.clear();
        self.emitted_lines = 0;
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn rule_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).min(MAX_RULE_WIDTH),
        None => MAX_RULE_WIDTH,
    }
}

fn block_header(lang: Option<&str>) -> String {
    let label = format!("[{}]", lang.unwrap_or("code"));
    let dashes = rule_width().saturating_sub(label.len() + 2);
    format!(
        "{}{}{}\n",
        "┌─".dimmed(),
        label.cyan(),
        "─".repeat(dashes).dimmed()
    )
}

fn block_footer() -> String {
    let dashes = rule_width().saturating_sub(1);
    format!("{}\n", format!("└{}", "─".repeat(dashes)).dimmed())
}
