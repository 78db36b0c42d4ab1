//! Block-level structuring: tables, lists, blockquotes, paragraphs.
//!
//! Each construct gets its own single-pass machine: a small state enum (or
//! pending buffer) advanced one line at a time, with an explicit flush at
//! end of input rather than a sentinel line. The machines run in a fixed
//! order — tables first, so their rows are consumed as whole blocks, then
//! lists and blockquotes, and the paragraph rewrite last so it only sees
//! lines the earlier machines left untagged.

use once_cell::sync::Lazy;
use regex::Regex;

static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap());
static QUOTE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*>\s?(.*)$").unwrap());
static ALIGN_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// Run all four machines over `text` in order.
pub fn structure(text: &str) -> String {
    let text = run_machine(TableMachine::default(), text);
    let text = run_machine(ListMachine::default(), &text);
    let text = run_machine(QuoteMachine::default(), &text);
    paragraphs(&text)
}

trait LineMachine {
    fn feed(&mut self, line: &str);
    fn finish(self) -> Vec<String>;
}

fn run_machine<M: LineMachine>(mut machine: M, text: &str) -> String {
    for line in text.lines() {
        machine.feed(line);
    }
    machine.finish().join("\n")
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum ListState {
    #[default]
    None,
    Unordered,
    Ordered,
}

#[derive(Default)]
struct ListMachine {
    state: ListState,
    out: Vec<String>,
}

impl ListMachine {
    fn close(&mut self) {
        match self.state {
            ListState::Unordered => self.out.push("</ul>".into()),
            ListState::Ordered => self.out.push("</ol>".into()),
            ListState::None => {}
        }
        self.state = ListState::None;
    }

    fn open(&mut self, state: ListState, tag: &str) {
        if self.state != state {
            self.close();
            self.out.push(tag.into());
            self.state = state;
        }
    }
}

impl LineMachine for ListMachine {
    fn feed(&mut self, line: &str) {
        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            self.open(ListState::Unordered, "<ul>");
            self.out.push(format!("<li>{}</li>", &caps[1]));
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.open(ListState::Ordered, "<ol>");
            self.out.push(format!("<li>{}</li>", &caps[1]));
        } else {
            self.close();
            self.out.push(line.into());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.close();
        self.out
    }
}

// ---------------------------------------------------------------------------
// Blockquotes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct QuoteMachine {
    in_quote: bool,
    out: Vec<String>,
}

impl LineMachine for QuoteMachine {
    fn feed(&mut self, line: &str) {
        // The `>` marker and at most one following space are stripped.
        if let Some(caps) = QUOTE_LINE.captures(line) {
            if !self.in_quote {
                self.out.push("<blockquote>".into());
                self.in_quote = true;
            }
            self.out.push(format!("<p>{}</p>", &caps[1]));
        } else {
            if self.in_quote {
                self.out.push("</blockquote>".into());
                self.in_quote = false;
            }
            self.out.push(line.into());
        }
    }

    fn finish(mut self) -> Vec<String> {
        if self.in_quote {
            self.out.push("</blockquote>".into());
        }
        self.out
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Accumulates contiguous pipe-prefixed lines; the pending buffer doubles
/// as the in-table state.
#[derive(Default)]
struct TableMachine {
    pending: Vec<String>,
    out: Vec<String>,
}

impl TableMachine {
    fn flush(&mut self) {
        if self.pending.len() < 2 {
            // Not enough rows for a table: the run stays literal text.
            self.out.append(&mut self.pending);
            return;
        }
        let rows = std::mem::take(&mut self.pending);
        self.render(&rows);
    }

    fn render(&mut self, rows: &[String]) {
        let header = parse_row(&rows[0]);
        let columns = header.len();

        let (alignments, body_start) = if is_separator_row(&rows[1]) {
            (parse_alignments(&rows[1], columns), 2)
        } else {
            (vec![Align::Left; columns], 1)
        };

        self.out.push("<div class=\"table-scroll\">".into());
        self.out.push("<table>".into());
        self.out
            .push(format!("<colgroup>{}</colgroup>", "<col/>".repeat(columns)));

        let mut head = String::from("<thead><tr>");
        for (cell, align) in header.iter().zip(&alignments) {
            head.push_str(&format!(
                "<th style=\"text-align: {}\">{}</th>",
                align.css(),
                cell
            ));
        }
        head.push_str("</tr></thead>");
        self.out.push(head);

        self.out.push("<tbody>".into());
        for row in &rows[body_start..] {
            let cells = parse_row(row);
            let mut tr = String::from("<tr>");
            for (index, align) in alignments.iter().enumerate() {
                let cell = cells.get(index).map(String::as_str).unwrap_or("");
                tr.push_str(&format!(
                    "<td style=\"text-align: {}\">{}</td>",
                    align.css(),
                    cell
                ));
            }
            tr.push_str("</tr>");
            self.out.push(tr);
        }
        self.out.push("</tbody>".into());
        self.out.push("</table>".into());
        self.out.push("</div>".into());
    }
}

impl LineMachine for TableMachine {
    fn feed(&mut self, line: &str) {
        if line.trim_start().starts_with('|') {
            self.pending.push(line.into());
        } else {
            self.flush();
            self.out.push(line.into());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.out
    }
}

/// Split a table row into trimmed cells, stripping one leading and one
/// trailing pipe.
fn parse_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_separator_row(line: &str) -> bool {
    let cells = parse_row(line);
    !cells.is_empty() && cells.iter().all(|cell| ALIGN_CELL.is_match(cell))
}

/// Per-column alignment from a separator row. Columns the row does not
/// cover default to left.
fn parse_alignments(line: &str, columns: usize) -> Vec<Align> {
    let cells = parse_row(line);
    (0..columns)
        .map(|index| match cells.get(index) {
            Some(cell) => {
                let leading = cell.starts_with(':');
                let trailing = cell.ends_with(':');
                match (leading, trailing) {
                    (true, true) => Align::Center,
                    (false, true) => Align::Right,
                    _ => Align::Left,
                }
            }
            None => Align::Left,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Paragraphs
// ---------------------------------------------------------------------------

/// Stateless rewrite: wrap bare text lines in `<p>`, pass blank lines and
/// lines that already carry a tag through unchanged.
fn paragraphs(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('<') {
                line.to_string()
            } else {
                format!("<p>{trimmed}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
