use anyhow::{Result, bail};
use console::{Term, style};
use pagegrade_browser::PageSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Url,
    Html,
}

/// Ask on the terminal what to analyze
///
/// Refuses to prompt when nobody is attached to the terminal, so scripted
/// runs fail instead of hanging.
pub fn ask_source() -> Result<PageSource> {
    let term = Term::stderr();
    if !term.features().is_attended() {
        bail!("No page to analyze. Pass --url, --html or --html-file.");
    }

    term.write_line(&format!("{}", style("What do you want to analyze?").bold()))?;
    term.write_line("  1) URL")?;
    term.write_line("  2) HTML")?;

    let kind = loop {
        term.write_str("> ")?;
        match parse_choice(&term.read_line()?) {
            Some(kind) => break kind,
            None => term.write_line("Please enter 1 (URL) or 2 (HTML)")?,
        }
    };

    let source = match kind {
        SourceKind::Url => PageSource::url(&read_non_empty(&term, "Enter the URL to analyze: ")?),
        SourceKind::Html => {
            PageSource::html(read_non_empty(&term, "Enter the HTML content to analyze: ")?)
        }
    };

    Ok(source)
}

pub fn parse_choice(input: &str) -> Option<SourceKind> {
    match input.trim().to_lowercase().as_str() {
        "1" | "u" | "url" => Some(SourceKind::Url),
        "2" | "h" | "html" => Some(SourceKind::Html),
        _ => None,
    }
}

fn read_non_empty(term: &Term, message: &str) -> Result<String> {
    loop {
        term.write_str(message)?;
        let input = term.read_line()?;
        if !input.trim().is_empty() {
            return Ok(input);
        }
        term.write_line(&format!("{}", style("A value is required.").yellow()))?;
    }
}
