use crate::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use pagegrade_core::{AnalysisReport, PerformanceGrade, format_bytes};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

/// JSON output: the report plus where and when it came from
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    pub analyzed_at: DateTime<Utc>,
    pub report: &'a AnalysisReport,
}

pub fn print(report: &AnalysisReport, url: Option<&str>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report, url),
        OutputFormat::Table => {
            output_table(report);
            Ok(())
        }
        OutputFormat::Pretty => {
            output_pretty(report, url);
            Ok(())
        }
    }
}

fn output_json(report: &AnalysisReport, url: Option<&str>) -> Result<()> {
    let envelope = ReportEnvelope {
        url,
        analyzed_at: Utc::now(),
        report,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn output_pretty(report: &AnalysisReport, url: Option<&str>) {
    println!("\n{}", style("Page Analysis Report").bold().cyan());
    println!("{}", style("====================").cyan());

    if let Some(url) = url {
        println!("{} {}", style("URL:").bold(), url);
    }
    println!();

    let summary = vec![
        ("Performance grade".to_string(), report.performance_grade.to_string()),
        ("Page size".to_string(), format_bytes(report.page_size)),
        ("Load time".to_string(), report.load_time.clone()),
        ("Requests".to_string(), report.number_of_requests.to_string()),
        (
            "Score".to_string(),
            format!(
                "{:.2} (load {:.2}, size {:.2}, requests {:.2})",
                report.score.overall,
                report.score.load_time_score,
                report.score.page_size_score,
                report.score.request_count_score
            ),
        ),
    ];
    for (label, value) in align_rows(&summary) {
        if label.starts_with("Performance grade") {
            println!("{} {}", style(label).yellow(), grade_style(report.performance_grade, &value));
        } else {
            println!("{} {}", style(label).yellow(), value);
        }
    }

    for section in sections(report) {
        println!("\n{}", style(format!("{}:", section.title)).bold().cyan());

        if section.rows.is_empty() {
            println!("  (none)");
            continue;
        }

        let mut rows = section.rows.clone();
        rows.push(("Total".to_string(), section.total.clone()));
        let aligned = align_rows(&rows);
        if let Some((total, body)) = aligned.split_last() {
            for (label, value) in body {
                println!("{} {}", style(label).yellow(), value);
            }
            println!("{} {}", style(&total.0).bold().white(), style(&total.1).bold());
        }
    }

    println!();
}

fn grade_style(grade: PerformanceGrade, value: &str) -> String {
    let styled = match grade {
        PerformanceGrade::A | PerformanceGrade::B => style(value).green(),
        PerformanceGrade::C => style(value).yellow(),
        PerformanceGrade::D | PerformanceGrade::F => style(value).red(),
    };
    styled.bold().to_string()
}

fn output_table(report: &AnalysisReport) {
    println!("Section,Label,Value");
    println!("Summary,Performance grade,{}", report.performance_grade);
    println!("Summary,Score,{:.2}", report.score.overall);
    println!("Summary,Page size (bytes),{}", report.page_size);
    println!("Summary,Load time,{}", report.load_time);
    println!("Summary,Requests,{}", report.number_of_requests);

    for (title, rows) in raw_sections(report) {
        for (label, value) in rows {
            println!("{},{},{}", title, csv_field(&label), value);
        }
    }
}

/// A titled breakdown table, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
    pub total: String,
}

/// The five breakdown tables in display order
pub fn sections(report: &AnalysisReport) -> Vec<Section> {
    vec![
        byte_section("Content Size by Content Type", &report.content_size_by_type),
        byte_section("Content Size by Domain", &report.content_size_by_domain),
        count_section("Requests by Content Type", &report.requests_by_type),
        count_section("Requests by Domain", &report.requests_by_domain),
        byte_section("Requests by File", &report.requests_by_file),
    ]
}

fn raw_sections(report: &AnalysisReport) -> Vec<(&'static str, Vec<(String, u64)>)> {
    let counts = |map: &HashMap<String, usize>| -> Vec<(String, u64)> {
        sorted_rows(map)
            .into_iter()
            .map(|(label, count)| (label, count as u64))
            .collect()
    };

    vec![
        ("Content size by type (bytes)", sorted_rows(&report.content_size_by_type)),
        ("Content size by domain (bytes)", sorted_rows(&report.content_size_by_domain)),
        ("Requests by type", counts(&report.requests_by_type)),
        ("Requests by domain", counts(&report.requests_by_domain)),
        ("Requests by file (bytes)", sorted_rows(&report.requests_by_file)),
    ]
}

fn byte_section(title: &'static str, map: &HashMap<String, u64>) -> Section {
    let rows = sorted_rows(map);
    let total = rows.iter().fold(0u64, |acc, (_, v)| acc.saturating_add(*v));
    Section {
        title,
        rows: rows
            .into_iter()
            .map(|(label, bytes)| (display_label(label), format_bytes(bytes)))
            .collect(),
        total: format_bytes(total),
    }
}

fn count_section(title: &'static str, map: &HashMap<String, usize>) -> Section {
    let rows = sorted_rows(map);
    let total = rows.iter().fold(0usize, |acc, (_, v)| acc.saturating_add(*v));
    Section {
        title,
        rows: rows
            .into_iter()
            .map(|(label, count)| (display_label(label), count.to_string()))
            .collect(),
        total: total.to_string(),
    }
}

/// Largest value first, ties broken by label so output is stable
pub fn sorted_rows<V: Copy + Ord>(map: &HashMap<String, V>) -> Vec<(String, V)> {
    let mut rows: Vec<(String, V)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

// Hostless URLs (data:, about:) group under an empty domain
fn display_label(label: String) -> String {
    if label.is_empty() {
        "(no host)".to_string()
    } else {
        label
    }
}

/// Pad labels to a common width followed by `:`, and right-align values
pub fn align_rows<L: Display, V: Display>(rows: &[(L, V)]) -> Vec<(String, String)> {
    let rows: Vec<(String, String)> = rows
        .iter()
        .map(|(l, v)| (l.to_string(), v.to_string()))
        .collect();
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) + 1;
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0) + 1;

    rows.into_iter()
        .map(|(label, value)| {
            (
                format!("{:<width$}:", label, width = label_width),
                format!("{:>width$}", value, width = value_width),
            )
        })
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegrade_core::{PageMetrics, ResourceRecord, analyze};

    fn report() -> AnalysisReport {
        analyze(
            &PageMetrics::new(Some(120.0)),
            &[
                ResourceRecord::new("https://a.com/x.js", "script", 500_000, 50.0),
                ResourceRecord::new("https://b.com/y.png", "img", 300_000, 30.0),
                ResourceRecord::new("https://b.com/z.png", "img", 300_000, 30.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_align_rows_pads_labels_and_values() {
        let rows = vec![("Page size", "781.25 KB"), ("Requests", "2")];
        let aligned = align_rows(&rows);

        assert_eq!(aligned[0], ("Page size :".to_string(), " 781.25 KB".to_string()));
        assert_eq!(aligned[1], ("Requests  :".to_string(), "         2".to_string()));
    }

    #[test]
    fn test_sorted_rows_orders_by_value_then_label() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), 5u64);
        map.insert("a".to_string(), 5u64);
        map.insert("c".to_string(), 9u64);

        let rows = sorted_rows(&map);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sections_format_bytes_and_totals() {
        let sections = sections(&report());
        assert_eq!(sections.len(), 5);

        let by_type = &sections[0];
        assert_eq!(by_type.title, "Content Size by Content Type");
        assert_eq!(by_type.rows[0], ("img".to_string(), "585.94 KB".to_string()));
        assert_eq!(by_type.rows[1], ("script".to_string(), "488.28 KB".to_string()));
        assert_eq!(by_type.total, "1.05 MB");

        let requests_by_domain = &sections[3];
        assert_eq!(requests_by_domain.rows[0], ("b.com".to_string(), "2".to_string()));
        assert_eq!(requests_by_domain.total, "3");
    }

    #[test]
    fn test_byte_section_total_saturates() {
        let mut map = HashMap::new();
        map.insert("a.com".to_string(), u64::MAX);
        map.insert("b.com".to_string(), 1u64);

        let section = byte_section("Content Size by Domain", &map);
        assert_eq!(section.rows.len(), 2);
        assert_eq!(section.total, format_bytes(u64::MAX));
    }

    #[test]
    fn test_count_section_total_saturates() {
        let mut map = HashMap::new();
        map.insert("a.com".to_string(), usize::MAX);
        map.insert("b.com".to_string(), 2usize);

        let section = count_section("Requests by Domain", &map);
        assert_eq!(section.total, usize::MAX.to_string());
    }

    #[test]
    fn test_empty_domain_is_labelled() {
        assert_eq!(display_label(String::new()), "(no host)");
        assert_eq!(display_label("a.com".to_string()), "a.com");
    }

    #[test]
    fn test_csv_field_quotes_commas() {
        assert_eq!(csv_field("https://a.com/x.js"), "https://a.com/x.js");
        assert_eq!(csv_field("https://a.com/?q=1,2"), "\"https://a.com/?q=1,2\"");
        assert_eq!(csv_field("say \"hi\", ok"), "\"say \"\"hi\"\", ok\"");
    }

    #[test]
    fn test_envelope_serializes_report() {
        let report = report();
        let envelope = ReportEnvelope {
            url: Some("https://a.com/"),
            analyzed_at: Utc::now(),
            report: &report,
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["url"], "https://a.com/");
        assert!(json["analyzedAt"].is_string());
        assert_eq!(json["report"]["performanceGrade"], "A");
    }
}
