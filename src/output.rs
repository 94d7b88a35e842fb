//! CLI output formatting for every command.
//!
//! Output lists routes, not files: each line leads with the URL path a
//! visitor would see, with the written file as secondary context after the
//! arrow. Project routes are grouped and indented under their own heading.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 / → index.html (8.4 KB)
//! 002 /about/ → about/index.html (6.1 KB)
//! 003 /projects/ → projects/index.html (5.2 KB)
//!
//! Projects
//!     001 atlas → projects/atlas/index.html (7.9 KB)
//!     002 beacon → projects/beacon/index.html (6.3 KB)
//!
//! Assets: 3 files copied
//! Content: 5 cached, 6 fetched (11 total)
//! Generated 3 pages, 2 project pages in dist
//! ```
//!
//! ## Paths
//!
//! ```text
//! 001 /projects/atlas/
//! 002 /projects/beacon/
//! fallback: false
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{BuildReport, CheckReport, GeneratedPage};
use crate::props::project_href;
use crate::routes::{Route, StaticPaths};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte size with one decimal above 1 KB.
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    match bytes as f64 {
        b if b < KB => format!("{bytes} B"),
        b if b < KB * KB => format!("{:.1} KB", b / KB),
        b => format!("{:.1} MB", b / (KB * KB)),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn page_line(index: usize, label: &str, page: &GeneratedPage) -> String {
    format!(
        "{} {} \u{2192} {} ({})",
        format_index(index),
        label,
        page.file.display(),
        format_size(page.bytes)
    )
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let (projects, pages): (Vec<&GeneratedPage>, Vec<&GeneratedPage>) = report
        .pages
        .iter()
        .partition(|p| matches!(p.route, Route::Project(_)));

    if !pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in pages.iter().enumerate() {
            lines.push(page_line(i + 1, &page.route.url_path(), page));
        }
    }

    if !projects.is_empty() {
        lines.push(String::new());
        lines.push("Projects".to_string());
        for (i, page) in projects.iter().enumerate() {
            let Route::Project(slug) = &page.route else {
                continue;
            };
            lines.push(format!("{}{}", indent(1), page_line(i + 1, slug, page)));
        }
    }

    lines.push(String::new());
    if report.assets_copied > 0 {
        lines.push(format!(
            "Assets: {} copied",
            plural(report.assets_copied, "file", "files")
        ));
    }
    lines.push(format!("Content: {}", report.cache));
    lines.push(format!(
        "Generated {}, {} in {}",
        plural(pages.len(), "page", "pages"),
        plural(projects.len(), "project page", "project pages"),
        report.output_dir.display()
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Paths
// ============================================================================

pub fn format_paths_output(paths: &StaticPaths) -> Vec<String> {
    let mut lines: Vec<String> = paths
        .paths
        .iter()
        .enumerate()
        .map(|(i, params)| format!("{} {}", format_index(i + 1), project_href(&params.project_id)))
        .collect();
    if lines.is_empty() {
        lines.push("No projects".to_string());
    }
    lines.push(format!("fallback: {}", paths.fallback));
    lines
}

pub fn print_paths_output(paths: &StaticPaths) {
    for line in format_paths_output(paths) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .routes
        .iter()
        .enumerate()
        .map(|(i, route)| format!("{} {} ok", format_index(i + 1), route))
        .collect();
    lines.push(format!("Content: {}", report.cache));
    lines.push(format!(
        "All {} assembled",
        plural(report.routes.len(), "route", "routes")
    ));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use crate::routes::ProjectParams;
    use std::path::PathBuf;

    fn page(route: Route, bytes: usize) -> GeneratedPage {
        GeneratedPage {
            file: PathBuf::from(route.output_file()),
            route,
            bytes,
        }
    }

    fn report(assets_copied: usize) -> BuildReport {
        BuildReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                page(Route::Home, 2048),
                page(Route::About, 512),
                page(Route::Project("atlas".into()), 4096),
            ],
            assets_copied,
            cache: CacheStats {
                hits: 2,
                fetches: 3,
                failures: 0,
            },
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    // =========================================================================
    // Build output
    // =========================================================================

    #[test]
    fn build_output_groups_projects() {
        let lines = format_build_output(&report(0));
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 / \u{2192} index.html (2.0 KB)");
        assert_eq!(lines[2], "002 /about/ \u{2192} about/index.html (512 B)");
        assert_eq!(lines[4], "Projects");
        assert_eq!(
            lines[5],
            "    001 atlas \u{2192} projects/atlas/index.html (4.0 KB)"
        );
    }

    #[test]
    fn build_output_summary() {
        let lines = format_build_output(&report(0));
        assert!(!lines.iter().any(|l| l.starts_with("Assets")));
        assert_eq!(
            lines[lines.len() - 2],
            "Content: 2 cached, 3 fetched (5 total)"
        );
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 pages, 1 project page in dist"
        );
    }

    #[test]
    fn build_output_reports_assets() {
        let lines = format_build_output(&report(1));
        assert!(lines.contains(&"Assets: 1 file copied".to_string()));
    }

    // =========================================================================
    // Paths and check output
    // =========================================================================

    #[test]
    fn paths_output_lists_project_urls() {
        let paths = StaticPaths {
            paths: vec![
                ProjectParams {
                    project_id: "atlas".into(),
                },
                ProjectParams {
                    project_id: "beacon".into(),
                },
            ],
            fallback: false,
        };
        assert_eq!(
            format_paths_output(&paths),
            vec!["001 /projects/atlas/", "002 /projects/beacon/", "fallback: false"]
        );
    }

    #[test]
    fn paths_output_empty() {
        let paths = StaticPaths {
            paths: vec![],
            fallback: false,
        };
        assert_eq!(format_paths_output(&paths)[0], "No projects");
    }

    #[test]
    fn check_output_lists_routes() {
        let report = CheckReport {
            routes: vec![Route::Home, Route::Project("atlas".into())],
            cache: CacheStats::default(),
        };
        let lines = format_check_output(&report);
        assert_eq!(lines[0], "001 / ok");
        assert_eq!(lines[1], "002 /projects/atlas/ ok");
        assert_eq!(lines.last().unwrap(), "All 2 routes assembled");
    }
}
