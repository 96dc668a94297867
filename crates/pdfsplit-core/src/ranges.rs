//! Page selection expressions
//!
//! Parses "1,3,5-10" style expressions into zero-based page indices.

use crate::error::SplitError;
use std::collections::BTreeSet;

/// Resolve a page selection expression against a document.
///
/// Tokens are comma-separated; each is a single 1-based page number or an
/// inclusive range like "5-10". The result is zero-based, deduplicated and
/// sorted. An empty or whitespace-only expression selects every page.
pub fn resolve_selection(expression: &str, total_pages: usize) -> Result<Vec<usize>, SplitError> {
    if expression.trim().is_empty() {
        return Ok((0..total_pages).collect());
    }

    let mut pages = BTreeSet::new();

    for token in expression.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(SplitError::MalformedExpression(
                "empty token in page expression".into(),
            ));
        }

        if let Some((start, end)) = token.split_once('-') {
            let start = parse_page_number(start)?;
            let end = parse_page_number(end)?;

            if start > end {
                return Err(SplitError::MalformedExpression(format!(
                    "range start {} is after end {}",
                    start, end
                )));
            }

            check_bounds(start, total_pages)?;
            check_bounds(end, total_pages)?;

            for page in start..=end {
                pages.insert(page as usize - 1);
            }
        } else {
            let page = parse_page_number(token)?;
            check_bounds(page, total_pages)?;
            pages.insert(page as usize - 1);
        }
    }

    Ok(pages.into_iter().collect())
}

fn parse_page_number(token: &str) -> Result<u32, SplitError> {
    token
        .trim()
        .parse()
        .map_err(|_| SplitError::MalformedExpression(format!("not a page number: '{}'", token.trim())))
}

fn check_bounds(page: u32, total_pages: usize) -> Result<(), SplitError> {
    if page == 0 || page as usize > total_pages {
        return Err(SplitError::OutOfRange {
            page,
            page_count: total_pages as u32,
        });
    }
    Ok(())
}
