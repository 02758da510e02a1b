//! Itinerary feed parsing.
//!
//! The feed is comma-separated text with a header row:
//!
//! ```text
//! line,description,agency,sequence,shape_id,latitude,longitude
//! ```
//!
//! Values may be wrapped in double quotes and rows may end in CRLF. Fields
//! are split naively on commas; quoted commas are not supported.

use crate::domain::{ConsortiumMap, Itinerary, ItinerarySpot};

/// One data row of the feed, split into its seven positional fields.
///
/// Missing trailing fields are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedRow<'a> {
    pub line: &'a str,
    pub description: &'a str,
    pub agency: &'a str,
    pub sequence: &'a str,
    pub shape_id: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
}

impl<'a> FeedRow<'a> {
    pub fn split(record: &'a str) -> Self {
        let mut fields = record.split(',');
        let mut next = || fields.next().unwrap_or("");
        Self {
            line: next(),
            description: next(),
            agency: next(),
            sequence: next(),
            shape_id: next(),
            latitude: next(),
            longitude: next(),
        }
    }

    fn spot(&self) -> ItinerarySpot {
        ItinerarySpot::new(parse_coordinate(self.latitude), parse_coordinate(self.longitude))
    }
}

/// Fields gathered from a feed body.
///
/// Parsing never fails: a body with no data rows leaves `line`, `agency`,
/// `description` and `keywords` unset and `spots` empty. Use
/// [`ParsedFeed::into_itinerary`] to reject such results.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub line: Option<String>,
    pub description: Option<String>,
    pub agency: Option<String>,
    pub keywords: Option<String>,
    pub spots: Vec<ItinerarySpot>,
}

impl ParsedFeed {
    /// Build an unsaved itinerary, or `None` when no usable line was found.
    pub fn into_itinerary(self) -> Option<Itinerary> {
        let line = self.line.filter(|line| !line.is_empty())?;
        Some(Itinerary::new(
            line,
            self.description.unwrap_or_default(),
            self.agency.unwrap_or_default(),
            self.keywords.unwrap_or_default(),
            self.spots,
        ))
    }
}

/// Parse a raw feed body.
///
/// `line` and `agency` keep the first non-empty value seen. `description` is
/// recomputed on every row (everything after the first `-`), so the last row
/// decides it. Each row contributes one spot, in row order.
pub fn parse(raw: &str, consortia: &ConsortiumMap) -> ParsedFeed {
    let body = raw.replace(['\r', '"'], "");

    let mut line: Option<&str> = None;
    let mut agency: Option<&str> = None;
    let mut description: Option<String> = None;
    let mut spots = Vec::new();

    // First record is the header.
    for record in body.split('\n').skip(1) {
        if record.is_empty() {
            continue;
        }
        let row = FeedRow::split(record);

        keep_first_non_empty(&mut line, row.line);
        keep_first_non_empty(&mut agency, row.agency);
        description = Some(strip_description_prefix(row.description));
        spots.push(row.spot());
    }

    let keywords = line.map(|line| {
        build_keywords(
            line,
            agency.unwrap_or_default(),
            consortia.classify(line),
            description.as_deref().unwrap_or_default(),
        )
    });

    ParsedFeed {
        line: line.map(str::to_owned),
        description,
        agency: agency.map(str::to_owned),
        keywords,
        spots,
    }
}

fn keep_first_non_empty<'a>(slot: &mut Option<&'a str>, value: &'a str) {
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value);
    }
}

/// Drop the leading `-`-separated segment of a description.
///
/// `"107-Downtown - Uptown"` becomes `"Downtown - Uptown"`; a description
/// with no `-` becomes empty.
fn strip_description_prefix(description: &str) -> String {
    description
        .split('-')
        .skip(1)
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive the space-delimited keyword string for an itinerary.
///
/// Line, agency, consortium and each `" X "`-separated part of the
/// description are comma-joined; then parentheses become spaces, the first
/// `-` becomes a space, whitespace runs collapse, the ends are trimmed and
/// finally commas become spaces. Commas are replaced after collapsing, so
/// empty parts leave runs of spaces behind.
pub fn build_keywords(line: &str, agency: &str, consortium: &str, description: &str) -> String {
    let joined = [line, agency, consortium]
        .into_iter()
        .chain(description.split(" X "))
        .collect::<Vec<_>>()
        .join(",");

    let unbracketed = joined.replace(['(', ')'], " ");
    let dashed = unbracketed.replacen('-', " ", 1);
    let collapsed = dashed.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(',', " ")
}

/// Lenient float parsing: surrounding whitespace is ignored and anything
/// unparseable becomes NaN.
fn parse_coordinate(value: &str) -> f64 {
    value.trim().parse().unwrap_or(f64::NAN)
}
