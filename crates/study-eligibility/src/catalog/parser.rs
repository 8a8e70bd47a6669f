use super::criteria::{
    StudyLevel, Tier, UniversityCriteria, DEFAULT_MAX_GAP, DEFAULT_MIN_DUOLINGO,
    DEFAULT_MIN_IELTS, DEFAULT_MIN_PERCENTAGE, DEFAULT_MIN_PTE,
};
use super::fields;
use tracing::{debug, warn};

/// Positional layout of the published sheet. The header row is skipped, not read.
const NAME: usize = 0;
const STUDY_LEVEL: usize = 1;
const MIN_PERCENTAGE: usize = 2;
const MIN_IELTS: usize = 3;
const MIN_PTE: usize = 4;
const MIN_DUOLINGO: usize = 5;
const WAIVER: usize = 6;
const MAX_GAP: usize = 7;
const TIER: usize = 8;

/// Parses the sheet body into criteria rows, in sheet order.
///
/// Never fails: unnamed rows are dropped, malformed cells take their defaults,
/// and rows the CSV reader cannot decode are skipped with a warning. Each line
/// is decoded on its own, so an unbalanced quote only affects its own row.
pub(crate) fn parse_catalog(text: &str) -> Vec<UniversityCriteria> {
    let mut universities = Vec::new();

    for (index, row) in text.lines().enumerate().skip(1) {
        // 1-based, counting the header.
        let line = index + 1;
        if row.trim().is_empty() {
            continue;
        }

        let cells = match decode_row(row) {
            Ok(cells) => cells,
            Err(err) => {
                warn!(line, error = %err, "skipping unreadable catalog row");
                continue;
            }
        };

        match criteria_from_cells(&Cells(&cells), line) {
            Some(criteria) => universities.push(criteria),
            None => warn!(line, "skipping catalog row without a university name"),
        }
    }

    universities
}

/// Splits one sheet line into trimmed cells, honouring quoted commas.
fn decode_row(row: &str) -> Result<Vec<String>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(row.as_bytes());

    let mut record = csv::ByteRecord::new();
    csv_reader.read_byte_record(&mut record)?;

    Ok(record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).trim().to_string())
        .collect())
}

struct Cells<'a>(&'a [String]);

impl Cells<'_> {
    /// Missing and blank cells are both `None`.
    fn get(&self, index: usize) -> Option<&str> {
        self.0
            .get(index)
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    fn number(&self, index: usize, column: &'static str, default: f64, line: usize) -> f64 {
        let cell = self.get(index);
        if let Some(raw) = cell {
            if fields::leading_number(raw).is_none() {
                debug!(line, column, raw, default, "defaulting unparsable catalog cell");
            }
        }
        fields::number_or(cell, default)
    }

    fn integer(&self, index: usize, column: &'static str, default: i64, line: usize) -> i64 {
        let cell = self.get(index);
        if let Some(raw) = cell {
            if fields::leading_integer(raw).is_none() {
                debug!(line, column, raw, default, "defaulting unparsable catalog cell");
            }
        }
        fields::integer_or(cell, default)
    }
}

fn criteria_from_cells(cells: &Cells<'_>, line: usize) -> Option<UniversityCriteria> {
    let name = cells.get(NAME)?.to_string();

    Some(UniversityCriteria {
        name,
        study_level: StudyLevel::from_label(cells.get(STUDY_LEVEL).unwrap_or_default()),
        min_percentage: cells.number(
            MIN_PERCENTAGE,
            "min_percentage",
            DEFAULT_MIN_PERCENTAGE,
            line,
        ),
        min_ielts: cells.number(MIN_IELTS, "min_ielts", DEFAULT_MIN_IELTS, line),
        min_pte: cells.number(MIN_PTE, "min_pte", DEFAULT_MIN_PTE, line),
        min_duolingo: cells.number(MIN_DUOLINGO, "min_duolingo", DEFAULT_MIN_DUOLINGO, line),
        waiver_accepted: fields::flag(cells.get(WAIVER)),
        max_gap: cells.integer(MAX_GAP, "max_gap", DEFAULT_MAX_GAP, line),
        tier: Tier::from_label(cells.get(TIER).unwrap_or_default()),
    })
}
