//! Free-form roster text to students.
//!
//! One student per line: `name, gender, level, exchange`. Fields may also
//! be tab separated. Blank lines and `#` comments are ignored, missing or
//! unrecognized codes become unknown, and a repeated name keeps its first
//! entry.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ShuffleResult;
use crate::model::entity::{dedup_students, Exchange, Gender, Level, Student};

pub fn parse_line(line: &str) -> Option<Student> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let separator = if line.contains('\t') { '\t' } else { ',' };
    let mut fields = line.split(separator).map(str::trim);
    let name = fields.next().filter(|name| !name.is_empty())?;
    let gender = Gender::from_code(fields.next().unwrap_or(""));
    let level = Level::from_code(fields.next().unwrap_or(""));
    let exchange = Exchange::from_code(fields.next().unwrap_or(""));
    Some(Student::new(name, gender, level, exchange))
}

pub fn parse_roster(text: &str) -> Vec<Student> {
    let parsed: Vec<Student> = text.lines().filter_map(parse_line).collect();
    let n_parsed = parsed.len();
    let students = dedup_students(parsed);
    if students.len() < n_parsed {
        warn!(
            dropped = n_parsed - students.len(),
            "duplicate names in roster, keeping first occurrence"
        );
    }
    debug!(students = students.len(), "roster parsed");
    students
}

pub fn load_roster<P: AsRef<Path>>(path: P) -> ShuffleResult<Vec<Student>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_roster(&text))
}
