//! Date arithmetic over the applicant's history: overlap detection, total
//! experience, and age.

use chrono::{Datelike, NaiveDate};

use super::experience::Experience;

/// Parses `YYYY-MM-DD`, or `YYYY-MM` as the first of that month.
pub fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
        .ok()
}

/// Inclusive date span covered by an experience entry. Ongoing or open-ended
/// entries run until `today`; unparsable dates yield `None`.
pub fn experience_span(experience: &Experience, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = parse_partial_date(&experience.start_date)?;
    let end = if experience.currently_working {
        today
    } else {
        match experience.end_date.as_deref() {
            Some(raw) => parse_partial_date(raw)?,
            None => today,
        }
    };
    Some((start, end))
}

/// Index pairs `(i, j)` with `i < j` whose spans intersect.
pub fn overlapping_pairs(experiences: &[Experience], today: NaiveDate) -> Vec<(usize, usize)> {
    let spans: Vec<_> = experiences
        .iter()
        .map(|experience| experience_span(experience, today))
        .collect();
    let mut pairs = Vec::new();
    for (i, first) in spans.iter().enumerate() {
        let Some((start1, end1)) = first else {
            continue;
        };
        for (j, second) in spans.iter().enumerate().skip(i + 1) {
            let Some((start2, end2)) = second else {
                continue;
            };
            if start1 <= end2 && start2 <= end1 {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

pub fn has_overlapping_experience(experiences: &[Experience], today: NaiveDate) -> bool {
    !overlapping_pairs(experiences, today).is_empty()
}

/// Whole calendar months between two dates, ignoring the day of month.
fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (i64::from(end.year()) - i64::from(start.year())) * 12 + i64::from(end.month())
        - i64::from(start.month())
}

/// Total experience in years, rounded to the nearest whole year.
pub fn total_experience_years(experiences: &[Experience], today: NaiveDate) -> i64 {
    let total_months: i64 = experiences
        .iter()
        .filter_map(|experience| experience_span(experience, today))
        .map(|(start, end)| months_between(start, end))
        .sum();
    (total_months as f64 / 12.0).round() as i64
}

/// Completed years between `date_of_birth` and `today`.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    let birth = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d").ok()?;
    if birth > today {
        return None;
    }
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}
