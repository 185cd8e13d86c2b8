//! Review content for the summary step.

use chrono::NaiveDate;

use crate::{
    domain::{timeline, FormData},
    wizard::Step,
};

const NOT_PROVIDED: &str = "Not provided";
const NOT_AVAILABLE: &str = "N/A";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// One titled block of the review, with the step that edits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: String,
    pub edit_step: Step,
    pub entries: Vec<(String, String)>,
    /// Shown instead of entries when there are none.
    pub empty_note: Option<&'static str>,
}

impl SummarySection {
    fn new(title: impl Into<String>, edit_step: Step) -> Self {
        Self {
            title: title.into(),
            edit_step,
            entries: Vec::new(),
            empty_note: None,
        }
    }

    fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSummary {
    pub sections: Vec<SummarySection>,
    pub age: Option<u32>,
    pub total_experience_years: i64,
    /// Index pairs of experiences whose date ranges overlap.
    pub overlapping_experiences: Vec<(usize, usize)>,
}

impl ApplicationSummary {
    pub fn section(&self, edit_step: Step) -> Option<&SummarySection> {
        self.sections
            .iter()
            .find(|section| section.edit_step == edit_step)
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec!["Review your application:".to_string()];
        for section in &self.sections {
            lines.push(format!(
                "{} [edit: step {}]",
                section.title,
                section.edit_step.number()
            ));
            if section.entries.is_empty() {
                if let Some(note) = section.empty_note {
                    lines.push(format!("  {}", note));
                }
            }
            for (label, value) in &section.entries {
                lines.push(format!("  {}: {}", label, value));
            }
        }
        for (first, second) in &self.overlapping_experiences {
            lines.push(format!(
                "Note: experiences {} and {} overlap",
                first + 1,
                second + 1
            ));
        }
        lines
    }
}

pub fn build_summary(data: &FormData, today: NaiveDate, education_applicable: bool) -> ApplicationSummary {
    let age = data
        .personal_info
        .date_of_birth
        .as_deref()
        .and_then(|dob| timeline::age_on(dob, today));
    let total_experience_years = timeline::total_experience_years(&data.experiences, today);

    let mut sections = vec![
        personal_section(data, age),
        experience_section(data, total_experience_years),
    ];
    if education_applicable || !data.education.is_empty() {
        sections.push(education_section(data));
    }
    sections.push(skills_section(data));
    if !data.references.is_empty() {
        sections.push(references_section(data));
    }

    ApplicationSummary {
        sections,
        age,
        total_experience_years,
        overlapping_experiences: timeline::overlapping_pairs(&data.experiences, today),
    }
}

fn personal_section(data: &FormData, age: Option<u32>) -> SummarySection {
    let info = &data.personal_info;
    let mut section = SummarySection::new(Step::PersonalInfo.title(), Step::PersonalInfo);
    section.push("Full Name", or_placeholder(&info.full_name, NOT_PROVIDED));
    section.push("Email", or_placeholder(&info.email, NOT_PROVIDED));
    section.push("Phone Number", or_placeholder(&info.phone_number, NOT_PROVIDED));
    if let Some(age) = age {
        section.push("Age", age.to_string());
    }
    section.push("Gender", info.gender.to_string());
    let location = &info.current_location;
    let location = if location.city.trim().is_empty() || location.country.trim().is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        format!("{}, {}", location.city, location.country)
    };
    section.push("Location", location);
    section.push(
        "Education Level",
        info.education_level
            .map(|level| level.to_string())
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    );
    section
}

fn experience_section(data: &FormData, total_years: i64) -> SummarySection {
    let mut section = SummarySection::new(
        format!("Experience (Total: {} years)", total_years),
        Step::Experience,
    );
    section.empty_note = Some("No experience added");
    for experience in &data.experiences {
        let end = if experience.currently_working {
            "Present"
        } else {
            experience.end_date.as_deref().unwrap_or(NOT_AVAILABLE)
        };
        section.push(
            format!(
                "{} at {}",
                or_placeholder(&experience.job_title, "Untitled"),
                or_placeholder(&experience.company_name, "Unknown Company")
            ),
            format!(
                "{} | {} - {} | {}",
                experience.employment_type,
                or_placeholder(&experience.start_date, NOT_AVAILABLE),
                end,
                or_placeholder(&experience.responsibilities, "No responsibilities provided")
            ),
        );
    }
    section
}

fn education_section(data: &FormData) -> SummarySection {
    let mut section = SummarySection::new(Step::Education.title(), Step::Education);
    section.empty_note = Some("No education added");
    for education in &data.education {
        let mut detail = format!(
            "{} - {}",
            or_placeholder(&education.start_year, NOT_AVAILABLE),
            or_placeholder(&education.end_year, NOT_AVAILABLE)
        );
        if let Some(grade) = &education.grade {
            detail.push_str(&format!(" | Grade: {}", grade));
        }
        if !education.certificates.is_empty() {
            let names: Vec<&str> = education
                .certificates
                .iter()
                .map(|certificate| certificate.name.as_str())
                .collect();
            detail.push_str(&format!(" | Certificates: {}", names.join(", ")));
        }
        section.push(
            format!(
                "{} in {} from {}",
                or_placeholder(&education.degree, "Untitled"),
                or_placeholder(&education.field_of_study, "Unknown Field"),
                or_placeholder(&education.school_name, "Unknown Institution")
            ),
            detail,
        );
    }
    section
}

fn skills_section(data: &FormData) -> SummarySection {
    let mut section = SummarySection::new(
        format!("Skills (Total: {})", data.skills.len()),
        Step::Skills,
    );
    section.empty_note = Some("No skills added");
    for skill in &data.skills {
        let years = match skill.years_of_experience {
            Some(years) if years > 0 => format!("{} yrs", years),
            _ => "-".to_string(),
        };
        section.push(or_placeholder(&skill.name, "Unnamed Skill"), years);
    }
    section
}

fn references_section(data: &FormData) -> SummarySection {
    let mut section = SummarySection::new(Step::References.title(), Step::References);
    for reference in &data.references {
        section.push(
            format!(
                "{}, {} at {}",
                or_placeholder(&reference.name, "Unnamed Reference"),
                or_placeholder(&reference.relationship, NOT_AVAILABLE),
                or_placeholder(&reference.company, "Unknown Company")
            ),
            format!("Contact: {}", or_placeholder(&reference.contact, NOT_PROVIDED)),
        );
    }
    section
}
