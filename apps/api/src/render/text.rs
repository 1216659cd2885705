//! Flat, line-oriented text rendering of a resume.

use crate::models::Resume;

/// Renders a resume as plain text.
///
/// Sections with no data are omitted entirely, including their headers.
/// Output is deterministic and carries no trailing newline.
pub fn render_plain_text(resume: &Resume) -> String {
    let mut lines: Vec<String> = vec![format!("# {}", resume.display_title())];

    let pi = &resume.personal_info;
    for (label, value) in [
        ("Name", &pi.name),
        ("Email", &pi.email),
        ("Phone", &pi.phone),
        ("Location", &pi.location),
    ] {
        if !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }

    if !pi.summary.is_empty() {
        lines.push(String::new());
        lines.push("Summary:".to_string());
        lines.push(pi.summary.clone());
    }

    if !resume.experience.is_empty() {
        lines.push(String::new());
        lines.push("Experience:".to_string());
        for exp in &resume.experience {
            lines.push(format!(
                "- {} @ {} ({})",
                exp.position, exp.company, exp.duration
            ));
            if !exp.description.is_empty() {
                lines.push(format!("  {}", exp.description));
            }
        }
    }

    if !resume.education.is_empty() {
        lines.push(String::new());
        lines.push("Education:".to_string());
        for ed in &resume.education {
            lines.push(format!("- {} - {} ({})", ed.degree, ed.school, ed.year));
        }
    }

    if !resume.skills.is_empty() {
        lines.push(String::new());
        lines.push(format!("Skills: {}", resume.skills.join(", ")));
    }

    lines.join("\n")
}
