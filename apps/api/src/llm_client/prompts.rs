// Shared prompt constants and profile formatting.
// Each contract module defines its own prompt templates alongside it;
// this file holds the cross-cutting fragments.

use crate::models::profile::CandidateProfile;

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a contract system prompt: persona first, then the JSON-only rules.
pub fn system_prompt(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}

/// Substitutes `{name}` placeholders in one pass. Inserted values are never
/// rescanned, so user text containing `{profile}` and the like stays literal.
/// Braces that do not name a known placeholder are kept as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

const NOT_PROVIDED: &str = "N/A";

pub fn format_personal_info(profile: &CandidateProfile) -> String {
    let info = &profile.personal_info;
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nLinkedIn: {}\nGitHub: {}\nLocation: {}",
        info.name,
        info.email,
        info.phone,
        info.linkedin.as_deref().unwrap_or(NOT_PROVIDED),
        info.github.as_deref().unwrap_or(NOT_PROVIDED),
        info.location,
    )
}

pub fn format_education(profile: &CandidateProfile) -> String {
    if profile.education.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    profile
        .education
        .iter()
        .map(|edu| {
            let mut line = format!(
                "- {} in {} from {} (Graduated: {})",
                edu.degree, edu.major, edu.institution, edu.graduation_date
            );
            if let Some(description) = &edu.description {
                line.push_str(&format!("\n  {description}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_experience(profile: &CandidateProfile) -> String {
    if profile.experience.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    profile
        .experience
        .iter()
        .map(|exp| {
            format!(
                "- {} at {} ({} - {})\n  {}",
                exp.title,
                exp.company,
                exp.start_date,
                exp.end_date_or_present(),
                exp.description.trim().replace('\n', "\n  ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_skills(profile: &CandidateProfile) -> String {
    if profile.skills.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    profile
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_certifications(profile: &CandidateProfile) -> String {
    if profile.certifications.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    profile
        .certifications
        .iter()
        .map(|cert| {
            format!(
                "- {} from {} (Issued: {}, Expires: {})",
                cert.name,
                cert.issuing_organization,
                cert.issue_date,
                cert.expiration_date.as_deref().unwrap_or(NOT_PROVIDED)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_projects(profile: &CandidateProfile) -> String {
    if profile.projects.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    profile
        .projects
        .iter()
        .map(|p| match &p.link {
            Some(link) => format!("- {}: {} ({link})", p.name, p.description),
            None => format!("- {}: {}", p.name, p.description),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full profile block used by contracts that look at the whole resume.
pub fn format_profile(profile: &CandidateProfile) -> String {
    format!(
        "PERSONAL INFORMATION:\n{}\n\nEXPERIENCE:\n{}\n\nEDUCATION:\n{}\n\nSKILLS:\n{}\n\nCERTIFICATIONS:\n{}\n\nPROJECTS:\n{}",
        format_personal_info(profile),
        format_experience(profile),
        format_education(profile),
        format_skills(profile),
        format_certifications(profile),
        format_projects(profile),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::fixtures::sample_profile;

    #[test]
    fn test_missing_links_render_as_na() {
        let text = format_personal_info(&sample_profile());
        assert!(text.contains("LinkedIn: https://linkedin.com/in/ada"));
        assert!(text.contains("GitHub: N/A"));
    }

    #[test]
    fn test_current_role_renders_present() {
        let text = format_experience(&sample_profile());
        assert!(text.contains("Backend Engineer at Analytical Engines Ltd (2019-03 - Present)"));
    }

    #[test]
    fn test_empty_sections_render_as_na() {
        let profile = sample_profile();
        assert_eq!(format_certifications(&profile), "N/A");
        assert_eq!(format_skills(&profile), "Rust, PostgreSQL");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let prompt = fill_template(
            "JOB TITLE: {job_title}\nANSWER: {answer}",
            &[("job_title", "Engineer {answer}"), ("answer", "SECRET")],
        );
        assert_eq!(prompt, "JOB TITLE: Engineer {answer}\nANSWER: SECRET");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let prompt = fill_template(r#"Return {"score": n} for {name}."#, &[("name", "Ada")]);
        assert_eq!(prompt, r#"Return {"score": n} for Ada."#);
    }

    #[test]
    fn test_system_prompt_appends_json_rules() {
        let system = system_prompt("You are a coach.");
        assert!(system.starts_with("You are a coach."));
        assert!(system.ends_with(JSON_ONLY_SYSTEM));
    }
}
