//! Printable resume layouts. Pure functions of the profile; HTML escaping is
//! handled by askama.

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::CandidateProfile;

/// Which printable layout to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Modern,
    Classic,
}

#[derive(Template)]
#[template(path = "resume_modern.html")]
struct ModernLayout<'a> {
    profile: &'a CandidateProfile,
    summary: String,
}

#[derive(Template)]
#[template(path = "resume_classic.html")]
struct ClassicLayout<'a> {
    profile: &'a CandidateProfile,
    summary: String,
    skills_line: String,
}

/// Renders `profile` as a standalone HTML document in the chosen layout.
pub fn render_profile(profile: &CandidateProfile, kind: TemplateKind) -> Result<String, AppError> {
    let summary = profile.headline_summary();
    let html = match kind {
        TemplateKind::Modern => ModernLayout { profile, summary }.render()?,
        TemplateKind::Classic => ClassicLayout {
            profile,
            summary,
            skills_line: profile
                .skills
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(" • "),
        }
        .render()?,
    };
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::fixtures::sample_profile;
    use crate::models::profile::Certification;

    #[test]
    fn test_both_layouts_render_core_sections() {
        let profile = sample_profile();
        for kind in [TemplateKind::Modern, TemplateKind::Classic] {
            let html = render_profile(&profile, kind).unwrap();
            assert!(html.contains("Ada Lovelace"), "{kind:?}");
            assert!(html.contains("Analytical Engines Ltd"), "{kind:?}");
            assert!(html.contains("Present"), "{kind:?}");
            assert!(html.contains("Mentored 3 engineers"), "{kind:?}");
            assert!(html.contains("University of London"), "{kind:?}");
            assert!(html.contains("Note G"), "{kind:?}");
        }
    }

    #[test]
    fn test_classic_joins_skills_with_bullets() {
        let html = render_profile(&sample_profile(), TemplateKind::Classic).unwrap();
        assert!(html.contains("Rust • PostgreSQL"));
    }

    #[test]
    fn test_empty_optional_sections_are_omitted() {
        let profile = sample_profile();
        let html = render_profile(&profile, TemplateKind::Classic).unwrap();
        assert!(!html.contains("Certifications"));

        let mut profile = sample_profile();
        profile.certifications.push(Certification {
            name: "CKA".to_string(),
            issuing_organization: "CNCF".to_string(),
            issue_date: "2022".to_string(),
            expiration_date: None,
        });
        let html = render_profile(&profile, TemplateKind::Classic).unwrap();
        assert!(html.contains("Certifications"));
        assert!(html.contains("CNCF"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut profile = sample_profile();
        profile.personal_info.name = "<script>alert(1)</script>".to_string();
        let html = render_profile(&profile, TemplateKind::Modern).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_template_kind_serde() {
        assert_eq!(
            serde_json::from_str::<TemplateKind>(r#""classic""#).unwrap(),
            TemplateKind::Classic
        );
        assert_eq!(TemplateKind::default(), TemplateKind::Modern);
    }
}
