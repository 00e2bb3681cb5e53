//! Candidate profile: the durable input of every generation contract.
//!
//! Wire field names are camelCase (`personalInfo`, `graduationDate`, ...).
//! Optional fields are omitted when absent.

use std::collections::HashSet;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const FALLBACK_SUMMARY: &str =
    "A highly motivated and skilled professional seeking a challenging role.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub major: String,
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub title: String,
    pub start_date: String,
    /// `None` means the position is current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Everything the user has entered about themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_job_roles: Option<String>,
}

impl Experience {
    pub fn end_date_or_present(&self) -> &str {
        self.end_date.as_deref().unwrap_or("Present")
    }

    /// Description split into bullet lines: blank lines dropped, leading "- " removed.
    pub fn bullet_lines(&self) -> Vec<&str> {
        self.description
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.strip_prefix("- ").unwrap_or(line))
            .collect()
    }
}

impl CandidateProfile {
    /// Checks every required field and returns all problems in a single error.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        let info = &self.personal_info;
        require(&mut problems, &info.name, "Full name is required.");
        if !is_valid_email(&info.email) {
            problems.push("Invalid email address.".to_string());
        }
        require(&mut problems, &info.phone, "Phone number is required.");
        require(&mut problems, &info.location, "Location is required.");
        check_url(&mut problems, info.linkedin.as_deref(), "LinkedIn");
        check_url(&mut problems, info.github.as_deref(), "GitHub");

        for (i, edu) in self.education.iter().enumerate() {
            let at = format!("Education #{}:", i + 1);
            let p = &mut problems;
            require(p, &edu.institution, &format!("{at} institution name is required."));
            require(p, &edu.degree, &format!("{at} degree is required."));
            require(p, &edu.major, &format!("{at} major is required."));
            require(p, &edu.graduation_date, &format!("{at} graduation date is required."));
        }

        for (i, exp) in self.experience.iter().enumerate() {
            let at = format!("Experience #{}:", i + 1);
            let p = &mut problems;
            require(p, &exp.company, &format!("{at} company name is required."));
            require(p, &exp.title, &format!("{at} job title is required."));
            require(p, &exp.start_date, &format!("{at} start date is required."));
            require(p, &exp.description, &format!("{at} description is required."));
        }

        let mut seen = HashSet::new();
        for skill in &self.skills {
            let name = skill.name.trim();
            if name.is_empty() {
                problems.push("Skill name is required.".to_string());
            } else if !seen.insert(name.to_lowercase()) {
                problems.push(format!("Skill '{name}' is listed more than once."));
            }
        }

        for (i, cert) in self.certifications.iter().enumerate() {
            let at = format!("Certification #{}:", i + 1);
            let p = &mut problems;
            require(p, &cert.name, &format!("{at} name is required."));
            let issuer = format!("{at} issuing organization is required.");
            require(p, &cert.issuing_organization, &issuer);
            require(p, &cert.issue_date, &format!("{at} issue date is required."));
        }

        for (i, project) in self.projects.iter().enumerate() {
            let n = i + 1;
            let p = &mut problems;
            require(p, &project.name, &format!("Project #{n}: name is required."));
            require(p, &project.description, &format!("Project #{n}: description is required."));
            check_url(p, project.link.as_deref(), &format!("Project #{n} link"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join(" ")))
        }
    }

    /// Collapses empty optional strings to `None`, the way form inputs arrive.
    pub fn normalized(mut self) -> Self {
        let info = &mut self.personal_info;
        info.linkedin = non_blank(info.linkedin.take());
        info.github = non_blank(info.github.take());
        for edu in &mut self.education {
            edu.description = non_blank(edu.description.take());
        }
        for exp in &mut self.experience {
            exp.end_date = non_blank(exp.end_date.take());
        }
        for cert in &mut self.certifications {
            cert.expiration_date = non_blank(cert.expiration_date.take());
        }
        for project in &mut self.projects {
            project.link = non_blank(project.link.take());
        }
        self.desired_job_roles = non_blank(self.desired_job_roles.take());
        self
    }

    /// Desired roles, if the user wrote any.
    pub fn desired_roles(&self) -> Option<&str> {
        self.desired_job_roles
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// One-line summary for printed layouts: the first sentence of the most
    /// recent experience description.
    pub fn headline_summary(&self) -> String {
        self.experience
            .first()
            .and_then(|exp| {
                exp.description
                    .split(['.', '\n'])
                    .map(str::trim)
                    .find(|s| !s.is_empty())
            })
            .map(|s| s.strip_prefix("- ").unwrap_or(s).to_string())
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string())
    }
}

fn require(problems: &mut Vec<String>, value: &str, message: &str) {
    if value.trim().is_empty() {
        problems.push(message.to_string());
    }
}

fn check_url(problems: &mut Vec<String>, value: Option<&str>, label: &str) {
    if let Some(url) = value.map(str::trim).filter(|s| !s.is_empty()) {
        if !is_web_url(url) {
            problems.push(format!("{label} must be a valid URL."));
        }
    }
}

/// An absolute `http`/`https` URL with a host.
fn is_web_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
