use regex::Regex;

use crate::models::profile::{
    CandidateProfile, CertificateEntry, EducationEntry, ExperienceEntry, ProjectEntry,
};

const MAX_SKILLS: usize = 20;
const MAX_EXPERIENCE: usize = 10;
const MAX_EDUCATION: usize = 5;
const MAX_PROJECTS: usize = 8;
const MAX_CERTIFICATES: usize = 10;

/// Best-effort regex extraction of a structured profile from raw resume
/// text. Every field family is independent: a family that finds nothing
/// yields an empty list, and blank input yields a fixed default profile so
/// the generation pipeline is never blocked.
#[derive(Clone)]
pub struct ResumeService {
    skill_patterns: Vec<Regex>,
    experience_re: Regex,
    education_re: Regex,
    project_re: Regex,
    certificate_re: Regex,
}

impl ResumeService {
    pub fn new() -> Self {
        let skill_patterns = [
            // Languages
            r"\b(?:python|javascript|typescript|java|golang|rust|ruby|php|swift|kotlin|scala|perl)\b|c\+\+|c#",
            // Frameworks
            r"\b(?:react|angular|vue|django|flask|spring|laravel|rails|express|fastapi|next\.js|node\.js|nodejs)\b",
            // Databases
            r"\b(?:mysql|postgresql|postgres|mongodb|sqlite|redis|oracle|cassandra|elasticsearch|dynamodb|sql server|sql|database)\b",
            // Tools & platforms
            r"\b(?:docker|kubernetes|jenkins|terraform|ansible|git|aws|azure|gcp|linux|nginx|kafka|rabbitmq|graphql)\b",
            // Data & analytics
            r"\b(?:machine learning|deep learning|data analysis|data science|pandas|numpy|tensorflow|pytorch|scikit-learn|tableau|power bi|statistics)\b",
            // Other tech
            r"\b(?:rest api|microservices|ci/cd|agile|scrum|unit testing|testing|debugging|html|css|sass|webpack|selenium)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid skill pattern"))
        .collect();

        let experience_re = Regex::new(
            r"(senior |junior |lead |principal |staff )?(software engineer|software developer|web developer|developer|engineer|programmer|data analyst|analyst|consultant|project manager|manager|architect|designer|intern)\s*(?:at|@|,)\s+([a-z][a-z0-9&.\- ]{1,40}?)(?:\s+for\s+(\d{1,2})\s+years?|\s*\((\d{4})\s*(?:[-–]|to)\s*(\d{4})\))?(?:[\n.,;]|$)",
        )
        .expect("invalid experience pattern");

        let education_re = Regex::new(
            r"\b(bachelor's|bachelors|bachelor|master's|masters|master|b\.?tech|m\.?tech|b\.?sc|m\.?sc|b\.e|m\.e|bca|mca|mba|ph\.?d|phd|diploma)\s+(?:in|of)\s+([a-z][a-z &]{1,40}?)\s+from\s+([a-z][a-z0-9.&\- ]{1,60}?)(?:[\n.,;(]|$)",
        )
        .expect("invalid education pattern");

        let project_re = Regex::new(
            r"(?:project|built|developed|created|worked on)\s*:?\s*([a-z0-9][^\n:–—-]{2,60}?)\s*(?:[:–—-]|\n)\s*([^\n]{0,150})",
        )
        .expect("invalid project pattern");

        let certificate_re = Regex::new(
            r"(?:certification|certificate|certified|awarded|completed)\s*(?:in|:)?\s+([a-z0-9][a-z0-9 .+#/\-]{2,60}?)(?:\s+(?:from|by|issued by)\s+([a-z0-9][a-z0-9 .\-]{1,40}?))?(?:[\n.,;(]|$)",
        )
        .expect("invalid certificate pattern");

        Self {
            skill_patterns,
            experience_re,
            education_re,
            project_re,
            certificate_re,
        }
    }

    pub fn extract_profile(&self, resume_text: &str) -> CandidateProfile {
        if resume_text.trim().is_empty() {
            return Self::default_profile();
        }
        let text = resume_text.to_lowercase();

        CandidateProfile {
            skills: self.extract_skills(&text),
            experience: self.extract_experience(&text),
            education: self.extract_education(&text),
            projects: self.extract_projects(&text),
            certificates: self.extract_certificates(&text),
        }
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();
        for pattern in &self.skill_patterns {
            for m in pattern.find_iter(text) {
                let skill = m.as_str().to_string();
                if !skills.contains(&skill) {
                    skills.push(skill);
                }
            }
        }
        skills.truncate(MAX_SKILLS);
        skills
    }

    fn extract_experience(&self, text: &str) -> Vec<ExperienceEntry> {
        let mut entries = Vec::new();
        for caps in self.experience_re.captures_iter(text) {
            let seniority = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            let title = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let position = if seniority.is_empty() {
                title.to_string()
            } else {
                format!("{} {}", seniority, title)
            };
            let company = caps
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();

            let years = if let Some(n) = caps.get(4) {
                n.as_str().parse::<i64>().unwrap_or(1)
            } else if let (Some(from), Some(to)) = (caps.get(5), caps.get(6)) {
                let from: i64 = from.as_str().parse().unwrap_or(0);
                let to: i64 = to.as_str().parse().unwrap_or(0);
                (to - from).max(0)
            } else {
                // A held position counts for at least a year.
                1
            };

            entries.push(ExperienceEntry {
                position,
                company,
                years,
            });
            if entries.len() >= MAX_EXPERIENCE {
                break;
            }
        }
        entries
    }

    fn extract_education(&self, text: &str) -> Vec<EducationEntry> {
        self.education_re
            .captures_iter(text)
            .take(MAX_EDUCATION)
            .map(|caps| EducationEntry {
                degree: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
                field: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                university: caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn extract_projects(&self, text: &str) -> Vec<ProjectEntry> {
        self.project_re
            .captures_iter(text)
            .take(MAX_PROJECTS)
            .map(|caps| ProjectEntry {
                title: caps
                    .get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                description: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn extract_certificates(&self, text: &str) -> Vec<CertificateEntry> {
        self.certificate_re
            .captures_iter(text)
            .take(MAX_CERTIFICATES)
            .map(|caps| CertificateEntry {
                name: caps
                    .get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                issuer: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Fallback used for blank or unreadable resume text.
    fn default_profile() -> CandidateProfile {
        CandidateProfile {
            skills: [
                "communication",
                "teamwork",
                "problem solving",
                "adaptability",
                "time management",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            experience: vec![ExperienceEntry {
                position: "associate".to_string(),
                company: "previous organization".to_string(),
                years: 1,
            }],
            education: vec![EducationEntry {
                degree: "bachelor's".to_string(),
                field: "general studies".to_string(),
                university: "state university".to_string(),
            }],
            projects: vec![ProjectEntry {
                title: "personal portfolio".to_string(),
                description: "a self-directed project demonstrating core skills".to_string(),
            }],
            certificates: vec![CertificateEntry {
                name: "workplace essentials".to_string(),
                issuer: "online academy".to_string(),
            }],
        }
    }
}

impl Default for ResumeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Senior Developer at Acme Corp (2018 - 2022)\n\
        Skills: Python, React, Docker, MySQL, python\n\
        B.Sc in computer science from state university\n\
        Project: resume screener - a tool that ranks resumes\n\
        Certified aws solutions architect from amazon\n";

    #[test]
    fn blank_text_yields_default_profile() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile("   \n  ");
        assert_eq!(profile.skills.len(), 5);
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.projects.len(), 1);
        assert_eq!(profile.certificates.len(), 1);
    }

    #[test]
    fn skills_are_deduplicated_and_case_insensitive() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile(SAMPLE);
        assert_eq!(
            profile.skills,
            vec!["python", "react", "mysql", "docker", "aws"]
        );
    }

    #[test]
    fn experience_years_come_from_date_range() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile(SAMPLE);
        assert_eq!(profile.experience.len(), 1);
        let exp = &profile.experience[0];
        assert_eq!(exp.position, "senior developer");
        assert_eq!(exp.company, "acme corp");
        assert_eq!(exp.years, 4);
    }

    #[test]
    fn experience_years_come_from_for_clause() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile("engineer at globex for 6 years\n");
        assert_eq!(profile.experience[0].years, 6);
        assert_eq!(profile.experience[0].company, "globex");
    }

    #[test]
    fn education_needs_field_and_university() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile(SAMPLE);
        assert_eq!(profile.education.len(), 1);
        let edu = &profile.education[0];
        assert_eq!(edu.degree, "b.sc");
        assert_eq!(edu.field, "computer science");
        assert_eq!(edu.university, "state university");
    }

    #[test]
    fn projects_split_title_and_description() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile(SAMPLE);
        assert!(profile
            .projects
            .iter()
            .any(|p| p.title.contains("resume screener") && p.description.contains("ranks resumes")));
    }

    #[test]
    fn certificates_capture_name_and_issuer() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile(SAMPLE);
        assert!(profile
            .certificates
            .iter()
            .any(|c| c.name.contains("aws solutions architect") && c.issuer == "amazon"));
    }

    #[test]
    fn families_default_to_empty_independently() {
        let svc = ResumeService::new();
        let profile = svc.extract_profile("just a note about gardening and cooking");
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.certificates.is_empty());
    }
}
