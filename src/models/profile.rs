use serde::{Deserialize, Serialize};

/// Structured view of a resume, produced once per resume text.
/// Generation input only; never persisted (only the raw file is stored).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certificates: Vec<CertificateEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub years: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub university: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateEntry {
    pub name: String,
    pub issuer: String,
}

impl CandidateProfile {
    pub fn total_experience_years(&self) -> i64 {
        self.experience.iter().map(|e| e.years).sum()
    }
}
