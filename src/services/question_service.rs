use crate::models::profile::CandidateProfile;
use crate::models::question::{Difficulty, Question, QuestionType};

/// Builds the interview question pool from an extracted profile and a job
/// role. The pool is the concatenation of four fixed sub-pools, in order:
/// technical (6), HR (5), aptitude (5), scenario (4), truncated to `count`.
/// Generation is fully deterministic.
pub struct QuestionService;

pub const TECHNICAL_POOL_SIZE: usize = 6;
pub const HR_POOL_SIZE: usize = 5;
pub const APTITUDE_POOL_SIZE: usize = 5;
pub const SCENARIO_POOL_SIZE: usize = 4;

impl QuestionService {
    pub fn generate(profile: &CandidateProfile, job_role: &str, count: usize) -> Vec<Question> {
        let mut questions = Vec::with_capacity(
            TECHNICAL_POOL_SIZE + HR_POOL_SIZE + APTITUDE_POOL_SIZE + SCENARIO_POOL_SIZE,
        );
        questions.extend(Self::technical_pool(profile, job_role));
        questions.extend(Self::hr_pool(profile, job_role));
        questions.extend(Self::aptitude_pool());
        questions.extend(Self::scenario_pool(job_role));
        // Straight truncation for count < 20; the distribution is not
        // renormalized across sub-pools.
        questions.truncate(count);
        questions
    }

    fn technical_pool(profile: &CandidateProfile, job_role: &str) -> Vec<Question> {
        if profile.skills.is_empty() {
            return Self::technical_fallback_pool(job_role);
        }

        (0..TECHNICAL_POOL_SIZE)
            .map(|i| {
                let skill = &profile.skills[i % profile.skills.len()];
                let keywords = Self::keywords_for_skill(skill);
                let (text, difficulty, follow_up) = match i {
                    0 => (
                        format!(
                            "Explain your experience with {}. What kind of projects have you used it in?",
                            skill
                        ),
                        Difficulty::Easy,
                        "Can you walk me through one of those projects in more detail?",
                    ),
                    1 => (
                        format!("What do you consider the main strengths and weaknesses of {}?", skill),
                        Difficulty::Medium,
                        "When would you choose a different tool instead?",
                    ),
                    2 => (
                        format!("Describe the most challenging problem you have solved using {}.", skill),
                        Difficulty::Medium,
                        "What would you do differently if you faced it again?",
                    ),
                    3 => (
                        format!(
                            "How do you keep your {} knowledge up to date, and what recent feature or practice have you adopted?",
                            skill
                        ),
                        Difficulty::Easy,
                        "How did that change the way you work day to day?",
                    ),
                    4 => (
                        format!("How would you debug a performance issue in a {} application?", skill),
                        Difficulty::Hard,
                        "Which measurements would you collect first?",
                    ),
                    _ => (
                        format!(
                            "How would you design a scalable backend system for a {} team that relies heavily on {}?",
                            job_role, skill
                        ),
                        Difficulty::Hard,
                        "Where do you expect the first bottleneck to appear?",
                    ),
                };
                Question {
                    question_type: QuestionType::Technical,
                    difficulty,
                    text,
                    expected_keywords: keywords,
                    follow_up: follow_up.to_string(),
                }
            })
            .collect()
    }

    /// Role-centric questions used when no skills could be extracted.
    fn technical_fallback_pool(job_role: &str) -> Vec<Question> {
        let generic = Self::generic_keywords();
        let design_keywords: Vec<String> = ["scalability", "load", "cache", "database", "queue", "monitoring"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let entries: [(String, Difficulty, &str, Vec<String>); TECHNICAL_POOL_SIZE] = [
            (
                format!("What technical skills do you consider essential for a {} role?", job_role),
                Difficulty::Easy,
                "Which of those are you strongest in?",
                generic.clone(),
            ),
            (
                format!("Describe the development workflow you would set up for a {} team.", job_role),
                Difficulty::Medium,
                "How would you enforce code quality in that workflow?",
                generic.clone(),
            ),
            (
                format!("Walk me through how you would approach a brand-new {} task you have never seen before.", job_role),
                Difficulty::Medium,
                "What do you do when documentation is missing?",
                generic.clone(),
            ),
            (
                format!("How do you evaluate whether a new technology is worth adopting for {} work?", job_role),
                Difficulty::Medium,
                "Tell me about a technology you decided against.",
                generic.clone(),
            ),
            (
                format!("How would you design a scalable system supporting a typical {} workload?", job_role),
                Difficulty::Hard,
                "Where do you expect the first bottleneck to appear?",
                design_keywords.clone(),
            ),
            (
                format!("How would you make that {} system resilient to partial failures?", job_role),
                Difficulty::Hard,
                "How would you test the failure paths?",
                design_keywords,
            ),
        ];
        entries
            .into_iter()
            .map(|(text, difficulty, follow_up, expected_keywords)| Question {
                question_type: QuestionType::Technical,
                difficulty,
                text,
                expected_keywords,
                follow_up: follow_up.to_string(),
            })
            .collect()
    }

    fn hr_pool(profile: &CandidateProfile, job_role: &str) -> Vec<Question> {
        let years = profile.total_experience_years();
        let entries: [(String, &[&str], &str); HR_POOL_SIZE] = [
            (
                format!("Tell me about yourself and why you applied for the {} position.", job_role),
                &["experience", "skills", "background", "motivated", "passion"],
                "What attracted you to this company specifically?",
            ),
            (
                format!(
                    "With {} years of experience behind you, what do you consider your biggest professional achievement?",
                    years
                ),
                &["achievement", "result", "team", "impact", "delivered"],
                "What was your personal contribution to that result?",
            ),
            (
                "Describe a conflict you had with a colleague and how you resolved it.".to_string(),
                &["listen", "communicate", "understand", "compromise", "resolve"],
                "What did you learn from that situation?",
            ),
            (
                "Where do you see yourself professionally in five years?".to_string(),
                &["growth", "learn", "lead", "career", "goals"],
                "What is the first step you are taking towards that?",
            ),
            (
                format!("Why should we hire you for the {} role over other candidates?", job_role),
                &["fit", "value", "skills", "contribute", "experience"],
                "What would you want to achieve in your first three months?",
            ),
        ];
        entries
            .into_iter()
            .map(|(text, keywords, follow_up)| Question {
                question_type: QuestionType::Hr,
                difficulty: Difficulty::Medium,
                text,
                expected_keywords: keywords.iter().map(|s| s.to_string()).collect(),
                follow_up: follow_up.to_string(),
            })
            .collect()
    }

    /// Fixed puzzles with canonical keyword answers; intentionally not
    /// personalized by profile or role.
    fn aptitude_pool() -> Vec<Question> {
        let entries: [(&str, Difficulty, &[&str]); APTITUDE_POOL_SIZE] = [
            (
                "A bat and a ball cost 110 in total. The bat costs 100 more than the ball. How much does the ball cost?",
                Difficulty::Medium,
                &["5", "five"],
            ),
            (
                "If 5 machines take 5 minutes to make 5 widgets, how long would 100 machines take to make 100 widgets?",
                Difficulty::Medium,
                &["5", "five"],
            ),
            (
                "What is the next number in the sequence 2, 6, 12, 20, 30?",
                Difficulty::Easy,
                &["42"],
            ),
            (
                "A train covers 60 km in 45 minutes. What is its average speed in km/h?",
                Difficulty::Easy,
                &["80"],
            ),
            (
                "If all Bloops are Razzies and all Razzies are Lazzies, are all Bloops definitely Lazzies?",
                Difficulty::Easy,
                &["yes", "transitive"],
            ),
        ];
        entries
            .into_iter()
            .map(|(text, difficulty, keywords)| Question {
                question_type: QuestionType::Aptitude,
                difficulty,
                text: text.to_string(),
                expected_keywords: keywords.iter().map(|s| s.to_string()).collect(),
                follow_up: "How did you arrive at that answer?".to_string(),
            })
            .collect()
    }

    fn scenario_pool(job_role: &str) -> Vec<Question> {
        let entries: [(String, &[&str], &str); SCENARIO_POOL_SIZE] = [
            (
                format!(
                    "You are working as a {} and a production incident appears an hour before a release deadline. What do you do?",
                    job_role
                ),
                &["prioritize", "communicate", "rollback", "root cause", "stakeholders"],
                "Who do you inform first, and when?",
            ),
            (
                format!("A teammate on your {} team consistently misses deadlines. How do you handle it?", job_role),
                &["talk", "understand", "support", "feedback", "escalate"],
                "At what point would you involve your manager?",
            ),
            (
                format!(
                    "You strongly disagree with your manager about a technical decision on a {} project. What do you do?",
                    job_role
                ),
                &["data", "discuss", "respect", "trade-off", "commit"],
                "What if the decision still goes against you?",
            ),
            (
                format!(
                    "You receive vague requirements for a critical {} task that is due tomorrow. How do you proceed?",
                    job_role
                ),
                &["clarify", "questions", "assumptions", "scope", "communicate"],
                "How do you document the assumptions you made?",
            ),
        ];
        entries
            .into_iter()
            .map(|(text, keywords, follow_up)| Question {
                question_type: QuestionType::Scenario,
                difficulty: Difficulty::Medium,
                text,
                expected_keywords: keywords.iter().map(|s| s.to_string()).collect(),
                follow_up: follow_up.to_string(),
            })
            .collect()
    }

    fn keywords_for_skill(skill: &str) -> Vec<String> {
        let words: &[&str] = match skill {
            "python" => &["django", "flask", "pandas", "numpy", "decorators", "generators"],
            "react" => &["hooks", "components", "state", "props", "jsx", "virtual dom"],
            s if matches!(s, "database" | "sql" | "mysql" | "postgresql" | "mongodb") => {
                &["index", "query", "join", "transaction", "normalization", "performance"]
            }
            _ => return Self::generic_keywords(),
        };
        words.iter().map(|s| s.to_string()).collect()
    }

    fn generic_keywords() -> Vec<String> {
        ["experience", "project", "implement", "design", "problem", "solution"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
