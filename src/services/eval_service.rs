use crate::models::question::QuestionType;
use crate::models::session::{AnswerQuality, EvaluationResult};

/// Keyword-based scorer for free-text answers.
///
/// The score is a five-tier bucket over the share of expected keywords
/// found in the answer, with short-answer penalties applied afterwards.
pub struct EvalService;

impl EvalService {
    pub fn evaluate_answer(
        answer: &str,
        expected_keywords: &[String],
        question_type: QuestionType,
    ) -> EvaluationResult {
        if answer.trim().is_empty() {
            return EvaluationResult {
                score: 0,
                feedback: "No answer was provided for this question.".to_string(),
                matched_keywords: Vec::new(),
                answer_quality: AnswerQuality::Brief,
            };
        }

        let answer_lower = answer.to_lowercase();
        let matched_keywords: Vec<String> = expected_keywords
            .iter()
            .filter(|k| answer_lower.contains(&k.to_lowercase()))
            .cloned()
            .collect();

        // An empty keyword list would make the ratio undefined.
        let match_percentage = if expected_keywords.is_empty() {
            0.0
        } else {
            matched_keywords.len() as f64 / expected_keywords.len() as f64 * 100.0
        };

        let mut score = Self::tier_score(match_percentage);
        let mut feedback = Self::tier_feedback(match_percentage).to_string();

        let word_count = answer.split_whitespace().count();
        if word_count < 20 && question_type == QuestionType::Technical {
            score = (score - 15).max(20);
            feedback.push_str(" Technical answers benefit from more depth and concrete detail.");
        } else if word_count < 10 {
            score = (score - 20).max(10);
            feedback.push_str(" Try to elaborate more on your answer.");
        }

        let answer_quality = if word_count > 50 {
            AnswerQuality::Detailed
        } else if word_count > 20 {
            AnswerQuality::Good
        } else {
            AnswerQuality::Brief
        };

        EvaluationResult {
            score: score.clamp(0, 100),
            feedback,
            matched_keywords,
            answer_quality,
        }
    }

    /// Maps keyword coverage to a score bucket.
    fn tier_score(match_percentage: f64) -> i32 {
        if match_percentage >= 100.0 {
            100
        } else if match_percentage >= 70.0 {
            85
        } else if match_percentage >= 50.0 {
            65
        } else if match_percentage >= 25.0 {
            45
        } else {
            20
        }
    }

    fn tier_feedback(match_percentage: f64) -> &'static str {
        if match_percentage >= 100.0 {
            "Excellent answer covering all the expected points."
        } else if match_percentage >= 70.0 {
            "Strong answer touching on most of the key points."
        } else if match_percentage >= 50.0 {
            "Decent answer, but several key points were missed."
        } else if match_percentage >= 25.0 {
            "The answer only partially addresses the question."
        } else {
            "The answer does not cover the expected points of the question."
        }
    }
}
