use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::session::{AnswerRecord, InterviewSession};

/// Single seam for session persistence. The in-memory implementation backs
/// tests and ephemeral deployments; the SQLite implementation backs
/// production and additionally keeps an append-only response log.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &InterviewSession) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<InterviewSession>>;
    async fn update(&self, session: &InterviewSession) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;

    /// Append-only per-answer log. A no-op unless the store keeps one.
    async fn append_response(&self, _session_id: &str, _record: &AnswerRecord) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, InterviewSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &InterviewSession) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<InterviewSession>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn update(&self, session: &InterviewSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&session.id) {
            return Err(Error::NotFound(format!("Session {} not found", session.id)));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct DbSessionStore {
    pool: SqlitePool,
}

impl DbSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    id: String,
    candidate_id: Option<String>,
    job_role: String,
    questions: String,
    current_index: i64,
    answers: String,
    scores: String,
    status: String,
    final_score: Option<f64>,
    correct_answers: Option<i64>,
    recommendation: Option<String>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionRow {
    fn into_session(self) -> Result<InterviewSession> {
        let questions: Vec<Question> = serde_json::from_str(&self.questions)?;
        let answers: Vec<AnswerRecord> = serde_json::from_str(&self.answers)?;
        let scores: Vec<f64> = serde_json::from_str(&self.scores)?;
        let candidate_id = match self.candidate_id {
            Some(raw) => Some(
                raw.parse::<uuid::Uuid>()
                    .map_err(|e| Error::Internal(format!("Corrupt candidate id: {}", e)))?,
            ),
            None => None,
        };
        Ok(InterviewSession {
            id: self.id,
            candidate_id,
            job_role: self.job_role,
            questions,
            current_index: self.current_index.max(0) as usize,
            answers,
            scores,
            status: self.status,
            final_score: self.final_score,
            correct_answers: self.correct_answers,
            recommendation: self.recommendation,
            started_at: self.started_at,
            completed_at: self.completed_at,
        })
    }
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn create(&self, session: &InterviewSession) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_interview_sessions (
                id, candidate_id, job_role, questions, current_index,
                answers, scores, status, final_score, correct_answers,
                recommendation, started_at, completed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(session.candidate_id.map(|id| id.to_string()))
        .bind(&session.job_role)
        .bind(serde_json::to_string(&session.questions)?)
        .bind(session.current_index as i64)
        .bind(serde_json::to_string(&session.answers)?)
        .bind(serde_json::to_string(&session.scores)?)
        .bind(&session.status)
        .bind(session.final_score)
        .bind(session.correct_answers)
        .bind(&session.recommendation)
        .bind(session.started_at)
        .bind(session.completed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<InterviewSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"SELECT id, candidate_id, job_role, questions, current_index,
                      answers, scores, status, final_score, correct_answers,
                      recommendation, started_at, completed_at
               FROM ai_interview_sessions WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(SessionRow::into_session).transpose()
    }

    async fn update(&self, session: &InterviewSession) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE ai_interview_sessions
            SET current_index = ?, answers = ?, scores = ?, status = ?,
                final_score = ?, correct_answers = ?, recommendation = ?,
                completed_at = ?
            WHERE id = ?
            "#,
        )
        .bind(session.current_index as i64)
        .bind(serde_json::to_string(&session.answers)?)
        .bind(serde_json::to_string(&session.scores)?)
        .bind(&session.status)
        .bind(session.final_score)
        .bind(session.correct_answers)
        .bind(&session.recommendation)
        .bind(session.completed_at)
        .bind(&session.id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Session {} not found", session.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM ai_interview_responses WHERE session_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM ai_interview_sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn append_response(&self, session_id: &str, record: &AnswerRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_interview_responses (
                session_id, question_index, question_text, answer_text, score, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session_id)
        .bind(record.question_index as i64)
        .bind(&record.question_text)
        .bind(&record.answer_text)
        .bind(record.score)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Difficulty, QuestionType};
    use crate::models::session::SESSION_IN_PROGRESS;

    fn sample_session(id: &str) -> InterviewSession {
        InterviewSession {
            id: id.to_string(),
            candidate_id: Some(uuid::Uuid::new_v4()),
            job_role: "backend".to_string(),
            questions: vec![Question {
                question_type: QuestionType::Technical,
                difficulty: Difficulty::Easy,
                text: "Explain your experience with python.".to_string(),
                expected_keywords: vec!["django".to_string(), "flask".to_string()],
                follow_up: "Which project?".to_string(),
            }],
            current_index: 0,
            answers: Vec::new(),
            scores: Vec::new(),
            status: SESSION_IN_PROGRESS.to_string(),
            final_score: None,
            correct_answers: None,
            recommendation: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        let mut session = sample_session("ivw_1_abc");
        store.create(&session).await.unwrap();

        session.scores.push(85.0);
        session.current_index = 1;
        store.update(&session).await.unwrap();

        let loaded = store.get("ivw_1_abc").await.unwrap().unwrap();
        assert_eq!(loaded.current_index, 1);
        assert_eq!(loaded.scores, vec![85.0]);

        store.delete("ivw_1_abc").await.unwrap();
        assert!(store.get("ivw_1_abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_store_rejects_update_of_unknown_session() {
        let store = MemorySessionStore::new();
        let session = sample_session("ivw_2_xyz");
        assert!(matches!(
            store.update(&session).await,
            Err(Error::NotFound(_))
        ));
    }

    async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("test pool");
        sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn db_store_round_trips_final_score_and_correct_answers() {
        let store = DbSessionStore::new(test_pool().await);
        let mut session = sample_session("ivw_3_db");
        store.create(&session).await.unwrap();

        session.current_index = 1;
        session.scores = vec![100.0, 80.0, 60.0, 40.0];
        session.final_score = Some(70.0);
        session.correct_answers = Some(2);
        session.recommendation = Some("Hire".to_string());
        session.status = "completed".to_string();
        session.completed_at = Some(Utc::now());
        store.update(&session).await.unwrap();

        let loaded = store.get("ivw_3_db").await.unwrap().unwrap();
        assert_eq!(loaded.final_score, Some(70.0));
        assert_eq!(loaded.correct_answers, Some(2));
        assert_eq!(loaded.recommendation.as_deref(), Some("Hire"));
        assert_eq!(loaded.scores, vec![100.0, 80.0, 60.0, 40.0]);
        assert_eq!(loaded.questions.len(), 1);
    }

    #[tokio::test]
    async fn db_store_appends_response_log() {
        let pool = test_pool().await;
        let store = DbSessionStore::new(pool.clone());
        let session = sample_session("ivw_4_log");
        store.create(&session).await.unwrap();

        let record = AnswerRecord {
            question_index: 0,
            question_text: "Explain your experience with python.".to_string(),
            answer_text: "I used django and flask.".to_string(),
            score: 100.0,
            timestamp: Utc::now(),
        };
        store.append_response(&session.id, &record).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ai_interview_responses WHERE session_id = ?",
        )
        .bind(&session.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
