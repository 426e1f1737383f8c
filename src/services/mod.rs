pub mod eval_service;
pub mod notification_service;
pub mod question_service;
pub mod resume_service;
pub mod session_service;
pub mod voice_service;
