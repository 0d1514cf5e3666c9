mod assessment_repository;
mod progress_repository;
mod training_repository;
mod user_repository;

pub use assessment_repository::AssessmentRepository;
pub use progress_repository::ProgressRepository;
pub use training_repository::TrainingRepository;
pub use user_repository::UserRepository;
