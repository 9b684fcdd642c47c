pub mod seed_report;
pub mod seeder;
