pub mod key_loader;
pub mod seeder;
pub mod verifier;
