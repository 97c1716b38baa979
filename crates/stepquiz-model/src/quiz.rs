pub mod answer;
pub mod content;
pub mod question;
pub mod score;
pub mod step;
pub mod submission;
