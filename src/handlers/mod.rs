pub mod accepted;
pub mod health;
