pub mod calc;
pub mod calculations;
pub mod catalog;
pub mod health;
