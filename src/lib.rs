pub mod cards;
pub mod chart;
pub mod cli;
pub mod display;
pub mod equity;
pub mod error;
pub mod ev;
pub mod hand_evaluator;
pub mod play;
pub mod policy;
pub mod records;
pub mod session;
pub mod table;
pub mod validator;
