pub mod crud;
pub mod documents;
pub mod hr;
pub mod login;
pub mod people_planner;
