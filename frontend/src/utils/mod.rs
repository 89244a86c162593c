pub mod browser;
pub mod forms;
pub mod storage;
pub mod time;
