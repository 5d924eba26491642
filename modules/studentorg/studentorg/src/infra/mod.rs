pub mod deploy;
pub mod storage;
