pub mod ask;
pub mod check;
pub mod init;
pub mod serve;
