pub mod apply;
pub mod file;
pub mod init_config;
pub mod steps;
