pub mod access;
pub mod members;
pub mod roles;
