pub mod controller;
pub mod conversation;
