//! HTTP route handlers

pub mod health;
pub mod otp;
pub mod pages;
