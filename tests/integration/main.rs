//! Integration tests against an in-process fake of the remote services

mod common;
mod console_tests;
mod gateway_tests;
