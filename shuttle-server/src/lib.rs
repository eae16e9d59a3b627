//! Shuttle departure notification server.
//!
//! A web application that answers: "which shuttle should I catch for
//! today's classes, and when should I be reminded about it?"

pub mod domain;
pub mod engine;
pub mod kakao;
pub mod timetable;
pub mod web;
