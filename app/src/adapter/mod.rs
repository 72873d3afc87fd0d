pub mod alexa;
pub mod slack;
pub mod web;
