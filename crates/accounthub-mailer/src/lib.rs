//! # accounthub-mailer
//!
//! SMTP implementation of the [`EmailSender`](accounthub_core::traits::EmailSender)
//! collaborator, built on `lettre`.

pub mod smtp;

pub use smtp::SmtpMailer;
