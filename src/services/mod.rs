pub mod mail;
pub mod notifications;
