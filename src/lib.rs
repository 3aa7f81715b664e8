#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "This crate contains the credential vault, session authentication, domain"]
#![doc = "models, data access, routing configuration, and error handling for the"]
#![doc = "Taskvault application. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
