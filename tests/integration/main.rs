//! Router-level integration tests.

mod helpers;

mod auth_test;
mod chat_test;
mod transport_test;
