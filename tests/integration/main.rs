//! Integration tests

mod api_tests;
mod router;
mod search_proxy;
mod support;
