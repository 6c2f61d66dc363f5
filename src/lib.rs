//! bookshelf - an in-memory book catalogue served over HTTP

pub mod books;
pub mod cli;
pub mod http_server;
pub mod observability;
