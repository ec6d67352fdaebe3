//! Single-resource todo list: an HTTP API over an embedded document store
//! (`api` + `db`), and the client/view state that mirrors it (`client`).

pub mod api;
pub mod client;
pub mod db;
pub mod models;
