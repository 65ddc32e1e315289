mod config;
mod data;
mod error;
mod webhooks;
