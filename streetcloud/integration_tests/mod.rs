mod helpers;

mod compatibility;
mod executor;
mod oauth;
mod vehicles;
