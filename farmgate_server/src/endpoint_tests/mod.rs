mod helpers;

mod auth;
mod market_flow;
