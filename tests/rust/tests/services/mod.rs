//! Service tests over in-memory stores
//!
//! Validates save/find/remove for each facade and the token lookup rules.
