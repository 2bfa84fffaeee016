//! Record mapping between aggregates and flat relational rows
//!
//! Mappers are pure apart from client resolution, which authorization and
//! consent mappers delegate to a [`ClientResolver`](crate::repository::ClientResolver).

mod authorization;
mod client;
mod codec;
mod consent;
mod rows;

pub use authorization::AuthorizationRowMapper;
pub use client::ClientRowMapper;
pub use codec::{join_set, split_set, AttributeCodec};
pub use consent::ConsentRowMapper;
pub use rows::{AuthorizationRow, ClientRow, ConsentRow, TokenColumn, TokenColumns};
