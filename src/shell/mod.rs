// Composition root: configuration, shared state, the HTTP router and the
// GraphQL schema. Storage is chosen and seeded in `main`.

pub mod config;
pub mod errors;
pub mod graphql;
pub mod http;
pub mod state;
